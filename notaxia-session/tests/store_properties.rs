//! Property-based tests for session stores.
//!
//! Every store must satisfy the same round-trip laws:
//! - set(t) then get() yields t
//! - clear() then get() yields nothing
//! - the last set wins

use notaxia_session::{FileSessionStore, MemorySessionStore, SessionStore, SessionToken};
use proptest::prelude::*;

fn token_strategy() -> impl Strategy<Value = SessionToken> {
    prop::string::string_regex("[A-Za-z0-9._~+/=-]{1,256}")
        .unwrap()
        .prop_map(|raw| SessionToken::new(raw).unwrap())
}

fn assert_roundtrip(store: &dyn SessionStore, t: &SessionToken) -> Result<(), TestCaseError> {
    store.set(t.clone()).unwrap();
    let got = store.get().unwrap();
    prop_assert_eq!(got.as_ref(), Some(t));
    store.clear().unwrap();
    prop_assert!(store.get().unwrap().is_none());
    Ok(())
}

proptest! {
    #[test]
    fn memory_store_roundtrip(t in token_strategy()) {
        assert_roundtrip(&MemorySessionStore::new(), &t)?;
    }

    #[test]
    fn file_store_roundtrip(t in token_strategy()) {
        let dir = tempfile::tempdir().unwrap();
        let store = FileSessionStore::new(dir.path().join("session.json"));
        assert_roundtrip(&store, &t)?;
    }

    #[test]
    fn last_set_wins(a in token_strategy(), b in token_strategy()) {
        let store = MemorySessionStore::new();
        store.set(a).unwrap();
        store.set(b.clone()).unwrap();
        prop_assert_eq!(store.get().unwrap(), Some(b));
    }

    #[test]
    fn bearer_matches_raw(t in token_strategy()) {
        prop_assert_eq!(t.bearer(), format!("Bearer {}", t.as_str()));
    }
}

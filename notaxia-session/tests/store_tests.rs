use notaxia_session::{
    FileSessionStore, MemorySessionStore, SessionError, SessionStore, SessionToken, TOKEN_KEY,
    default_session_path,
};
use pretty_assertions::assert_eq;
use std::sync::Arc;

fn token(raw: &str) -> SessionToken {
    SessionToken::new(raw).unwrap()
}

// ── SessionToken ────────────────────────────────────────────────

#[test]
fn token_rejects_empty() {
    assert!(matches!(SessionToken::new(""), Err(SessionError::EmptyToken)));
    assert!(matches!(SessionToken::new("   "), Err(SessionError::EmptyToken)));
}

#[test]
fn token_deserialize_rejects_empty() {
    assert!(serde_json::from_str::<SessionToken>("\"\"").is_err());
    assert!(serde_json::from_str::<SessionToken>("\"   \"").is_err());
}

#[test]
fn token_serializes_as_plain_string() {
    let json = serde_json::to_string(&token("abc")).unwrap();
    assert_eq!(json, "\"abc\"");
    let back: SessionToken = serde_json::from_str(&json).unwrap();
    assert_eq!(back.as_str(), "abc");
}

#[test]
fn token_bearer_header_value() {
    assert_eq!(token("tok1").bearer(), "Bearer tok1");
}

#[test]
fn token_debug_is_redacted() {
    let debug = format!("{:?}", token("super-secret"));
    assert!(!debug.contains("super-secret"));
    assert!(debug.contains("REDACTED"));
}

#[test]
fn token_try_from_str() {
    let t: SessionToken = "abc".try_into().unwrap();
    assert_eq!(t.as_str(), "abc");
}

// ── MemorySessionStore ──────────────────────────────────────────

#[test]
fn memory_store_starts_empty() {
    let store = MemorySessionStore::new();
    assert!(store.get().unwrap().is_none());
    assert!(!store.has_token().unwrap());
}

#[test]
fn memory_store_set_get_clear() {
    let store = MemorySessionStore::new();
    store.set(token("t1")).unwrap();
    assert_eq!(store.get().unwrap(), Some(token("t1")));

    store.clear().unwrap();
    assert!(store.get().unwrap().is_none());
}

#[test]
fn memory_store_holds_one_token() {
    let store = MemorySessionStore::with_token(token("old"));
    store.set(token("new")).unwrap();
    assert_eq!(store.get().unwrap().unwrap().as_str(), "new");
}

#[test]
fn memory_store_clear_when_empty_is_ok() {
    let store = MemorySessionStore::new();
    store.clear().unwrap();
    store.clear().unwrap();
}

#[test]
fn arc_store_shares_state() {
    let store = Arc::new(MemorySessionStore::new());
    let other = Arc::clone(&store);
    store.set(token("shared")).unwrap();
    assert_eq!(other.get().unwrap().unwrap().as_str(), "shared");
}

#[test]
fn dyn_store_works_through_arc() {
    let store: Arc<dyn SessionStore> = Arc::new(MemorySessionStore::new());
    store.set(token("dyn")).unwrap();
    assert!(store.has_token().unwrap());
}

// ── FileSessionStore ────────────────────────────────────────────

#[test]
fn file_store_missing_file_is_empty() {
    let dir = tempfile::tempdir().unwrap();
    let store = FileSessionStore::new(dir.path().join("session.json"));
    assert!(store.get().unwrap().is_none());
}

#[test]
fn file_store_roundtrip() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nested").join("session.json");
    let store = FileSessionStore::new(&path);

    store.set(token("tok1")).unwrap();
    assert!(path.exists());
    assert_eq!(store.get().unwrap(), Some(token("tok1")));

    store.clear().unwrap();
    assert!(store.get().unwrap().is_none());
}

#[test]
fn file_store_persists_across_instances() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("session.json");

    FileSessionStore::new(&path).set(token("durable")).unwrap();
    let reopened = FileSessionStore::new(&path);
    assert_eq!(reopened.get().unwrap().unwrap().as_str(), "durable");
}

#[test]
fn file_store_uses_named_key() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("session.json");
    FileSessionStore::new(&path).set(token("raw-value")).unwrap();

    let json: serde_json::Value =
        serde_json::from_slice(&std::fs::read(&path).unwrap()).unwrap();
    assert_eq!(json[TOKEN_KEY], "raw-value");
}

#[test]
fn file_store_preserves_other_keys() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("session.json");
    std::fs::write(&path, r#"{"theme":"dark"}"#).unwrap();

    let store = FileSessionStore::new(&path);
    store.set(token("t")).unwrap();
    store.clear().unwrap();

    let json: serde_json::Value =
        serde_json::from_slice(&std::fs::read(&path).unwrap()).unwrap();
    assert_eq!(json["theme"], "dark");
    assert!(json.get(TOKEN_KEY).is_none());
}

#[test]
fn file_store_empty_file_is_empty() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("session.json");
    std::fs::write(&path, "\n").unwrap();
    assert!(FileSessionStore::new(&path).get().unwrap().is_none());
}

#[test]
fn file_store_corrupt_file_reads_as_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("session.json");
    std::fs::write(&path, "{not json").unwrap();
    let result = FileSessionStore::new(&path).get();
    assert!(matches!(result, Err(SessionError::Serialization(_))));
}

#[test]
fn file_store_clear_recovers_from_corrupt_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("session.json");
    std::fs::write(&path, "{not json").unwrap();
    let store = FileSessionStore::new(&path);

    store.clear().unwrap();
    assert_eq!(store.get().unwrap(), None);
}

#[test]
fn file_store_set_recovers_from_corrupt_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("session.json");
    std::fs::write(&path, "{not json").unwrap();
    let store = FileSessionStore::new(&path);

    store.set(token("fresh")).unwrap();
    assert_eq!(store.get().unwrap().unwrap().as_str(), "fresh");
}

#[test]
fn file_store_set_recovers_from_non_object_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("session.json");
    std::fs::write(&path, "[1, 2, 3]").unwrap();
    let store = FileSessionStore::new(&path);

    store.set(token("fresh")).unwrap();
    assert!(store.has_token().unwrap());
}

#[test]
fn file_store_ignores_non_string_token() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("session.json");
    std::fs::write(&path, format!(r#"{{"{TOKEN_KEY}": 42}}"#)).unwrap();
    assert!(FileSessionStore::new(&path).get().unwrap().is_none());
}

#[cfg(unix)]
#[test]
fn file_store_is_owner_only() {
    use std::os::unix::fs::PermissionsExt;

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("session.json");
    FileSessionStore::new(&path).set(token("t")).unwrap();

    let mode = std::fs::metadata(&path).unwrap().permissions().mode();
    assert_eq!(mode & 0o777, 0o600);
}

#[test]
fn default_path_lives_under_notaxia_config_dir() {
    // headless CI may have no config dir at all
    if let Ok(path) = default_session_path() {
        assert!(path.ends_with("notaxia/admin-session.json"));
    }
}

//! Property-based tests for URL resolution and envelope decoding.

use notaxia_api::{ApiConfig, Envelope};
use proptest::prelude::*;
use serde_json::{Value, json};

fn segment_strategy() -> impl Strategy<Value = String> {
    prop::string::string_regex("[a-z0-9-]{1,12}").unwrap()
}

fn path_strategy() -> impl Strategy<Value = String> {
    prop::collection::vec(segment_strategy(), 1..5).prop_map(|segs| segs.join("/"))
}

fn scalar_strategy() -> impl Strategy<Value = Value> {
    prop_oneof![
        any::<i64>().prop_map(Value::from),
        any::<bool>().prop_map(Value::from),
        "[a-zA-Z0-9 ]{0,20}".prop_map(Value::from),
    ]
}

proptest! {
    #[test]
    fn relative_paths_land_under_api(path in path_strategy()) {
        let cfg = ApiConfig::new("https://api.notaxia.com");
        let expected = format!("https://api.notaxia.com/api/{path}");
        prop_assert_eq!(cfg.resolve(&path), expected.clone());
        prop_assert_eq!(cfg.resolve(&format!("/{path}")), expected);
    }

    #[test]
    fn trailing_slash_on_base_is_ignored(path in path_strategy()) {
        let with = ApiConfig::new("https://api.notaxia.com/");
        let without = ApiConfig::new("https://api.notaxia.com");
        prop_assert_eq!(with.resolve(&path), without.resolve(&path));
    }

    #[test]
    fn wrapped_data_is_unwrapped(data in scalar_strategy(), message in "[a-z ]{1,20}") {
        let env = Envelope::from_value(json!({ "data": data.clone(), "message": message.clone() }));
        let (payload, msg) = env.into_parts();
        prop_assert_eq!(payload, data);
        prop_assert_eq!(msg, Some(message));
    }

    #[test]
    fn bodies_without_data_pass_through(key in "[a-c]{1,8}", value in scalar_strategy()) {
        let mut map = serde_json::Map::new();
        map.insert(key, value);
        let body = Value::Object(map);
        let env = Envelope::from_value(body.clone());
        prop_assert_eq!(env.payload(), &body);
    }
}

//! Property-based tests for configuration coercion and merging.
//!
//! These tests use randomly generated inputs to check the rules every
//! loaded document relies on.
//!
//! Test coverage:
//! - Boolean and integer coercion from strings
//! - URL trailing slash normalization
//! - Environment key decoding
//! - Deep merge keeps siblings and lets the overlay win

use proptest::prelude::*;
use serde_yaml::{Mapping, Value};

use headplane_config::schema::{self, Mode, parse_bool, strip_trailing_slash};
use headplane_config::{collect_overrides, deep_merge, override_path};

/// Strategy for generating lower-case field names.
fn segment_strategy() -> impl Strategy<Value = String> {
    "[a-z][a-z0-9_]{0,12}".prop_filter("no double underscore", |s| {
        !s.contains("__") && !s.ends_with('_')
    })
}

/// Strategy for generating base URLs without a trailing slash.
fn url_strategy() -> impl Strategy<Value = String> {
    let scheme = prop_oneof![Just("http"), Just("https")];
    let host = prop_oneof![
        Just("headscale"),
        Just("headscale.example.com"),
        Just("10.0.0.1"),
        Just("localhost"),
    ];
    (scheme, host, proptest::option::of(1u16..=65535u16), "(/[a-z]{1,8}){0,2}").prop_map(
        |(scheme, host, port, path)| match port {
            Some(port) => format!("{scheme}://{host}:{port}{path}"),
            None => format!("{scheme}://{host}{path}"),
        },
    )
}

fn mapping(pairs: Vec<(String, Value)>) -> Value {
    let mut map = Mapping::new();
    for (key, value) in pairs {
        map.insert(Value::String(key), value);
    }
    Value::Mapping(map)
}

proptest! {
    #[test]
    fn test_boolean_spellings_are_case_insensitive(
        value in any::<bool>(),
        index in 0usize..4,
        upper in any::<bool>(),
    ) {
        let spellings = if value {
            ["true", "1", "yes", "on"]
        } else {
            ["false", "0", "no", "off"]
        };
        let raw = if upper {
            spellings[index].to_uppercase()
        } else {
            spellings[index].to_string()
        };
        prop_assert_eq!(parse_bool(&raw), Some(value));
    }

    #[test]
    fn test_string_port_coerces_like_integer(port in 0u16..=65535u16) {
        let fragment = mapping(vec![(
            "server".to_string(),
            mapping(vec![("port".to_string(), Value::String(port.to_string()))]),
        )]);
        let validated = schema::validate_tree(fragment, Mode::Partial).unwrap();
        let expected = mapping(vec![(
            "server".to_string(),
            mapping(vec![("port".to_string(), Value::Number(u64::from(port).into()))]),
        )]);
        prop_assert_eq!(validated, expected);
    }

    #[test]
    fn test_port_out_of_range_is_rejected(port in 65536u64..=10_000_000u64) {
        let fragment = mapping(vec![(
            "server".to_string(),
            mapping(vec![("port".to_string(), Value::Number(port.into()))]),
        )]);
        let errors = schema::validate_tree(fragment, Mode::Partial).unwrap_err();
        prop_assert!(errors.contains_path("server.port"));
    }

    #[test]
    fn test_trailing_slashes_are_stripped(url in url_strategy(), slashes in 0usize..4) {
        let raw = format!("{url}{}", "/".repeat(slashes));
        prop_assert_eq!(strip_trailing_slash(&raw), url.clone());
        prop_assert_eq!(strip_trailing_slash(&url), url);
    }

    #[test]
    fn test_env_key_decodes_to_lowercase_path(
        segments in proptest::collection::vec(segment_strategy(), 1..4),
    ) {
        let key = format!(
            "HEADPLANE_{}",
            segments
                .iter()
                .map(|s| s.to_uppercase())
                .collect::<Vec<_>>()
                .join("__")
        );
        let root_var = matches!(
            key.as_str(),
            "HEADPLANE_CONFIG_PATH" | "HEADPLANE_LOAD_ENV_OVERRIDES" | "HEADPLANE_DEBUG_LOG"
        );
        if root_var {
            prop_assert_eq!(override_path(&key), None);
        } else {
            prop_assert_eq!(override_path(&key), Some(segments));
        }
    }

    #[test]
    fn test_non_prefixed_variables_are_ignored(key in "[A-Z][A-Z_]{0,16}", value in "[a-z0-9]{1,8}") {
        prop_assume!(!key.starts_with("HEADPLANE_"));
        let overrides = collect_overrides(vec![(key, value)]);
        prop_assert_eq!(overrides, Value::Mapping(Mapping::new()));
    }

    #[test]
    fn test_deep_merge_keeps_siblings(
        section in segment_strategy(),
        base_key in segment_strategy(),
        overlay_key in segment_strategy(),
        base_value in any::<u32>(),
        overlay_value in any::<u32>(),
    ) {
        prop_assume!(base_key != overlay_key);
        let mut base = mapping(vec![(
            section.clone(),
            mapping(vec![(base_key.clone(), Value::Number(base_value.into()))]),
        )]);
        let overlay = mapping(vec![(
            section.clone(),
            mapping(vec![(overlay_key.clone(), Value::Number(overlay_value.into()))]),
        )]);

        deep_merge(&mut base, overlay);

        let merged = base.get(section.as_str()).unwrap();
        prop_assert_eq!(
            merged.get(base_key.as_str()),
            Some(&Value::Number(base_value.into()))
        );
        prop_assert_eq!(
            merged.get(overlay_key.as_str()),
            Some(&Value::Number(overlay_value.into()))
        );
    }

    #[test]
    fn test_deep_merge_overlay_wins_and_replaces_sequences(
        key in segment_strategy(),
        base_items in proptest::collection::vec(any::<u16>(), 0..5),
        overlay_items in proptest::collection::vec(any::<u16>(), 0..5),
    ) {
        let to_seq = |items: &[u16]| {
            Value::Sequence(items.iter().map(|i| Value::Number(u64::from(*i).into())).collect())
        };
        let mut base = mapping(vec![(key.clone(), to_seq(&base_items))]);
        let overlay = mapping(vec![(key.clone(), to_seq(&overlay_items))]);

        deep_merge(&mut base, overlay);
        prop_assert_eq!(base.get(key.as_str()), Some(&to_seq(&overlay_items)));
    }
}

//! Property-based tests for rust_call_logger using proptest

use proptest::prelude::*;
use rust_call_logger::advice::{resolve_level, resolve_template};
use rust_call_logger::interpolation::{StringSubstitutor, SupplierLookup};
use rust_call_logger::prelude::*;
use std::collections::HashMap;

fn any_level() -> impl Strategy<Value = LogLevel> {
    prop_oneof![
        Just(LogLevel::Trace),
        Just(LogLevel::Debug),
        Just(LogLevel::Info),
        Just(LogLevel::Warn),
        Just(LogLevel::Error),
    ]
}

fn any_override() -> impl Strategy<Value = LevelOverride> {
    prop_oneof![
        Just(LevelOverride::Default),
        any_level().prop_map(LevelOverride::Level),
    ]
}

// ============================================================================
// Substitution
// ============================================================================

proptest! {
    /// Templates without a closing brace come back unchanged
    #[test]
    fn test_token_free_templates_unchanged(template in "[^}]*") {
        let lookup = |_: &str| Some("X".to_string());
        let out = StringSubstitutor::new().substitute(&template, &lookup);
        prop_assert_eq!(out, template);
    }

    /// Substituted values are never rescanned for tokens
    #[test]
    fn test_values_are_not_rescanned(value in "[a-z{}]{0,12}") {
        let mut lookup = SupplierLookup::new();
        let inserted = value.clone();
        lookup.add_supplier("a", move || inserted.clone());
        lookup.add_supplier("b", || "B".to_string());
        let out = StringSubstitutor::new().substitute("<{a}>", &lookup);
        prop_assert_eq!(out, format!("<{}>", value));
    }

    /// Every registered token is replaced by its value
    #[test]
    fn test_registered_tokens_replaced(
        entries in prop::collection::hash_map("[a-z]{1,6}", "[A-Z0-9 ]{0,8}", 1..5)
    ) {
        let mut template = String::new();
        let mut expected = String::new();
        for (key, value) in &entries {
            template.push_str(&format!("{{{}}}|", key));
            expected.push_str(value);
            expected.push('|');
        }

        let values: HashMap<String, String> = entries.clone();
        let lookup = move |key: &str| values.get(key).cloned();
        prop_assert_eq!(StringSubstitutor::new().substitute(&template, &lookup), expected);
    }

    /// The substitutor never panics, whatever the input
    #[test]
    fn test_substitute_total(template in "\\PC*") {
        let lookup = |key: &str| Some(key.to_uppercase());
        let _ = StringSubstitutor::new().substitute(&template, &lookup);
    }
}

// ============================================================================
// Level resolution
// ============================================================================

proptest! {
    #[test]
    fn test_default_override_yields_default(default in any_level()) {
        prop_assert_eq!(resolve_level(LevelOverride::Default, default), default);
    }

    #[test]
    fn test_explicit_override_wins(level in any_level(), default in any_level()) {
        prop_assert_eq!(resolve_level(LevelOverride::Level(level), default), level);
    }

    #[test]
    fn test_override_str_roundtrip(level in any_override()) {
        let parsed: LevelOverride = level.to_string().parse().unwrap();
        prop_assert_eq!(parsed, level);
    }

    #[test]
    fn test_log_level_ordering(level1 in any_level(), level2 in any_level()) {
        let val1 = level1 as u8;
        let val2 = level2 as u8;
        prop_assert_eq!(level1 <= level2, val1 <= val2);
        prop_assert_eq!(level1 < level2, val1 < val2);
    }

    #[test]
    fn test_empty_template_override_uses_default(default in ".{0,20}", custom in ".{1,20}") {
        prop_assert_eq!(resolve_template("", &default), default.as_str());
        prop_assert_eq!(resolve_template(&custom, &default), custom.as_str());
    }
}

// ============================================================================
// Value rendering
// ============================================================================

proptest! {
    /// Sequences render as their elements joined by ", " in brackets
    #[test]
    fn test_sequence_rendering(items in prop::collection::vec(any::<i32>(), 0..10)) {
        let chain = rust_call_logger::interpolation::ConverterChain::new(
            &ConverterProperties::default()
        ).unwrap();
        let joined: Vec<String> = items.iter().map(|i| i.to_string()).collect();
        let expected = format!("[{}]", joined.join(", "));
        prop_assert_eq!(chain.render(&items.as_log_value()), expected);
    }

    /// Hidden parameters never leak their value
    #[test]
    fn test_hidden_never_leaks(secret in "[a-zA-Z0-9]{4,16}") {
        let rendered = Redaction::Hidden.render(&secret.as_log_value(), &[]);
        prop_assert!(!rendered.contains(&secret));
    }
}

//! Property-based tests for coercion, color assignment, and formatting
//!
//! Uses proptest to verify the total-function guarantees: coercion
//! never fails, color assignment stays inside the palette, and the
//! single-line directive never leaks a newline.

use proptest::prelude::*;
use serde_json::json;

use debugtap_core::{
    color_for, humanize, ConfigValue, Formatters, InspectOpts, BASIC_PALETTE, EXTENDED_PALETTE,
};

// ============================================================================
// Strategy Generators
// ============================================================================

/// Arbitrary environment values, including the coercible words
fn env_value_strategy() -> impl Strategy<Value = String> {
    prop_oneof![
        3 => ".{0,40}",
        1 => prop_oneof![
            Just("yes".to_string()),
            Just("ON".to_string()),
            Just("disabled".to_string()),
            Just("null".to_string()),
            Just("42".to_string()),
            Just("-0.5".to_string()),
        ],
    ]
}

/// Namespace-looking strings (plus arbitrary unicode for robustness)
fn namespace_strategy() -> impl Strategy<Value = String> {
    prop_oneof![
        3 => "[a-z]{1,8}(:[a-z]{1,8}){0,3}",
        1 => ".{0,20}",
    ]
}

fn leaf_value_strategy() -> impl Strategy<Value = serde_json::Value> {
    prop_oneof![
        Just(json!(null)),
        any::<bool>().prop_map(|b| json!(b)),
        any::<i32>().prop_map(|n| json!(n)),
        "[ -~]{0,20}".prop_map(|s| json!(s)),
    ]
}

/// Nested JSON values up to a few levels deep
fn json_value_strategy() -> impl Strategy<Value = serde_json::Value> {
    leaf_value_strategy().prop_recursive(3, 24, 4, |inner| {
        prop_oneof![
            prop::collection::vec(inner.clone(), 0..4).prop_map(serde_json::Value::Array),
            prop::collection::btree_map("[a-z]{1,6}", inner, 0..4)
                .prop_map(|m| serde_json::Value::Object(m.into_iter().collect())),
        ]
    })
}

// ============================================================================
// Property Tests
// ============================================================================

proptest! {
    /// Coercion is total: any value string produces exactly one variant
    #[test]
    fn coercion_never_panics(value in env_value_strategy()) {
        let _ = ConfigValue::coerce(&value);
    }

    /// Extraction is total over arbitrary environments
    #[test]
    fn extraction_never_panics(
        key in ".{0,20}",
        value in env_value_strategy(),
    ) {
        let opts = InspectOpts::from_vars(vec![(key.clone(), value)]);
        // At most one derived key can come out of one variable
        prop_assert!(opts.iter().count() <= 1);
    }

    /// A coerced number renders back to the exact input text
    #[test]
    fn number_coercion_roundtrips(value in env_value_strategy()) {
        if let ConfigValue::Number(n) = ConfigValue::coerce(&value) {
            prop_assert_eq!(n.to_string(), value);
        }
    }

    /// Color assignment is deterministic and stays within the palette
    #[test]
    fn color_in_palette(namespace in namespace_strategy()) {
        let basic = color_for(&namespace, BASIC_PALETTE);
        prop_assert!(BASIC_PALETTE.contains(&basic));
        prop_assert_eq!(basic, color_for(&namespace, BASIC_PALETTE));

        let extended = color_for(&namespace, EXTENDED_PALETTE);
        prop_assert!(EXTENDED_PALETTE.contains(&extended));
    }

    /// %o output contains no newline for any input value
    #[test]
    fn compact_directive_is_single_line(value in json_value_strategy()) {
        let formatters = Formatters::default();
        let opts = InspectOpts::default();
        let out = debugtap_core::format::interpolate("%o", &[value], &formatters, &opts, false);
        prop_assert!(!out.contains('\n'));
    }

    /// %O line count matches what the renderer produces directly
    #[test]
    fn expanded_directive_preserves_lines(value in json_value_strategy()) {
        let formatters = Formatters::default();
        let opts = InspectOpts::default();
        let out = debugtap_core::format::interpolate("%O", &[value.clone()], &formatters, &opts, false);
        let direct = debugtap_core::inspect::render(
            &value,
            &debugtap_core::inspect::RenderOptions { colors: false, depth: None },
        );
        prop_assert_eq!(out.split('\n').count(), direct.split('\n').count());
    }

    /// Humanized durations always carry a unit suffix
    #[test]
    fn humanize_has_unit(ms in 0u64..10_000_000_000) {
        let out = humanize(std::time::Duration::from_millis(ms));
        prop_assert!(out.ends_with("ms")
            || out.ends_with('s')
            || out.ends_with('m')
            || out.ends_with('h')
            || out.ends_with('d'));
    }
}

//! Property-based tests for failpoint configuration
//!
//! These tests use proptest to verify validation invariants across many random inputs.

use failpoints_domain::{
    FailpointState, TriggerConfig, ValidationError,
    value_objects::{FailpointName, Probability},
};
use proptest::prelude::*;

// ============================================================================
// Probability Property Tests
// ============================================================================

mod probability_tests {
    use super::*;

    proptest! {
        #[test]
        fn in_range_values_accepted(p in 0.0f64..=1.0f64) {
            let result = Probability::new(p);
            prop_assert!(result.is_ok());
            prop_assert!((result.unwrap().value() - p).abs() < f64::EPSILON);
        }

        #[test]
        fn out_of_range_values_rejected(
            p in prop_oneof![
                (-1000.0f64..-0.000_001f64),
                (1.000_001f64..1000.0f64)
            ]
        ) {
            prop_assert_eq!(Probability::new(p), Err(ValidationError::InvalidProbability(p)));
        }

        #[test]
        fn always_admits_any_sample(sample in 0.0f64..1.0f64) {
            prop_assert!(Probability::ALWAYS.admits(sample));
        }

        #[test]
        fn never_admits_any_sample(sample in 0.0f64..1.0f64) {
            prop_assert!(!Probability::NEVER.admits(sample));
        }

        #[test]
        fn admits_iff_sample_not_above(p in 0.001f64..0.999f64, sample in 0.0f64..1.0f64) {
            let probability = Probability::new(p).unwrap();
            prop_assert_eq!(probability.admits(sample), sample <= p);
        }
    }
}

// ============================================================================
// TriggerConfig Property Tests
// ============================================================================

mod trigger_config_tests {
    use super::*;

    proptest! {
        #[test]
        fn positive_limits_accepted(
            p in 0.0f64..=1.0f64,
            count in 1i64..10_000i64,
            duration_ms in 1i64..10_000_000i64
        ) {
            let settings = TriggerConfig::with_probability(p)
                .with_max_count(count)
                .with_max_duration_ms(duration_ms)
                .validate();
            prop_assert!(settings.is_ok());

            let settings = settings.unwrap();
            prop_assert_eq!(settings.max_count(), u64::try_from(count).ok());
            prop_assert_eq!(settings.max_duration_ms(), Some(duration_ms));
        }

        #[test]
        fn non_positive_count_rejected(count in i64::MIN..=0i64) {
            let result = TriggerConfig::with_probability(1.0).with_max_count(count).validate();
            prop_assert_eq!(result, Err(ValidationError::InvalidMaxCount(count)));
        }

        #[test]
        fn non_positive_duration_rejected(duration_ms in i64::MIN..=0i64) {
            let result = TriggerConfig::with_probability(1.0)
                .with_max_duration_ms(duration_ms)
                .validate();
            prop_assert_eq!(result, Err(ValidationError::InvalidMaxDuration(duration_ms)));
        }

        #[test]
        fn boolean_shorthand_never_carries_limits(enabled in any::<bool>()) {
            let settings = FailpointState::from(enabled).validate().unwrap();
            prop_assert_eq!(settings.is_active(), enabled);
            prop_assert!(settings.max_count().is_none());
            prop_assert!(settings.max_duration().is_none());
            prop_assert!(settings.args().is_none());
        }
    }
}

// ============================================================================
// FailpointName Property Tests
// ============================================================================

mod failpoint_name_tests {
    use super::*;

    proptest! {
        #[test]
        fn non_blank_names_accepted(name in "[a-z_][a-z0-9_.:-]{0,32}") {
            let result = FailpointName::new(name.clone());
            prop_assert!(result.is_ok());
            let parsed = result.unwrap();
            prop_assert_eq!(parsed.as_str(), name.as_str());
        }

        #[test]
        fn blank_names_rejected(name in "[ \t]{0,8}") {
            prop_assert_eq!(FailpointName::new(name), Err(ValidationError::EmptyName));
        }
    }
}

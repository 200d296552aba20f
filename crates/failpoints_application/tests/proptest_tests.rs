//! Property-based tests for failpoint evaluation
//!
//! These tests use proptest to check firing limits and validation across
//! many random configurations.

use failpoints_application::Registry;
use failpoints_domain::TriggerConfig;
use proptest::prelude::*;

// ============================================================================
// Max Count Property Tests
// ============================================================================

mod max_count_tests {
    use super::*;

    proptest! {
        #[test]
        fn always_on_fires_exactly_max_count_times(
            max_count in 1i64..50,
            extra in 1usize..20
        ) {
            let registry = Registry::unregistered();
            registry
                .set("p", TriggerConfig::with_probability(1.0).with_max_count(max_count))
                .unwrap();

            let evaluations = usize::try_from(max_count).unwrap() + extra;
            let fired = (0..evaluations).filter(|_| registry.should_fail("p")).count();

            prop_assert_eq!(fired, usize::try_from(max_count).unwrap());
            prop_assert!(!registry.should_fail("p"));
        }

        #[test]
        fn trigger_count_never_exceeds_max_count(
            probability in 0.0f64..=1.0f64,
            max_count in 1i64..20
        ) {
            let registry = Registry::unregistered();
            registry
                .set("p", TriggerConfig::with_probability(probability).with_max_count(max_count))
                .unwrap();

            for _ in 0..100 {
                let _ = registry.should_fail("p");
            }

            let count = registry.get("p").unwrap().trigger_count.unwrap();
            prop_assert!(count <= u64::try_from(max_count).unwrap());
        }
    }
}

// ============================================================================
// Validation Property Tests
// ============================================================================

mod validation_tests {
    use super::*;

    proptest! {
        #[test]
        fn out_of_range_probability_keeps_previous_state(
            probability in prop_oneof![
                (-100.0f64..-0.0001f64),
                (1.0001f64..100.0f64)
            ]
        ) {
            let registry = Registry::unregistered();
            registry.set("p", true).unwrap();

            prop_assert!(registry.set("p", TriggerConfig::with_probability(probability)).is_err());
            prop_assert!(registry.should_fail("p"));
        }

        #[test]
        fn zero_probability_never_fires(max_count in 1i64..10) {
            let registry = Registry::unregistered();
            registry
                .set("p", TriggerConfig::with_probability(0.0).with_max_count(max_count))
                .unwrap();

            for _ in 0..50 {
                prop_assert!(!registry.should_fail("p"));
            }
        }
    }
}

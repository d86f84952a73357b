/// Property-based tests for the checkout classifier
use proptest::prelude::*;

use crate::domain::checkout::{checkout_type, CheckoutType};
use crate::domain::rules::{max_score_for_darts, MAX_CHECKOUT};
use crate::domain::test_prelude;

proptest! {
    #![proptest_config(test_prelude::proptest_config())]

    /// Property: the classifier is total and deterministic.
    /// Out-of-range scores are `None`, finishable ones sit in 2..=170.
    #[test]
    fn prop_classifier_total_and_stable(score in any::<u16>()) {
        let first = checkout_type(score);
        prop_assert_eq!(first, checkout_type(score));

        if score > MAX_CHECKOUT || score < 2 {
            prop_assert_eq!(first, CheckoutType::None);
        }
        if first.is_finishable() {
            prop_assert!((2..=MAX_CHECKOUT).contains(&score));
        }
        prop_assert_eq!(first.min_darts().is_some(), first.is_finishable());
    }

    /// Property: one-dart finishes are exactly the doubles and the bull.
    #[test]
    fn prop_one_dart_is_a_double(score in 2u16..=MAX_CHECKOUT) {
        let is_double = (score <= 40 && score % 2 == 0) || score == 50;
        prop_assert_eq!(checkout_type(score) == CheckoutType::OneDart, is_double);
    }

    /// Property: the fewest darts a classification claims can carry the score,
    /// so confirming with that count is always accepted.
    #[test]
    fn prop_min_darts_can_carry_the_score(score in 2u16..=MAX_CHECKOUT) {
        if let Some(darts) = checkout_type(score).min_darts() {
            prop_assert!(score <= max_score_for_darts(darts),
                "{} cannot be thrown with {} darts", score, darts);
        }
    }
}

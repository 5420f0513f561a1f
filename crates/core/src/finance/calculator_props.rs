//! Property-based tests for FinancialCalculator.

use proptest::prelude::*;
use rust_decimal::Decimal;

use super::calculator::FinancialCalculator;
use super::error::FinanceError;

/// FOB values from 0.01 to 100,000,000.00.
fn fob_value() -> impl Strategy<Value = Decimal> {
    (1i64..10_000_000_000i64).prop_map(|cents| Decimal::new(cents, 2))
}

/// FOB values within a trillion of `Decimal::MAX`, plus the upper half of its range.
fn huge_fob_value() -> impl Strategy<Value = Decimal> {
    prop_oneof![
        (0u64..1_000_000_000_000u64).prop_map(|below| Decimal::MAX - Decimal::from(below)),
        (1u32..=100u32).prop_map(|pct| Decimal::MAX * Decimal::new(i64::from(pct), 2)),
    ]
}

/// Rates from 0.00 to 100.00 percent.
fn rate() -> impl Strategy<Value = Decimal> {
    (0i64..=10_000i64).prop_map(|bp| Decimal::new(bp, 2))
}

/// Strictly increasing, non-empty day-count sets.
fn terms() -> impl Strategy<Value = Vec<u32>> {
    prop::collection::btree_set(1u32..=360, 1..8).prop_map(|set| set.into_iter().collect())
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    /// down_payment + financed_amount == fob_value for every valid input.
    #[test]
    fn prop_down_payment_and_financed_sum_to_fob(
        fob in fob_value(),
        dp in rate(),
        fee in rate(),
        terms in terms(),
    ) {
        let result = FinancialCalculator::default().calculate(fob, dp, fee, &terms).unwrap();
        prop_assert_eq!(result.down_payment + result.financed_amount, fob);
    }

    /// The admin fee is computed from the financed amount, never the FOB value.
    #[test]
    fn prop_admin_fee_levied_on_financed_amount(
        fob in fob_value(),
        dp in rate(),
        fee in rate(),
        terms in terms(),
    ) {
        let result = FinancialCalculator::default().calculate(fob, dp, fee, &terms).unwrap();
        let expected = (result.financed_amount * fee / Decimal::ONE_HUNDRED)
            .round_dp_with_strategy(2, rust_decimal::RoundingStrategy::MidpointNearestEven);
        prop_assert_eq!(result.admin_fee, expected);
        prop_assert_eq!(result.total_cost, fob + result.admin_fee);
        prop_assert!(result.admin_fee <= result.financed_amount);
    }

    /// Installments times count stays within one rounding unit per installment.
    #[test]
    fn prop_installments_cover_financed_amount(
        fob in fob_value(),
        dp in rate(),
        terms in terms(),
    ) {
        let result = FinancialCalculator::default()
            .calculate(fob, dp, Decimal::ZERO, &terms)
            .unwrap();
        let count = Decimal::from(result.installment_count);
        let drift = (result.installment_amount * count - result.financed_amount).abs();
        prop_assert!(drift <= Decimal::new(1, 2) * count);
        prop_assert_eq!(result.installment_count as usize, terms.len());
    }

    /// Calculation never clamps: any non-positive FOB value is rejected.
    #[test]
    fn prop_non_positive_fob_rejected(
        cents in -10_000_000i64..=0,
        dp in rate(),
        terms in terms(),
    ) {
        let fob = Decimal::new(cents, 2);
        let result = FinancialCalculator::default().calculate(fob, dp, dp, &terms);
        prop_assert_eq!(result, Err(FinanceError::NonPositiveValue(fob)));
    }

    /// Rates above 100 are rejected rather than clamped.
    #[test]
    fn prop_rate_above_hundred_rejected(
        fob in fob_value(),
        excess in 1i64..100_000,
        terms in terms(),
    ) {
        let dp = Decimal::ONE_HUNDRED + Decimal::new(excess, 2);
        let result = FinancialCalculator::default().calculate(fob, dp, Decimal::ZERO, &terms);
        let is_rate_error = matches!(result, Err(FinanceError::RateOutOfRange { .. }));
        prop_assert!(is_rate_error);
    }

    /// Values at the top of the decimal range either compute exactly or are
    /// rejected; they never panic.
    #[test]
    fn prop_huge_fob_is_computed_or_rejected(
        fob in huge_fob_value(),
        dp in rate(),
        fee in rate(),
        terms in terms(),
    ) {
        match FinancialCalculator::default().calculate(fob, dp, fee, &terms) {
            Ok(result) => {
                prop_assert_eq!(result.down_payment + result.financed_amount, fob);
                prop_assert_eq!(result.total_cost, fob + result.admin_fee);
            }
            Err(err) => prop_assert_eq!(err, FinanceError::ValueTooLarge(fob)),
        }
    }
}

//! Property-based tests for installment splitting.

use proptest::prelude::*;
use rust_decimal::Decimal;

use super::allocation::split_evenly;

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    /// Shares always sum exactly to the total and differ by at most one cent.
    #[test]
    fn prop_shares_sum_to_total(cents in 0i64..10_000_000_000, count in 1usize..13) {
        let total = Decimal::new(cents, 2);
        let shares = split_evenly(total, count, 2);

        prop_assert_eq!(shares.len(), count);
        prop_assert_eq!(shares.iter().copied().sum::<Decimal>(), total);

        let max = shares.iter().copied().max().unwrap_or_default();
        let min = shares.iter().copied().min().unwrap_or_default();
        prop_assert!(max - min <= Decimal::new(1, 2));
        prop_assert!(shares.windows(2).all(|w| w[0] >= w[1]));
    }
}

//! Splitting a financed amount into installment rows.
//!
//! Uses the largest remainder method: every row gets the truncated share,
//! then the leftover units go one each to the earliest rows. The rows always
//! sum to the (rounded) total.

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};

/// Splits `total` into `count` shares at `decimal_places` precision.
///
/// Earlier shares are never smaller than later ones, and no two shares
/// differ by more than one unit of precision.
///
/// # Example
///
/// ```
/// use rust_decimal_macros::dec;
/// use tradeline_core::schedule::split_evenly;
///
/// assert_eq!(split_evenly(dec!(100), 3, 2), vec![dec!(33.34), dec!(33.33), dec!(33.33)]);
/// ```
#[must_use]
pub fn split_evenly(total: Decimal, count: usize, decimal_places: u32) -> Vec<Decimal> {
    if count == 0 {
        return Vec::new();
    }

    let total = total.round_dp_with_strategy(decimal_places, RoundingStrategy::MidpointNearestEven);
    if count == 1 {
        return vec![total];
    }

    let count_dec = Decimal::from(count);
    let unit = Decimal::new(1, decimal_places);

    let base = (total / count_dec).round_dp_with_strategy(decimal_places, RoundingStrategy::ToZero);
    let leftover_units = ((total - base * count_dec) / unit)
        .trunc()
        .to_usize()
        .unwrap_or(0);

    (0..count)
        .map(|i| if i < leftover_units { base + unit } else { base })
        .collect()
}

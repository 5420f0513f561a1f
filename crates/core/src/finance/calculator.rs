//! Financial calculator for import financing.
//!
//! ```text
//! down_payment    = fob_value * down_payment_rate / 100
//! financed_amount = fob_value - down_payment
//! admin_fee       = financed_amount * admin_fee_rate / 100
//! total_cost      = fob_value + admin_fee
//! installment     = financed_amount / len(terms)
//! ```
//!
//! The admin fee is levied on the financed amount only, never on the down
//! payment or the full FOB value.

use rust_decimal::{Decimal, RoundingStrategy};

use super::error::FinanceError;
use super::types::CostBreakdown;

/// Stateless calculator parameterised by currency precision.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FinancialCalculator {
    decimal_places: u32,
}

impl Default for FinancialCalculator {
    fn default() -> Self {
        Self::new(2)
    }
}

impl FinancialCalculator {
    /// Creates a calculator that rounds results to `decimal_places`.
    #[must_use]
    pub const fn new(decimal_places: u32) -> Self {
        Self { decimal_places }
    }

    /// Returns the precision results are rounded to.
    #[must_use]
    pub const fn decimal_places(&self) -> u32 {
        self.decimal_places
    }

    /// Computes the cost breakdown of an import.
    ///
    /// `financed_amount` is derived from the rounded down payment so that
    /// `down_payment + financed_amount == fob_value` holds exactly.
    ///
    /// # Errors
    ///
    /// Returns `FinanceError` if the FOB value is not positive, a rate is
    /// outside 0..=100, or the terms are empty, contain zero, or are not
    /// strictly increasing. Values whose total cost does not fit a
    /// `Decimal` return `FinanceError::ValueTooLarge`.
    pub fn calculate(
        &self,
        fob_value: Decimal,
        down_payment_rate: Decimal,
        admin_fee_rate: Decimal,
        terms: &[u32],
    ) -> Result<CostBreakdown, FinanceError> {
        if fob_value <= Decimal::ZERO {
            return Err(FinanceError::NonPositiveValue(fob_value));
        }
        Self::validate_rate("down_payment_rate", down_payment_rate)?;
        Self::validate_rate("admin_fee_rate", admin_fee_rate)?;
        Self::validate_terms(terms)?;

        let too_large = || FinanceError::ValueTooLarge(fob_value);
        let down_payment = self.round(
            fob_value
                .checked_mul(down_payment_rate / Decimal::ONE_HUNDRED)
                .ok_or_else(too_large)?,
        );
        let financed_amount = fob_value.checked_sub(down_payment).ok_or_else(too_large)?;
        let admin_fee = self.round(
            financed_amount
                .checked_mul(admin_fee_rate / Decimal::ONE_HUNDRED)
                .ok_or_else(too_large)?,
        );
        let total_cost = fob_value.checked_add(admin_fee).ok_or_else(too_large)?;

        let installment_count = u32::try_from(terms.len()).unwrap_or(u32::MAX);
        let installment_amount = if financed_amount.is_zero() {
            Decimal::ZERO
        } else {
            self.round(financed_amount / Decimal::from(installment_count))
        };

        Ok(CostBreakdown {
            fob_value,
            down_payment_rate,
            admin_fee_rate,
            down_payment,
            financed_amount,
            admin_fee,
            total_cost,
            installment_count,
            installment_amount,
        })
    }

    /// Checks that a percentage rate lies within 0..=100.
    ///
    /// # Errors
    ///
    /// Returns `FinanceError::RateOutOfRange` naming `field`.
    pub fn validate_rate(field: &'static str, rate: Decimal) -> Result<(), FinanceError> {
        if rate < Decimal::ZERO || rate > Decimal::ONE_HUNDRED {
            return Err(FinanceError::RateOutOfRange { field, rate });
        }
        Ok(())
    }

    /// Checks that terms are a non-empty, strictly increasing set of positive day-counts.
    ///
    /// # Errors
    ///
    /// Returns the matching `FinanceError` variant for the first problem found.
    pub fn validate_terms(terms: &[u32]) -> Result<(), FinanceError> {
        if terms.is_empty() {
            return Err(FinanceError::EmptyTerms);
        }
        if let Some(&zero) = terms.iter().find(|&&t| t == 0) {
            return Err(FinanceError::NonPositiveTerm(zero));
        }
        if terms.windows(2).any(|w| w[0] >= w[1]) {
            return Err(FinanceError::UnorderedTerms(terms.to_vec()));
        }
        Ok(())
    }

    fn round(&self, value: Decimal) -> Decimal {
        value.round_dp_with_strategy(self.decimal_places, RoundingStrategy::MidpointNearestEven)
    }
}

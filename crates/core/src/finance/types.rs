//! Financing result types.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Cost breakdown of a single import.
///
/// Stored on the import as an immutable snapshot taken at creation time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CostBreakdown {
    /// Declared free-on-board value.
    pub fob_value: Decimal,
    /// Down payment rate applied, in percent.
    pub down_payment_rate: Decimal,
    /// Admin fee rate applied, in percent.
    pub admin_fee_rate: Decimal,
    /// Portion of the FOB value paid up front.
    pub down_payment: Decimal,
    /// Portion of the FOB value drawn against the credit limit.
    pub financed_amount: Decimal,
    /// Fee levied on the financed amount.
    pub admin_fee: Decimal,
    /// FOB value plus admin fee.
    pub total_cost: Decimal,
    /// Number of installments (one per term).
    pub installment_count: u32,
    /// Financed amount divided by the installment count.
    pub installment_amount: Decimal,
}

impl CostBreakdown {
    /// Amount the importer owes after the down payment, fee included.
    #[must_use]
    pub fn outstanding_after_down_payment(&self) -> Decimal {
        self.financed_amount + self.admin_fee
    }
}

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// How much of one band was consumed and the tax it attracted.
///
/// Lines align positionally with the prefix of the rate table's brackets that
/// taxable income actually reached.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BandLine {
    /// Band label derived from its marginal rate, e.g. "17.5%".
    pub label: String,
    /// Taxable income consumed by this band.
    pub taxed_amount: Decimal,
    /// Tax charged on `taxed_amount`.
    pub tax: Decimal,
}

/// Full breakdown of a single period's pay.
///
/// Ephemeral: recomputed on every input change, never cached.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaySlip {
    pub gross_income: Decimal,
    /// SSNIT-style contribution removed before the bands apply.
    pub mandatory_deduction: Decimal,
    pub taxable_income: Decimal,
    pub total_tax: Decimal,
    pub net_income: Decimal,
    pub bands: Vec<BandLine>,
}

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// One band of the graduated schedule.
///
/// `limit` is the *width* of taxable income the band covers, not a cumulative
/// threshold: bands are consumed sequentially in table order. The terminal
/// band carries `limit: None` and absorbs all remaining taxable income.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxBracket {
    /// Width of taxable income taxed at `rate`; `None` marks the unbounded
    /// top band.
    pub limit: Option<Decimal>,
    /// Marginal rate as a fraction (0.175 for 17.5%).
    pub rate: Decimal,
}

impl TaxBracket {
    pub fn bounded(limit: Decimal, rate: Decimal) -> Self {
        Self {
            limit: Some(limit),
            rate,
        }
    }

    pub fn unbounded(rate: Decimal) -> Self {
        Self { limit: None, rate }
    }

    /// Display label derived from the marginal rate, e.g. "17.5%".
    pub fn label(&self) -> String {
        format!("{}%", (self.rate * Decimal::ONE_HUNDRED).normalize())
    }
}

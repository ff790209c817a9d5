//! Pay-period normalization.
//!
//! The calculator only understands a single period's gross figure; an annual
//! entry is divided down to its monthly equivalent before it ever reaches the
//! band loop. Plain decimal division, no rounding.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

const MONTHS_PER_YEAR: Decimal = Decimal::from_parts(12, 0, 0, false, 0);

/// How the user entered their income.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Period {
    #[default]
    Monthly,
    Annual,
}

impl Period {
    /// Normalizes an as-entered figure to the monthly gross the calculator
    /// expects.
    pub fn monthly_gross(
        self,
        amount: Decimal,
    ) -> Decimal {
        match self {
            Period::Monthly => amount,
            Period::Annual => amount / MONTHS_PER_YEAR,
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            Period::Monthly => Period::Annual,
            Period::Annual => Period::Monthly,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Period::Monthly => "monthly",
            Period::Annual => "annual",
        }
    }
}

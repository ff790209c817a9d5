use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::models::TaxBracket;

/// Structural problems caught when a table is constructed.
///
/// Validation lives here, at construction time, so the calculator hot path
/// can trust any table it is handed.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RateTableError {
    #[error("rate table has no brackets")]
    NoBrackets,

    #[error("last bracket must be unbounded (limit = null)")]
    BoundedTopBracket,

    #[error("bracket {index} has rate {rate} outside [0, 1]")]
    RateOutOfRange { index: usize, rate: Decimal },

    #[error("bracket {index} has negative width {limit}")]
    NegativeWidth { index: usize, limit: Decimal },

    #[error("mandatory contribution rate {0} outside [0, 1]")]
    MandatoryRateOutOfRange(Decimal),
}

/// The in-effect tax regime: mandatory contribution rate plus the ordered
/// graduated schedule.
///
/// Immutable once built; holders replace it wholesale on refresh rather than
/// mutating in place. Bracket *order* is trusted as authored — only structural
/// shape is checked.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RateTable {
    /// Employee SSNIT contribution rate, deducted before the bands apply.
    pub mandatory_rate: Decimal,
    /// Graduated bands, consumed in order. Never empty; last is unbounded.
    pub brackets: Vec<TaxBracket>,
    /// Human-readable label for the tax year in effect, e.g. "2023".
    pub period_label: String,
    /// Where the table came from; `None` for the built-in default.
    pub provenance: Option<String>,
}

impl RateTable {
    /// Builds a table, rejecting structurally malformed input.
    pub fn new(
        mandatory_rate: Decimal,
        brackets: Vec<TaxBracket>,
        period_label: impl Into<String>,
        provenance: Option<String>,
    ) -> Result<Self, RateTableError> {
        if !(Decimal::ZERO..=Decimal::ONE).contains(&mandatory_rate) {
            return Err(RateTableError::MandatoryRateOutOfRange(mandatory_rate));
        }
        let Some(last) = brackets.last() else {
            return Err(RateTableError::NoBrackets);
        };
        if last.limit.is_some() {
            return Err(RateTableError::BoundedTopBracket);
        }
        for (index, bracket) in brackets.iter().enumerate() {
            if !(Decimal::ZERO..=Decimal::ONE).contains(&bracket.rate) {
                return Err(RateTableError::RateOutOfRange {
                    index,
                    rate: bracket.rate,
                });
            }
            if let Some(limit) = bracket.limit
                && limit < Decimal::ZERO
            {
                return Err(RateTableError::NegativeWidth { index, limit });
            }
        }
        Ok(Self {
            mandatory_rate,
            brackets,
            period_label: period_label.into(),
            provenance,
        })
    }

    /// Employee SSNIT contribution rate used when a fetched table omits one.
    pub fn default_mandatory_rate() -> Decimal {
        // 5.5%
        Decimal::new(55, 3)
    }

    /// The built-in fallback: Ghana monthly PAYE schedule, 2023 revision.
    ///
    /// Used whenever no live table is available. Carries no provenance so a
    /// fetched table is always distinguishable from the default.
    pub fn ghana_default() -> Self {
        Self {
            mandatory_rate: Self::default_mandatory_rate(),
            brackets: vec![
                TaxBracket::bounded(Decimal::from(490), Decimal::ZERO),
                TaxBracket::bounded(Decimal::from(110), Decimal::new(5, 2)),
                TaxBracket::bounded(Decimal::from(130), Decimal::new(10, 2)),
                TaxBracket::bounded(Decimal::from(3160), Decimal::new(175, 3)),
                TaxBracket::bounded(Decimal::from(16110), Decimal::new(25, 2)),
                TaxBracket::bounded(Decimal::from(45000), Decimal::new(30, 2)),
                TaxBracket::unbounded(Decimal::new(35, 2)),
            ],
            period_label: "2023".to_string(),
            provenance: None,
        }
    }
}

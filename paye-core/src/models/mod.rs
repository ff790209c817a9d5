mod pay_slip;
mod rate_table;
mod tax_bracket;

pub use pay_slip::{BandLine, PaySlip};
pub use rate_table::{RateTable, RateTableError};
pub use tax_bracket::TaxBracket;

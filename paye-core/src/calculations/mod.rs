//! Graduated PAYE calculation.
//!
//! The calculator is a pure function over a gross figure and a rate table;
//! everything it needs to trust about the table is checked when the table is
//! constructed, not here.

pub mod common;
pub mod net_pay;

pub use net_pay::NetPayCalculator;

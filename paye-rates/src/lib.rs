//! Rate-table discovery with a mandatory fallback.
//!
//! This crate is the system's only I/O boundary. A [`RateSource`] produces a
//! [`paye_core::RateTable`] or fails; [`RateTableProvider`] wraps a source so
//! that failure can never reach the caller — every failure mode degrades to
//! the built-in Ghana table.

pub mod ai_search;
pub mod provider;
pub mod source;

pub use ai_search::AiSearchSource;
pub use provider::RateTableProvider;
pub use source::{RateSource, RateSourceError};

use async_trait::async_trait;
use thiserror::Error;

use paye_core::models::{RateTable, RateTableError};

/// Why a live fetch produced no usable table.
///
/// None of these ever reach the presentation layer; the provider converts
/// every variant into the fallback table.
#[derive(Debug, Error)]
pub enum RateSourceError {
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("service returned status {0}")]
    Status(reqwest::StatusCode),

    #[error("malformed response: {0}")]
    MalformedResponse(String),

    #[error("fetched table failed structural validation: {0}")]
    InvalidTable(#[from] RateTableError),
}

/// A pluggable origin for the current rate table.
///
/// One method, one job: produce a table or fail. Fallback policy lives in the
/// provider wrapping the source, not here.
#[async_trait]
pub trait RateSource: Send + Sync {
    async fn fetch(&self) -> Result<RateTable, RateSourceError>;
}

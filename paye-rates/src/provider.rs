//! Fetch-with-fallback around any [`RateSource`].
//!
//! `fetch_current` is the one suspending call in the system and it cannot
//! fail: no configured source, a network error, a malformed reply, or a
//! structurally invalid table all degrade to the built-in Ghana table. The
//! caller always gets something it can compute with.

use tracing::{debug, info, warn};

use paye_core::models::RateTable;

use crate::ai_search::AiSearchSource;
use crate::source::RateSource;

pub struct RateTableProvider {
    source: Option<Box<dyn RateSource>>,
    fallback: RateTable,
}

impl RateTableProvider {
    /// Provider with whatever source the environment configures. Without a
    /// credential this is the same as [`RateTableProvider::offline`].
    pub fn from_env() -> Self {
        match AiSearchSource::from_env() {
            Some(source) => Self::with_source(Box::new(source)),
            None => {
                debug!("no rate service credential configured, using built-in table");
                Self::offline()
            }
        }
    }

    pub fn with_source(source: Box<dyn RateSource>) -> Self {
        Self {
            source: Some(source),
            fallback: RateTable::ghana_default(),
        }
    }

    /// Provider that always resolves to the built-in table.
    pub fn offline() -> Self {
        Self {
            source: None,
            fallback: RateTable::ghana_default(),
        }
    }

    /// Fetches the current table, falling back on any failure.
    ///
    /// Failures are logged for diagnostics and never propagated.
    pub async fn fetch_current(&self) -> RateTable {
        let Some(source) = &self.source else {
            return self.fallback.clone();
        };

        match source.fetch().await {
            Ok(table) => {
                info!(
                    year = %table.period_label,
                    brackets = table.brackets.len(),
                    "fetched live rate table",
                );
                table
            }
            Err(error) => {
                warn!(%error, "rate fetch failed, using built-in table");
                self.fallback.clone()
            }
        }
    }
}

//! Live rate discovery through an AI search service.
//!
//! One chat-completions request asks for the current Ghana mandatory
//! contribution rate and graduated monthly PAYE schedule as strict JSON:
//! `{ "ssnitRate": f, "year": "…", "brackets": [{"limit": n|null, "rate": f}] }`,
//! where a `null` limit marks the unbounded top band. The reply's brackets are
//! carried as sent — only the table's construction-time structural check
//! applies, and its failure is just one more reason to fall back.

use std::time::Duration;

use async_trait::async_trait;
use chrono::{Datelike, Utc};
use reqwest::Client;
use rust_decimal::Decimal;
use serde::Deserialize;
use serde_json::json;
use tracing::{debug, warn};

use paye_core::models::{RateTable, TaxBracket};

use crate::source::{RateSource, RateSourceError};

const API_URL: &str = "https://api.openai.com/v1/chat/completions";
const API_KEY_VAR: &str = "PAYE_RATES_API_KEY";
const MODEL: &str = "gpt-4o-mini";

/// Provenance tag set on every successfully fetched table.
pub const AI_SEARCH_PROVENANCE: &str = "ai-search";

/// One request, one answer; expiry counts as a fetch failure upstream.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(15);

/// Rate source backed by an AI search endpoint.
pub struct AiSearchSource {
    client: Client,
    api_key: String,
}

impl AiSearchSource {
    /// Builds the source from the environment, or `None` when no credential
    /// is configured. A missing key is not an error: it silently selects the
    /// fallback path.
    pub fn from_env() -> Option<Self> {
        dotenvy::dotenv().ok();
        let api_key = std::env::var(API_KEY_VAR)
            .ok()
            .filter(|key| !key.trim().is_empty())?;

        match Client::builder().timeout(REQUEST_TIMEOUT).build() {
            Ok(client) => Some(Self { client, api_key }),
            Err(error) => {
                warn!(%error, "could not build HTTP client, staying offline");
                None
            }
        }
    }
}

#[async_trait]
impl RateSource for AiSearchSource {
    async fn fetch(&self) -> Result<RateTable, RateSourceError> {
        let year = Utc::now().year();
        let body = json!({
            "model": MODEL,
            "messages": [{ "role": "user", "content": build_prompt(year) }],
            "response_format": { "type": "json_object" },
        });

        debug!(year, "requesting current PAYE rate table");
        let response = self
            .client
            .post(API_URL)
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(RateSourceError::Status(response.status()));
        }

        let chat: ChatResponse = response.json().await?;
        let content = chat
            .choices
            .into_iter()
            .next()
            .map(|choice| choice.message.content)
            .ok_or_else(|| RateSourceError::MalformedResponse("reply has no choices".into()))?;

        parse_reply(&content)
    }
}

fn build_prompt(year: i32) -> String {
    format!(
        "What are Ghana's current employee SSNIT contribution rate and the \
         graduated monthly PAYE income tax brackets for the {year} tax year? \
         Reply with JSON only, shaped exactly as \
         {{\"ssnitRate\": <fraction>, \"year\": \"<year>\", \
         \"brackets\": [{{\"limit\": <band width or null>, \"rate\": <fraction>}}]}}. \
         Each limit is the width of income the band covers, in cedis, and the \
         final bracket must have a null limit."
    )
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ChatMessage,
}

#[derive(Debug, Deserialize)]
struct ChatMessage {
    content: String,
}

/// The JSON shape the service is asked to produce.
#[derive(Debug, Deserialize)]
struct RateReply {
    #[serde(rename = "ssnitRate")]
    ssnit_rate: Option<Decimal>,
    year: Option<YearLabel>,
    brackets: Vec<TaxBracket>,
}

/// Models sometimes answer `"year": 2025` instead of `"2025"`.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum YearLabel {
    Number(i64),
    Text(String),
}

/// Turns the reply text into a table.
///
/// An absent or zero `ssnitRate` falls back to the default mandatory rate,
/// an absent `year` to the current calendar year; absent or non-sequence
/// `brackets` is a malformed response.
fn parse_reply(content: &str) -> Result<RateTable, RateSourceError> {
    let reply: RateReply = serde_json::from_str(strip_code_fence(content))
        .map_err(|e| RateSourceError::MalformedResponse(e.to_string()))?;

    let mandatory_rate = reply
        .ssnit_rate
        .filter(|rate| !rate.is_zero())
        .unwrap_or_else(RateTable::default_mandatory_rate);

    let period_label = match reply.year {
        Some(YearLabel::Number(year)) => year.to_string(),
        Some(YearLabel::Text(year)) => year,
        None => Utc::now().year().to_string(),
    };

    Ok(RateTable::new(
        mandatory_rate,
        reply.brackets,
        period_label,
        Some(AI_SEARCH_PROVENANCE.to_string()),
    )?)
}

/// Tolerates replies wrapped in a Markdown code fence despite the JSON-only
/// instruction.
fn strip_code_fence(content: &str) -> &str {
    let trimmed = content.trim();
    let Some(rest) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    let rest = rest.strip_prefix("json").unwrap_or(rest);
    rest.strip_suffix("```").unwrap_or(rest).trim()
}

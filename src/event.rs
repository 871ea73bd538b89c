//! The event record: the only entity this service stores.
//!
//! Every tracking call produces one [`TrackEvent`] with all twelve fields
//! populated: absent or null payload fields are substituted with defaults at
//! write time, so each stored line is self-contained.

use std::fmt;

use chrono::{DateTime, FixedOffset, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

/// Wall clock abstraction so timestamp defaulting can be faked in tests.
pub trait Clock: Send + Sync + fmt::Debug {
    /// Current time as ISO-8601 with millisecond precision, UTC (`Z` suffix).
    fn now_iso8601(&self) -> String;
}

/// System wall clock.
#[derive(Debug, Clone, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_iso8601(&self) -> String {
        Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)
    }
}

/// A field that is either a JSON number or the empty-string placeholder.
///
/// The quiz client sends `step_index`, `score`, `score_pct` and `elapsed_ms`
/// as numbers when it has them; stored records carry `""` otherwise, so every
/// line has all twelve columns. Round-trips exactly: a number stays a number,
/// `""` stays a string.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum NumberOrEmpty {
    Number(serde_json::Number),
    Text(String),
}

impl Default for NumberOrEmpty {
    fn default() -> Self {
        Self::Text(String::new())
    }
}

impl NumberOrEmpty {
    /// Text form used by the CSV report.
    pub fn as_text(&self) -> String {
        match self {
            Self::Number(n) => n.to_string(),
            Self::Text(s) => s.clone(),
        }
    }
}

/// One tracking event, serialized as one line of the store.
///
/// Field order here is the column order of the CSV report and the key order
/// of every stored line.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrackEvent {
    #[serde(default)]
    pub ts: String,
    #[serde(default)]
    pub lead_id: String,
    #[serde(default)]
    pub event: String,
    #[serde(default)]
    pub step_index: NumberOrEmpty,
    #[serde(default)]
    pub question: String,
    #[serde(default)]
    pub choice: String,
    #[serde(default)]
    pub score: NumberOrEmpty,
    #[serde(default)]
    pub score_pct: NumberOrEmpty,
    #[serde(default)]
    pub score_tag: String,
    #[serde(default)]
    pub elapsed_ms: NumberOrEmpty,
    #[serde(default)]
    pub href: String,
    #[serde(default)]
    pub ua: String,
}

/// Incoming body of `POST /track`. Every field is optional; absent and
/// explicit `null` are treated the same. Unknown fields are ignored.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TrackPayload {
    pub ts: Option<String>,
    pub lead_id: Option<String>,
    pub event: Option<String>,
    pub step_index: Option<NumberOrEmpty>,
    pub question: Option<String>,
    pub choice: Option<String>,
    pub score: Option<NumberOrEmpty>,
    pub score_pct: Option<NumberOrEmpty>,
    pub score_tag: Option<String>,
    pub elapsed_ms: Option<NumberOrEmpty>,
    pub href: Option<String>,
    pub ua: Option<String>,
}

impl TrackEvent {
    /// Build a record from a request payload, applying the column defaults.
    ///
    /// `ua_header` is the request's `User-Agent`, used when the payload does
    /// not carry its own `ua`. `ts` defaults to the clock's current time.
    pub fn from_payload(payload: TrackPayload, ua_header: Option<&str>, clock: &dyn Clock) -> Self {
        Self {
            ts: payload.ts.unwrap_or_else(|| clock.now_iso8601()),
            lead_id: payload.lead_id.unwrap_or_default(),
            event: payload.event.unwrap_or_default(),
            step_index: payload.step_index.unwrap_or_default(),
            question: payload.question.unwrap_or_default(),
            choice: payload.choice.unwrap_or_default(),
            score: payload.score.unwrap_or_default(),
            score_pct: payload.score_pct.unwrap_or_default(),
            score_tag: payload.score_tag.unwrap_or_default(),
            elapsed_ms: payload.elapsed_ms.unwrap_or_default(),
            href: payload.href.unwrap_or_default(),
            ua: payload.ua.or_else(|| ua_header.map(str::to_owned)).unwrap_or_default(),
        }
    }

    /// Parse `ts` for ordering; `None` when it is not RFC 3339.
    pub fn parsed_ts(&self) -> Option<DateTime<FixedOffset>> {
        DateTime::parse_from_rfc3339(&self.ts).ok()
    }
}

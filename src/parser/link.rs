use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// A candidate event page discovered by a search task, tagged with the
/// interest that produced it. The URL is the identity key: after aggregation
/// every URL appears at most once.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LinkCandidate {
    pub url: String,

    #[serde(default)]
    pub title: String,

    #[serde(default)]
    pub snippet: String,

    #[serde(default)]
    pub platform: String,

    /// Which query interest surfaced this link.
    pub interest: String,

    /// Event date as reported by the provider, if any.
    #[serde(default)]
    pub event_date: Option<NaiveDate>,

    /// Resolved target date: the provider date, or the query start date.
    pub date: NaiveDate,

    pub discovered_at: DateTime<Utc>,
}

/// A link that was analyzed but did not yield a usable event.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RejectedLink {
    #[serde(default)]
    pub url: String,

    #[serde(default)]
    pub reason: String,
}

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

/// Far-future placeholder so events without a start time sort last instead of
/// breaking the comparison.
pub const SENTINEL_START_TIME: &str = "2099-01-01T00:00:00";

/// One event as reported by the analysis stage. Every field except `name`
/// tolerates being absent in the provider payload; downstream code treats
/// missing or malformed times as "unknown", never as an error.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EventRecord {
    #[serde(default)]
    pub name: String,

    #[serde(default)]
    pub category: String,

    #[serde(default)]
    pub location: Location,

    #[serde(default)]
    pub coordinates: Option<Coordinates>,

    /// ISO 8601 text as the provider emitted it; may be absent or malformed.
    #[serde(default)]
    pub start_time: Option<String>,

    #[serde(default)]
    pub end_time: Option<String>,

    #[serde(default)]
    pub duration_minutes: Option<i64>,

    #[serde(default)]
    pub description: String,

    #[serde(default)]
    pub source: Source,

    #[serde(default)]
    pub pricing: Pricing,

    #[serde(default)]
    pub tags: Vec<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Location {
    #[serde(default)]
    pub venue: String,

    #[serde(default)]
    pub address: String,

    #[serde(default)]
    pub city: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Coordinates {
    pub lat: f64,
    pub lng: f64,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Source {
    #[serde(default)]
    pub platform: String,

    #[serde(default)]
    pub url: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Pricing {
    #[serde(default)]
    pub is_free: bool,

    #[serde(default)]
    pub price: String,

    #[serde(default)]
    pub currency: String,
}

impl EventRecord {
    /// Composite identity for final deduplication: name + start_time.
    pub fn dedup_key(&self) -> String {
        format!("{}|{}", self.name, self.start_time.as_deref().unwrap_or(""))
    }

    /// Parsed start time, or None when absent or malformed.
    pub fn start_datetime(&self) -> Option<NaiveDateTime> {
        self.start_time.as_deref().and_then(parse_iso_datetime)
    }

    /// Chronological sort key; missing and unparsable times get the sentinel.
    pub fn sort_key(&self) -> NaiveDateTime {
        self.start_datetime().unwrap_or_else(sentinel_start)
    }

    /// Calendar date of the start time, used for coverage bucketing.
    pub fn start_date(&self) -> Option<NaiveDate> {
        self.start_datetime().map(|dt| dt.date())
    }

    /// Hour of day (0-23) of the start time, used for slot coverage.
    pub fn start_hour(&self) -> Option<u32> {
        use chrono::Timelike;
        self.start_datetime().map(|dt| dt.hour())
    }

    /// Stable short fingerprint for the run artifacts: name | start | url.
    pub fn fingerprint(&self) -> String {
        let input = format!(
            "{}|{}|{}",
            self.name,
            self.start_time.as_deref().unwrap_or(""),
            self.source.url,
        );
        let hash = Sha256::digest(input.as_bytes());
        format!("{:x}", hash)[..12].to_string()
    }
}

fn sentinel_start() -> NaiveDateTime {
    parse_iso_datetime(SENTINEL_START_TIME).unwrap_or(NaiveDateTime::MAX)
}

/// Lenient ISO 8601 parse: RFC 3339 with offset, then naive date-times with
/// and without seconds.
fn parse_iso_datetime(value: &str) -> Option<NaiveDateTime> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Some(dt.naive_local());
    }
    NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S")
        .ok()
        .or_else(|| NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M").ok())
}

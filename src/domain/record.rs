//! The persisted notification record.
//!
//! A single record holds the time of the last delivered notification.
//! Before anything has been sent it holds the sentinel [`never`] value.

use chrono::{DateTime, Local, NaiveDateTime, SecondsFormat, TimeZone, Utc};
use serde::{Deserialize, Serialize};

/// Seconds from the Unix epoch back to `0001-01-01T00:00:00Z`.
const NEVER_UNIX_SECS: i64 = -62_135_596_800;

/// Timestamp formats accepted for records written without an offset.
const NAIVE_FORMATS: &[&str] = &["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"];

/// The "never notified" sentinel: the earliest timestamp expressible in
/// plain ISO-8601, `0001-01-01T00:00:00Z`.
#[must_use]
pub fn never() -> DateTime<Utc> {
    DateTime::from_timestamp(NEVER_UNIX_SECS, 0).unwrap_or(DateTime::<Utc>::MIN_UTC)
}

/// Durable record of the last successful notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct NotificationRecord {
    #[serde(with = "iso8601")]
    last_notification: DateTime<Utc>,
}

impl NotificationRecord {
    /// A record for a system that has never notified.
    #[must_use]
    pub fn never() -> Self {
        Self {
            last_notification: never(),
        }
    }

    /// A record of a notification delivered at `at`.
    #[must_use]
    pub const fn notified_at(at: DateTime<Utc>) -> Self {
        Self {
            last_notification: at,
        }
    }

    #[must_use]
    pub const fn last_notification(&self) -> DateTime<Utc> {
        self.last_notification
    }

    /// True while the record still holds the sentinel.
    #[must_use]
    pub fn is_never(&self) -> bool {
        self.last_notification == never()
    }
}

impl Default for NotificationRecord {
    fn default() -> Self {
        Self::never()
    }
}

/// Format a timestamp the way records store it.
#[must_use]
pub fn format_timestamp(at: DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::AutoSi, true)
}

/// Parse a stored timestamp.
///
/// RFC 3339 values keep their offset. Values without an offset are read in
/// the host's local zone, except the bare sentinel `0001-01-01T00:00:00`,
/// which always maps to [`never`].
pub fn parse_timestamp(raw: &str) -> Result<DateTime<Utc>, String> {
    let raw = raw.trim();
    if let Ok(at) = DateTime::parse_from_rfc3339(raw) {
        return Ok(at.with_timezone(&Utc));
    }

    let naive = NAIVE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
        .ok_or_else(|| format!("unrecognized timestamp '{raw}'"))?;

    if naive == never().naive_utc() {
        return Ok(never());
    }

    Ok(Local
        .from_local_datetime(&naive)
        .earliest()
        .map_or_else(|| naive.and_utc(), |local| local.with_timezone(&Utc)))
}

mod iso8601 {
    use chrono::{DateTime, Utc};
    use serde::{de, Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(at: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&super::format_timestamp(*at))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<DateTime<Utc>, D::Error> {
        let raw = String::deserialize(deserializer)?;
        super::parse_timestamp(&raw).map_err(de::Error::custom)
    }
}

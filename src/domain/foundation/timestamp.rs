//! Timestamp value object for immutable points in time.

use std::fmt;

use chrono::{DateTime, SecondsFormat, TimeZone, Utc};
use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer, Serialize};

/// Epoch values at or above this are read as milliseconds.
///
/// As seconds it lies in the year 5138; as milliseconds, in 1973.
const MILLIS_THRESHOLD: i64 = 100_000_000_000;

/// Immutable point in time, always UTC.
///
/// Serializes as an RFC 3339 string, which is what membership records
/// carry in `lastUpdated` and `currentPeriodEnd`. Deserializes from that
/// string or from a Unix epoch number, since records written by the site's
/// checkout scripts store `currentPeriodEnd` in seconds and `updatedAt` in
/// milliseconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct Timestamp(DateTime<Utc>);

impl Timestamp {
    /// Creates a timestamp for the current moment.
    pub fn now() -> Self {
        Self(Utc::now())
    }

    /// Creates a timestamp from Unix seconds, as payment providers send them.
    ///
    /// Returns `None` for values chrono cannot represent.
    pub fn from_unix_secs(secs: i64) -> Option<Self> {
        Utc.timestamp_opt(secs, 0).single().map(Self)
    }

    /// Reads an epoch number as seconds or milliseconds by magnitude.
    pub fn from_unix_epoch(value: i64) -> Option<Self> {
        if value.abs() >= MILLIS_THRESHOLD {
            Utc.timestamp_millis_opt(value).single().map(Self)
        } else {
            Self::from_unix_secs(value)
        }
    }

    /// RFC 3339 rendering with second precision and a `Z` suffix.
    pub fn to_rfc3339(&self) -> String {
        self.0.to_rfc3339_opts(SecondsFormat::Secs, true)
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_rfc3339())
    }
}

impl<'de> Deserialize<'de> for Timestamp {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(TimestampVisitor)
    }
}

struct TimestampVisitor;

impl<'de> Visitor<'de> for TimestampVisitor {
    type Value = Timestamp;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("an RFC 3339 string or a Unix epoch number")
    }

    fn visit_str<E: de::Error>(self, value: &str) -> Result<Timestamp, E> {
        DateTime::parse_from_rfc3339(value)
            .map(|dt| Timestamp(dt.with_timezone(&Utc)))
            .map_err(|e| E::custom(format!("invalid timestamp {value:?}: {e}")))
    }

    fn visit_i64<E: de::Error>(self, value: i64) -> Result<Timestamp, E> {
        Timestamp::from_unix_epoch(value)
            .ok_or_else(|| E::custom(format!("epoch value {value} out of range")))
    }

    fn visit_u64<E: de::Error>(self, value: u64) -> Result<Timestamp, E> {
        let value = i64::try_from(value)
            .map_err(|_| E::custom(format!("epoch value {value} out of range")))?;
        self.visit_i64(value)
    }

    fn visit_f64<E: de::Error>(self, value: f64) -> Result<Timestamp, E> {
        if !value.is_finite() {
            return Err(E::custom("epoch value is not finite"));
        }
        self.visit_i64(value.trunc() as i64)
    }
}

//! Canonical timestamp representation.
//!
//! Persisted records store timestamps as text while in-memory records work
//! with native instants. [`Timestamp`] keeps that split out of the type
//! system: the only in-memory representation is a UTC instant, and the
//! RFC 3339 text form exists in exactly one place, the serde boundary.

use crate::error::{Error, Result};
use chrono::{DateTime, SecondsFormat, Utc};
use serde::{de, Deserialize, Deserializer, Serialize, Serializer};

/// A UTC instant.
///
/// Encodes as RFC 3339 with millisecond precision and a `Z` suffix, e.g.
/// `2026-03-01T09:15:42.000Z`. Instants are truncated to millisecond
/// precision on construction, the precision of the text form, so encoding
/// never loses information. Inputs carrying a non-UTC offset are
/// normalized to UTC on decode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Timestamp(DateTime<Utc>);

/// Drop sub-millisecond precision the text form cannot carry.
fn truncate_to_millis(instant: DateTime<Utc>) -> DateTime<Utc> {
    DateTime::<Utc>::from_timestamp_millis(instant.timestamp_millis()).unwrap_or(instant)
}

impl Timestamp {
    /// Current instant.
    pub fn now() -> Self {
        Self(truncate_to_millis(Utc::now()))
    }

    /// Wrap an existing UTC instant.
    pub fn from_utc(instant: DateTime<Utc>) -> Self {
        Self(truncate_to_millis(instant))
    }

    /// The underlying instant.
    pub fn as_utc(&self) -> DateTime<Utc> {
        self.0
    }

    /// Decode from the persisted text form.
    pub fn parse(text: &str) -> Result<Self> {
        DateTime::parse_from_rfc3339(text)
            .map(|instant| Self(truncate_to_millis(instant.with_timezone(&Utc))))
            .map_err(|e| Error::InvalidTimestamp(format!("{text}: {e}")))
    }

    /// Encode to the persisted text form.
    pub fn encode(&self) -> String {
        self.0.to_rfc3339_opts(SecondsFormat::Millis, true)
    }
}

impl From<DateTime<Utc>> for Timestamp {
    fn from(instant: DateTime<Utc>) -> Self {
        Self::from_utc(instant)
    }
}

impl std::fmt::Display for Timestamp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.encode())
    }
}

impl std::str::FromStr for Timestamp {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl Serialize for Timestamp {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.encode())
    }
}

impl<'de> Deserialize<'de> for Timestamp {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let text = String::deserialize(deserializer)?;
        Timestamp::parse(&text).map_err(de::Error::custom)
    }
}

use std::fmt;
use std::hash::{Hash, Hasher};
use std::str::FromStr;
use std::sync::LazyLock;

use chrono::{DateTime, FixedOffset, SecondsFormat, Utc};
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::TypeError;

/// Layout accepted before chrono checks the calendar: upper-case `T` and
/// `Z`, seconds `00`-`59`, optional fraction, `Z` or `±hh:mm`.
static RFC3339_LAYOUT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[0-9]{4}-[0-9]{2}-[0-9]{2}T[0-9]{2}:[0-9]{2}:[0-5][0-9](\.[0-9]+)?(Z|[+-][0-9]{2}:[0-9]{2})$")
        .expect("timestamp layout compiles")
});

/// An RFC3339 instant.
///
/// The original text is preserved verbatim so a record written by one
/// client reads back byte-for-byte identical; equality and hashing use that
/// text, not the instant it denotes.
#[derive(Clone, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Timestamp {
    raw: String,
    instant: DateTime<FixedOffset>,
}

impl Timestamp {
    pub fn parse(s: &str) -> Result<Self, TypeError> {
        if !RFC3339_LAYOUT.is_match(s) {
            return Err(TypeError::InvalidTimestamp {
                value: s.to_string(),
                reason: "not in RFC 3339 layout".into(),
            });
        }
        let instant =
            DateTime::parse_from_rfc3339(s).map_err(|e| TypeError::InvalidTimestamp {
                value: s.to_string(),
                reason: e.to_string(),
            })?;
        Ok(Self {
            raw: s.to_string(),
            instant,
        })
    }

    /// Current UTC time at second precision, e.g. `2023-11-28T12:00:00Z`.
    pub fn now() -> Self {
        Self::from_utc(Utc::now())
    }

    pub fn from_utc(at: DateTime<Utc>) -> Self {
        let raw = at.to_rfc3339_opts(SecondsFormat::Secs, true);
        Self {
            instant: at.fixed_offset(),
            raw,
        }
    }

    pub fn as_str(&self) -> &str {
        &self.raw
    }

    pub fn instant(&self) -> DateTime<FixedOffset> {
        self.instant
    }
}

impl PartialEq for Timestamp {
    fn eq(&self, other: &Self) -> bool {
        self.raw == other.raw
    }
}

impl Eq for Timestamp {}

impl Hash for Timestamp {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.raw.hash(state);
    }
}

impl FromStr for Timestamp {
    type Err = TypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for Timestamp {
    type Error = TypeError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<Timestamp> for String {
    fn from(ts: Timestamp) -> Self {
        ts.raw
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

impl fmt::Debug for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Timestamp({})", self.raw)
    }
}

/// A time as read back from the ledger.
///
/// Older state holds distribution times that were never validated, so
/// decoding keeps any text that does not parse instead of rejecting the
/// record. New writes always carry a [`Timestamp`].
#[derive(Clone, PartialEq, Eq, Hash)]
pub enum StoredTime {
    Parsed(Timestamp),
    Unparsed(String),
}

impl StoredTime {
    /// Parse `s`, keeping it verbatim if it is not RFC 3339.
    pub fn from_stored(s: &str) -> Self {
        match Timestamp::parse(s) {
            Ok(ts) => Self::Parsed(ts),
            Err(_) => Self::Unparsed(s.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Self::Parsed(ts) => ts.as_str(),
            Self::Unparsed(raw) => raw,
        }
    }

    pub fn timestamp(&self) -> Option<&Timestamp> {
        match self {
            Self::Parsed(ts) => Some(ts),
            Self::Unparsed(_) => None,
        }
    }
}

impl From<Timestamp> for StoredTime {
    fn from(ts: Timestamp) -> Self {
        Self::Parsed(ts)
    }
}

impl fmt::Display for StoredTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Debug for StoredTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Parsed(ts) => write!(f, "{ts:?}"),
            Self::Unparsed(raw) => write!(f, "Unparsed({raw:?})"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn accepts_rfc3339() {
        for ok in [
            "2023-11-28T12:00:00Z",
            "2023-11-28T12:00:00+07:00",
            "2023-12-01T09:00:00.250Z",
        ] {
            let ts = Timestamp::parse(ok).unwrap();
            assert_eq!(ts.as_str(), ok);
        }
    }

    #[test]
    fn rejects_non_rfc3339() {
        for bad in [
            "",
            "2023-11-28",
            "2023-11-28T12:00:00",
            "28/11/2023 12:00",
            "2023-13-01T00:00:00Z",
            "yesterday",
            "2023-11-28 12:00:00Z",
            "2023-11-28t12:00:00Z",
            "2023-11-28T12:00:00z",
            "2023-12-31T23:59:60Z",
            "2023-11-28T12:00:00+0700",
            "2023-11-28T12:00:00.Z",
        ] {
            assert!(Timestamp::parse(bad).is_err(), "accepted {bad:?}");
        }
    }

    #[test]
    fn from_utc_uses_second_precision_and_z() {
        let at = Utc.with_ymd_and_hms(2023, 11, 28, 12, 0, 0).unwrap();
        let ts = Timestamp::from_utc(at);
        assert_eq!(ts.as_str(), "2023-11-28T12:00:00Z");
        assert_eq!(ts.instant(), at.fixed_offset());
    }

    #[test]
    fn now_round_trips_through_parse() {
        let now = Timestamp::now();
        let reparsed = Timestamp::parse(now.as_str()).unwrap();
        assert_eq!(reparsed, now);
    }

    #[test]
    fn equality_is_textual() {
        let a = Timestamp::parse("2023-11-28T12:00:00Z").unwrap();
        let b = Timestamp::parse("2023-11-28T19:00:00+07:00").unwrap();
        assert_eq!(a.instant(), b.instant());
        assert_ne!(a, b);
    }

    #[test]
    fn stored_time_keeps_unparseable_text() {
        let legacy = StoredTime::from_stored("");
        assert_eq!(legacy, StoredTime::Unparsed(String::new()));
        assert!(legacy.timestamp().is_none());

        let odd = StoredTime::from_stored("1 Desember 2023");
        assert_eq!(odd.as_str(), "1 Desember 2023");
        assert_eq!(odd.to_string(), "1 Desember 2023");

        let ok = StoredTime::from_stored("2023-12-01T09:00:00Z");
        assert_eq!(
            ok.timestamp().map(Timestamp::as_str),
            Some("2023-12-01T09:00:00Z")
        );
    }
}

use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::enums::{OrgCode, Organization};
use crate::error::TypeError;

/// `ZKT-YDSF-{MLG|JTM}-YYYYMM-NNNN`. Digits are ASCII only.
static RECORD_ID_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^ZKT-YDSF-(MLG|JTM)-([0-9]{6})-([0-9]{4})$").expect("record id pattern compiles")
});

/// Primary key of a zakat record, e.g. `ZKT-YDSF-MLG-202311-0001`.
///
/// A `RecordId` can only be obtained by parsing, so holding one proves the
/// text matched the identifier format. The components are kept alongside the
/// original text so callers can cross-check the organization code.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct RecordId {
    raw: String,
    code: OrgCode,
    sequence: u16,
}

impl RecordId {
    /// Parse and validate an identifier.
    pub fn parse(s: &str) -> Result<Self, TypeError> {
        let caps = RECORD_ID_PATTERN
            .captures(s)
            .ok_or_else(|| TypeError::InvalidRecordId(s.to_string()))?;
        let code = caps[1].parse::<OrgCode>()?;
        let sequence = caps[3]
            .parse::<u16>()
            .map_err(|_| TypeError::InvalidRecordId(s.to_string()))?;
        Ok(Self {
            raw: s.to_string(),
            code,
            sequence,
        })
    }

    /// The identifier text, also the store key.
    pub fn as_str(&self) -> &str {
        &self.raw
    }

    pub fn org_code(&self) -> OrgCode {
        self.code
    }

    /// The organization implied by the embedded code.
    pub fn organization(&self) -> Organization {
        self.code.organization()
    }

    /// The six-digit `YYYYMM` collection period.
    pub fn period(&self) -> &str {
        // "ZKT-YDSF-XXX-" is 13 bytes, all ASCII.
        &self.raw[13..19]
    }

    /// The four-digit sequence within the period.
    pub fn sequence(&self) -> u16 {
        self.sequence
    }
}

impl FromStr for RecordId {
    type Err = TypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for RecordId {
    type Error = TypeError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<RecordId> for String {
    fn from(id: RecordId) -> Self {
        id.raw
    }
}

impl AsRef<str> for RecordId {
    fn as_ref(&self) -> &str {
        &self.raw
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

impl fmt::Debug for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "RecordId({})", self.raw)
    }
}

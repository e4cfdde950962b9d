use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::TypeError;

/// Category of zakat being collected.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ZakatKind {
    /// Zakat al-fitr, paid at the end of Ramadan.
    Fitrah,
    /// Zakat on wealth.
    Maal,
}

impl ZakatKind {
    pub const ALL: [ZakatKind; 2] = [ZakatKind::Fitrah, ZakatKind::Maal];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Fitrah => "fitrah",
            Self::Maal => "maal",
        }
    }
}

impl FromStr for ZakatKind {
    type Err = TypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "fitrah" => Ok(Self::Fitrah),
            "maal" => Ok(Self::Maal),
            other => Err(TypeError::InvalidKind(other.to_string())),
        }
    }
}

impl fmt::Display for ZakatKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Short organization code embedded in a record id.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum OrgCode {
    #[serde(rename = "MLG")]
    Mlg,
    #[serde(rename = "JTM")]
    Jtm,
}

impl OrgCode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Mlg => "MLG",
            Self::Jtm => "JTM",
        }
    }

    /// The collecting organization this code stands for.
    pub fn organization(&self) -> Organization {
        match self {
            Self::Mlg => Organization::YdsfMalang,
            Self::Jtm => Organization::YdsfJatim,
        }
    }
}

impl FromStr for OrgCode {
    type Err = TypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "MLG" => Ok(Self::Mlg),
            "JTM" => Ok(Self::Jtm),
            other => Err(TypeError::InvalidOrgCode(other.to_string())),
        }
    }
}

impl fmt::Display for OrgCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Organizations authorized to collect and distribute.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Organization {
    #[serde(rename = "YDSF Malang")]
    YdsfMalang,
    #[serde(rename = "YDSF Jatim")]
    YdsfJatim,
}

impl Organization {
    pub const ALL: [Organization; 2] = [Organization::YdsfMalang, Organization::YdsfJatim];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::YdsfMalang => "YDSF Malang",
            Self::YdsfJatim => "YDSF Jatim",
        }
    }

    pub fn code(&self) -> OrgCode {
        match self {
            Self::YdsfMalang => OrgCode::Mlg,
            Self::YdsfJatim => OrgCode::Jtm,
        }
    }
}

impl FromStr for Organization {
    type Err = TypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "YDSF Malang" => Ok(Self::YdsfMalang),
            "YDSF Jatim" => Ok(Self::YdsfJatim),
            other => Err(TypeError::InvalidOrganization(other.to_string())),
        }
    }
}

impl fmt::Display for Organization {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Persisted lifecycle status. Only moves `Collected` → `Distributed`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    Collected,
    Distributed,
}

impl Status {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Collected => "collected",
            Self::Distributed => "distributed",
        }
    }
}

impl FromStr for Status {
    type Err = TypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "collected" => Ok(Self::Collected),
            "distributed" => Ok(Self::Distributed),
            other => Err(TypeError::InvalidStatus(other.to_string())),
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

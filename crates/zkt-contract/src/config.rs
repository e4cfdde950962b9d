use serde::{Deserialize, Serialize};

/// How the contract protects read-modify-write against concurrent writers.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum WriteGuard {
    /// Use compare-and-put when the store supports it, otherwise rely on
    /// the store's own per-key transaction ordering.
    #[default]
    Auto,
    /// Require compare-and-put; writes fail against stores without it.
    CompareAndPut,
    /// Always issue plain puts and rely on the store's transaction ordering.
    StoreOrdering,
}

/// The fixed record written by `bootstrap`.
///
/// Fields are kept as raw strings so a misconfigured seed is caught by the
/// same validators as caller input.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SeedConfig {
    pub id: String,
    pub donor_name: String,
    pub amount: f64,
    pub kind: String,
    pub organization: String,
}

impl Default for SeedConfig {
    fn default() -> Self {
        Self {
            id: "ZKT-YDSF-MLG-202311-0001".into(),
            donor_name: "John Doe".into(),
            amount: 1_000_000.0,
            kind: "maal".into(),
            organization: "YDSF Malang".into(),
        }
    }
}

/// Configuration for a [`crate::ZakatContract`].
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ContractConfig {
    pub seed: SeedConfig,
    pub write_guard: WriteGuard,
}

impl ContractConfig {
    /// Parse a TOML document. Missing keys take their defaults.
    pub fn from_toml(text: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(text)
    }
}

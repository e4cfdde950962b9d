//! Persisted JSON shape of a zakat record.
//!
//! Field names and casing are fixed for compatibility with state already
//! written to the ledger: `ID`, `muzakki`, `amount`, `type`, `status`,
//! `organization`, `timestamp`, `mustahik`, `distribution`, `distributedAt`.
//! Every field is written on encode; the three distribution fields default
//! when absent on decode. A distributed record's `distributedAt` is kept
//! verbatim when it is not RFC3339.

use serde::{Deserialize, Serialize};

use crate::enums::{Organization, Status, ZakatKind};
use crate::error::TypeError;
use crate::id::RecordId;
use crate::record::{Distribution, Lifecycle, ZakatRecord};
use crate::temporal::{StoredTime, Timestamp};

/// Flat, string-typed record as stored.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ZakatWire {
    #[serde(rename = "ID")]
    pub id: String,
    pub muzakki: String,
    pub amount: f64,
    #[serde(rename = "type")]
    pub kind: String,
    pub status: String,
    pub organization: String,
    pub timestamp: String,
    #[serde(default)]
    pub mustahik: String,
    #[serde(default)]
    pub distribution: f64,
    #[serde(default, rename = "distributedAt")]
    pub distributed_at: String,
}

impl From<&ZakatRecord> for ZakatWire {
    fn from(record: &ZakatRecord) -> Self {
        Self {
            id: record.id.to_string(),
            muzakki: record.donor_name.clone(),
            amount: record.amount,
            kind: record.kind.as_str().to_string(),
            status: record.status().as_str().to_string(),
            organization: record.organization.as_str().to_string(),
            timestamp: record.collected_at.to_string(),
            mustahik: record.recipient_name().to_string(),
            distribution: record.distributed_amount(),
            distributed_at: record
                .distributed_at()
                .map(ToString::to_string)
                .unwrap_or_default(),
        }
    }
}

impl TryFrom<ZakatWire> for ZakatRecord {
    type Error = TypeError;

    fn try_from(wire: ZakatWire) -> Result<Self, Self::Error> {
        let id = RecordId::parse(&wire.id)?;
        let kind = wire.kind.parse::<ZakatKind>()?;
        let organization = wire.organization.parse::<Organization>()?;
        let status = wire.status.parse::<Status>()?;
        let collected_at = Timestamp::parse(&wire.timestamp)?;

        let lifecycle = match status {
            Status::Collected => {
                if !wire.mustahik.is_empty()
                    || wire.distribution != 0.0
                    || !wire.distributed_at.is_empty()
                {
                    return Err(TypeError::InconsistentRecord {
                        id: wire.id,
                        reason: "collected record carries distribution data".into(),
                    });
                }
                Lifecycle::Collected
            }
            Status::Distributed => Lifecycle::Distributed(Distribution {
                recipient_name: wire.mustahik,
                amount: wire.distribution,
                distributed_at: StoredTime::from_stored(&wire.distributed_at),
            }),
        };

        Ok(Self {
            id,
            donor_name: wire.muzakki,
            amount: wire.amount,
            kind,
            organization,
            collected_at,
            lifecycle,
        })
    }
}

/// Serialize a record to its stored JSON bytes.
pub fn encode_record(record: &ZakatRecord) -> Result<Vec<u8>, TypeError> {
    serde_json::to_vec(&ZakatWire::from(record)).map_err(|e| TypeError::Serialization(e.to_string()))
}

/// Parse stored JSON bytes into a record.
pub fn decode_record(bytes: &[u8]) -> Result<ZakatRecord, TypeError> {
    let wire: ZakatWire =
        serde_json::from_slice(bytes).map_err(|e| TypeError::Serialization(e.to_string()))?;
    ZakatRecord::try_from(wire)
}

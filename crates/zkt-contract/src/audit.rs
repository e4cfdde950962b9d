//! Ledger-wide audit: totals, pending distributions, integrity findings, and
//! a state digest.

use std::collections::BTreeMap;

use serde::Serialize;
use tracing::{debug, warn};
use zkt_store::KvStore;
use zkt_types::{decode_record, Organization, RecordId, ZakatKind, ZakatRecord};
use zkt_validate::validate_record;

use crate::contract::ZakatContract;
use crate::error::{ContractError, ContractResult};

const DIGEST_DOMAIN: &str = "zkt-state-v1";

/// Amounts and counts over a group of records.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize)]
pub struct Totals {
    pub records: u64,
    pub distributed_records: u64,
    pub collected: f64,
    pub distributed: f64,
}

impl Totals {
    fn add(&mut self, record: &ZakatRecord) {
        self.records += 1;
        self.collected += record.amount;
        if record.is_distributed() {
            self.distributed_records += 1;
            self.distributed += record.distributed_amount();
        }
    }

    /// Collected funds not yet handed out.
    pub fn undistributed(&self) -> f64 {
        self.collected - self.distributed
    }
}

/// A stored record that decodes but breaks a ledger rule.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Violation {
    pub key: String,
    pub kind: ViolationKind,
    pub description: String,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum ViolationKind {
    /// The record is stored under a key other than its own id.
    KeyMismatch,
    /// A field fails the checks applied at creation or distribution.
    InvalidField,
}

/// Result of [`ZakatContract::audit`].
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct AuditReport {
    pub totals: Totals,
    pub by_organization: BTreeMap<Organization, Totals>,
    pub by_kind: BTreeMap<ZakatKind, Totals>,
    /// Ids still in `collected`, in key order.
    pub pending: Vec<RecordId>,
    pub violations: Vec<Violation>,
    /// Hex BLAKE3 digest over every scanned key and value, in key order.
    pub state_digest: String,
}

impl AuditReport {
    /// Returns `true` if no violations were found.
    pub fn is_clean(&self) -> bool {
        self.violations.is_empty()
    }
}

impl<S: KvStore> ZakatContract<S> {
    /// Scan the whole ledger and summarize it.
    ///
    /// Decode and scan failures abort the audit, as they do for
    /// [`Self::list_all`]. Records that decode but break a rule are
    /// reported as violations instead.
    pub fn audit(&self) -> ContractResult<AuditReport> {
        let scan = self.store().scan("", "").map_err(ContractError::Scan)?;

        let mut hasher = blake3::Hasher::new();
        hasher.update(DIGEST_DOMAIN.as_bytes());
        hasher.update(b":");

        let mut totals = Totals::default();
        let mut by_organization: BTreeMap<Organization, Totals> = BTreeMap::new();
        let mut by_kind: BTreeMap<ZakatKind, Totals> = BTreeMap::new();
        let mut pending = Vec::new();
        let mut violations = Vec::new();

        for item in scan {
            let (key, value) = item.map_err(ContractError::Scan)?;
            hash_entry(&mut hasher, &key, &value);

            let record = decode_record(&value).map_err(|e| ContractError::Deserialization {
                key: key.clone(),
                reason: e.to_string(),
            })?;

            if record.id.as_str() != key {
                violations.push(Violation {
                    description: format!("stored under {key} but carries id {}", record.id),
                    key: key.clone(),
                    kind: ViolationKind::KeyMismatch,
                });
            }
            if let Err(e) = validate_record(&record) {
                violations.push(Violation {
                    key: key.clone(),
                    kind: ViolationKind::InvalidField,
                    description: e.to_string(),
                });
            }

            totals.add(&record);
            by_organization.entry(record.organization).or_default().add(&record);
            by_kind.entry(record.kind).or_default().add(&record);
            if !record.is_distributed() {
                pending.push(record.id);
            }
        }

        let state_digest = hasher.finalize().to_hex().to_string();
        if violations.is_empty() {
            debug!(records = totals.records, digest = %state_digest, "audit complete");
        } else {
            warn!(
                records = totals.records,
                violations = violations.len(),
                "audit found violations"
            );
        }

        Ok(AuditReport {
            totals,
            by_organization,
            by_kind,
            pending,
            violations,
            state_digest,
        })
    }
}

/// Length-prefix both parts so distinct entry lists never hash alike.
fn hash_entry(hasher: &mut blake3::Hasher, key: &str, value: &[u8]) {
    hasher.update(&(key.len() as u64).to_le_bytes());
    hasher.update(key.as_bytes());
    hasher.update(&(value.len() as u64).to_le_bytes());
    hasher.update(value);
}

#[cfg(test)]
mod tests {
    use zkt_store::InMemoryKvStore;

    use super::*;
    use crate::error::ErrorKind;

    const AT: &str = "2023-11-28T12:00:00Z";
    const LATER: &str = "2023-12-01T09:00:00Z";

    fn populated() -> ZakatContract<InMemoryKvStore> {
        let c = ZakatContract::new(InMemoryKvStore::new());
        c.create_record(
            "ZKT-YDSF-MLG-202311-0001",
            "John Doe",
            1_000_000.0,
            "maal",
            "YDSF Malang",
            AT,
        )
        .unwrap();
        c.create_record(
            "ZKT-YDSF-MLG-202311-0002",
            "Jane Doe",
            50_000.0,
            "fitrah",
            "YDSF Malang",
            AT,
        )
        .unwrap();
        c.create_record(
            "ZKT-YDSF-JTM-202311-0001",
            "Budi",
            200_000.0,
            "maal",
            "YDSF Jatim",
            AT,
        )
        .unwrap();
        c.distribute_record("ZKT-YDSF-MLG-202311-0001", "Ahmad", 750_000.0, LATER)
            .unwrap();
        c
    }

    #[test]
    fn empty_ledger_audit() {
        let c = ZakatContract::new(InMemoryKvStore::new());
        let report = c.audit().unwrap();
        assert_eq!(report.totals, Totals::default());
        assert!(report.pending.is_empty());
        assert!(report.is_clean());
        assert_eq!(report.state_digest.len(), 64);
    }

    #[test]
    fn totals_by_group() {
        let report = populated().audit().unwrap();
        assert!(report.is_clean());

        assert_eq!(report.totals.records, 3);
        assert_eq!(report.totals.distributed_records, 1);
        assert_eq!(report.totals.collected, 1_250_000.0);
        assert_eq!(report.totals.distributed, 750_000.0);
        assert_eq!(report.totals.undistributed(), 500_000.0);

        let malang = report.by_organization[&Organization::YdsfMalang];
        assert_eq!(malang.records, 2);
        assert_eq!(malang.collected, 1_050_000.0);
        let jatim = report.by_organization[&Organization::YdsfJatim];
        assert_eq!(jatim.distributed, 0.0);

        assert_eq!(report.by_kind[&ZakatKind::Maal].records, 2);
        assert_eq!(report.by_kind[&ZakatKind::Fitrah].collected, 50_000.0);
    }

    #[test]
    fn pending_lists_collected_ids_in_key_order() {
        let report = populated().audit().unwrap();
        let pending: Vec<&str> = report.pending.iter().map(RecordId::as_str).collect();
        assert_eq!(
            pending,
            vec!["ZKT-YDSF-JTM-202311-0001", "ZKT-YDSF-MLG-202311-0002"]
        );
    }

    #[test]
    fn digest_tracks_state() {
        let a = populated();
        let b = populated();
        let before = a.audit().unwrap().state_digest;
        assert_eq!(before, b.audit().unwrap().state_digest);

        a.distribute_record("ZKT-YDSF-MLG-202311-0002", "Siti", 1.0, LATER)
            .unwrap();
        assert_ne!(before, a.audit().unwrap().state_digest);
    }

    #[test]
    fn misplaced_record_is_a_violation() {
        let c = populated();
        let bytes = c.store().get("ZKT-YDSF-JTM-202311-0001").unwrap().unwrap();
        c.store().put("ZKT-YDSF-JTM-202311-0009", &bytes).unwrap();

        let report = c.audit().unwrap();
        assert!(!report.is_clean());
        assert_eq!(report.violations.len(), 1);
        assert_eq!(report.violations[0].kind, ViolationKind::KeyMismatch);
        assert_eq!(report.violations[0].key, "ZKT-YDSF-JTM-202311-0009");
    }

    #[test]
    fn mismatched_organization_is_a_violation() {
        let c = ZakatContract::new(InMemoryKvStore::new());
        c.store()
            .put(
                "ZKT-YDSF-MLG-202311-0001",
                br#"{"ID":"ZKT-YDSF-MLG-202311-0001","muzakki":"John Doe","amount":10,"type":"maal","status":"collected","organization":"YDSF Jatim","timestamp":"2023-11-28T12:00:00Z"}"#,
            )
            .unwrap();
        let report = c.audit().unwrap();
        assert_eq!(report.violations.len(), 1);
        assert_eq!(report.violations[0].kind, ViolationKind::InvalidField);
    }

    fn distributed_json(distribution: f64, distributed_at: &str) -> Vec<u8> {
        serde_json::json!({
            "ID": "ZKT-YDSF-MLG-202311-0001",
            "muzakki": "John Doe",
            "amount": 10,
            "type": "maal",
            "status": "distributed",
            "organization": "YDSF Malang",
            "timestamp": "2023-11-28T12:00:00Z",
            "mustahik": "Ahmad",
            "distribution": distribution,
            "distributedAt": distributed_at
        })
        .to_string()
        .into_bytes()
    }

    #[test]
    fn over_distribution_is_a_violation() {
        let c = ZakatContract::new(InMemoryKvStore::new());
        c.store()
            .put("ZKT-YDSF-MLG-202311-0001", &distributed_json(999.0, LATER))
            .unwrap();
        let report = c.audit().unwrap();
        assert!(!report.is_clean());
        assert_eq!(report.violations.len(), 1);
        assert_eq!(report.violations[0].kind, ViolationKind::InvalidField);
        assert!(report.violations[0].description.contains("999"));
    }

    #[test]
    fn negative_distribution_is_a_violation() {
        let c = ZakatContract::new(InMemoryKvStore::new());
        c.store()
            .put("ZKT-YDSF-MLG-202311-0001", &distributed_json(-50.0, LATER))
            .unwrap();
        let report = c.audit().unwrap();
        assert_eq!(report.violations.len(), 1);
        assert_eq!(report.violations[0].kind, ViolationKind::InvalidField);
    }

    #[test]
    fn legacy_distribution_time_is_reported_not_fatal() {
        let c = ZakatContract::new(InMemoryKvStore::new());
        c.store()
            .put("ZKT-YDSF-MLG-202311-0001", &distributed_json(10.0, ""))
            .unwrap();
        let report = c.audit().unwrap();
        assert_eq!(report.totals.distributed, 10.0);
        assert_eq!(report.violations.len(), 1);
        assert_eq!(report.violations[0].kind, ViolationKind::InvalidField);
    }

    #[test]
    fn corrupt_record_aborts_audit() {
        let c = populated();
        c.store().put("ZKT-YDSF-MLG-202311-0003", b"existing").unwrap();
        assert_eq!(c.audit().unwrap_err().kind(), ErrorKind::DeserializationError);
    }

    #[test]
    fn report_serializes_to_json() {
        let report = populated().audit().unwrap();
        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["totals"]["records"], 3);
        assert!(json["by_organization"]["YDSF Malang"].is_object());
        assert_eq!(json["pending"][0], "ZKT-YDSF-JTM-202311-0001");
    }
}

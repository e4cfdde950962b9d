//! Whole-record checks.

use zkt_types::{ZakatRecord, ZakatWire};

use crate::error::Result;
use crate::fields::{
    validate_amount, validate_distribution_amount, validate_id, validate_kind, validate_organization,
    validate_organization_matches, validate_status, validate_timestamp,
};

/// Raw, unvalidated input for a new collection.
#[derive(Clone, Copy, Debug)]
pub struct RecordDraft<'a> {
    pub id: &'a str,
    pub donor_name: &'a str,
    pub amount: f64,
    pub kind: &'a str,
    pub organization: &'a str,
    pub collected_at: &'a str,
}

/// Run every creation check, in order, and build the collected record.
///
/// Order: id, amount, kind, organization, organization/id agreement,
/// timestamp. The first failure is returned.
pub fn validate_new_record(draft: &RecordDraft<'_>) -> Result<ZakatRecord> {
    let id = validate_id(draft.id)?;
    let amount = validate_amount(draft.amount)?;
    let kind = validate_kind(draft.kind)?;
    let organization = validate_organization(draft.organization)?;
    validate_organization_matches(&id, organization)?;
    let collected_at = validate_timestamp(draft.collected_at)?;

    Ok(ZakatRecord::collected(
        id,
        draft.donor_name,
        amount,
        kind,
        organization,
        collected_at,
    ))
}

/// Re-run every field check over a record's persisted form.
///
/// Records built through this crate's constructors always pass; this is
/// the guard applied to hard-coded or configured records before writing.
pub fn validate_record(record: &ZakatRecord) -> Result<()> {
    let wire = ZakatWire::from(record);
    let id = validate_id(&wire.id)?;
    validate_amount(wire.amount)?;
    validate_kind(&wire.kind)?;
    let organization = validate_organization(&wire.organization)?;
    validate_organization_matches(&id, organization)?;
    validate_timestamp(&wire.timestamp)?;
    validate_status(&wire.status)?;
    if record.is_distributed() {
        validate_distribution_amount(wire.distribution, wire.amount)?;
        validate_timestamp(&wire.distributed_at)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use zkt_types::{
        Distribution, Lifecycle, Organization, RecordId, Status, StoredTime, Timestamp, ZakatKind,
    };

    use super::*;
    use crate::error::ValidationError;

    fn draft() -> RecordDraft<'static> {
        RecordDraft {
            id: "ZKT-YDSF-MLG-202311-0001",
            donor_name: "John Doe",
            amount: 1_000_000.0,
            kind: "maal",
            organization: "YDSF Malang",
            collected_at: "2023-11-28T12:00:00Z",
        }
    }

    #[test]
    fn valid_draft_builds_collected_record() {
        let record = validate_new_record(&draft()).unwrap();
        assert_eq!(record.id.as_str(), "ZKT-YDSF-MLG-202311-0001");
        assert_eq!(record.donor_name, "John Doe");
        assert_eq!(record.kind, ZakatKind::Maal);
        assert_eq!(record.organization, Organization::YdsfMalang);
        assert_eq!(record.status(), Status::Collected);
        assert_eq!(record.recipient_name(), "");
    }

    #[test]
    fn donor_name_is_not_validated() {
        let d = RecordDraft {
            donor_name: "",
            ..draft()
        };
        assert!(validate_new_record(&d).is_ok());
    }

    #[test]
    fn first_failure_wins() {
        // Bad id and bad amount: id is checked first.
        let d = RecordDraft {
            id: "bad",
            amount: -1.0,
            ..draft()
        };
        assert!(matches!(
            validate_new_record(&d),
            Err(ValidationError::InvalidFormat { .. })
        ));

        // Bad amount and bad kind: amount is checked first.
        let d = RecordDraft {
            amount: 0.0,
            kind: "other",
            ..draft()
        };
        assert!(matches!(
            validate_new_record(&d),
            Err(ValidationError::InvalidAmount { .. })
        ));
    }

    #[test]
    fn each_field_maps_to_its_error() {
        let err = validate_new_record(&RecordDraft {
            kind: "zakat",
            ..draft()
        })
        .unwrap_err();
        assert!(matches!(err, ValidationError::InvalidKind { .. }));

        let err = validate_new_record(&RecordDraft {
            organization: "YDSF",
            ..draft()
        })
        .unwrap_err();
        assert!(matches!(err, ValidationError::InvalidOrganization { .. }));

        // Known organization, wrong code for the id.
        let err = validate_new_record(&RecordDraft {
            organization: "YDSF Jatim",
            ..draft()
        })
        .unwrap_err();
        assert!(matches!(err, ValidationError::InvalidOrganization { .. }));

        let err = validate_new_record(&RecordDraft {
            collected_at: "2023-11-28",
            ..draft()
        })
        .unwrap_err();
        assert!(matches!(err, ValidationError::InvalidTimestamp { .. }));
    }

    #[test]
    fn validate_record_accepts_constructed_records() {
        let record = validate_new_record(&draft()).unwrap();
        assert!(validate_record(&record).is_ok());
    }

    #[test]
    fn validate_record_catches_bad_amount_and_mismatch() {
        let mut record = ZakatRecord::collected(
            RecordId::parse("ZKT-YDSF-JTM-202311-0001").unwrap(),
            "John Doe",
            0.0,
            ZakatKind::Maal,
            Organization::YdsfJatim,
            Timestamp::parse("2023-11-28T12:00:00Z").unwrap(),
        );
        assert!(matches!(
            validate_record(&record),
            Err(ValidationError::InvalidAmount { .. })
        ));

        record.amount = 10.0;
        record.organization = Organization::YdsfMalang;
        assert!(matches!(
            validate_record(&record),
            Err(ValidationError::InvalidOrganization { .. })
        ));
    }

    #[test]
    fn validate_record_bounds_the_distributed_amount() {
        let mut record = validate_new_record(&draft()).unwrap();
        record.lifecycle = Lifecycle::Distributed(Distribution {
            recipient_name: "Ahmad".into(),
            amount: 2_000_000.0,
            distributed_at: Timestamp::parse("2023-12-01T09:00:00Z").unwrap().into(),
        });
        assert!(matches!(
            validate_record(&record),
            Err(ValidationError::InvalidDistribution { .. })
        ));

        record.lifecycle = Lifecycle::Distributed(Distribution {
            recipient_name: "Ahmad".into(),
            amount: -50.0,
            distributed_at: Timestamp::parse("2023-12-01T09:00:00Z").unwrap().into(),
        });
        assert!(matches!(
            validate_record(&record),
            Err(ValidationError::InvalidDistribution { .. })
        ));
    }

    #[test]
    fn validate_record_flags_unparsed_distribution_time() {
        let mut record = validate_new_record(&draft()).unwrap();
        record.lifecycle = Lifecycle::Distributed(Distribution {
            recipient_name: "Ahmad".into(),
            amount: 10.0,
            distributed_at: StoredTime::from_stored(""),
        });
        assert!(matches!(
            validate_record(&record),
            Err(ValidationError::InvalidTimestamp { .. })
        ));
    }
}

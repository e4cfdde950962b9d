//! Single-field checks.
//!
//! Valid values:
//! - id: `ZKT-YDSF-{MLG|JTM}-YYYYMM-NNNN`, ASCII digits
//! - timestamp: RFC3339
//! - kind: `fitrah` | `maal`
//! - amount: finite and strictly positive
//! - distribution amount: finite, from zero up to the collected amount
//! - organization: `YDSF Malang` | `YDSF Jatim`, agreeing with the id's code
//! - status: `collected` | `distributed`

use zkt_types::{Organization, RecordId, Status, Timestamp, ZakatKind};

use crate::error::{Result, ValidationError};

/// Check the identifier format and return the parsed id.
///
/// # Examples
///
/// ```
/// use zkt_validate::validate_id;
///
/// assert!(validate_id("ZKT-YDSF-MLG-202311-0001").is_ok());
/// assert!(validate_id("ZKT-YDSF-SBY-202311-0001").is_err());
/// ```
pub fn validate_id(id: &str) -> Result<RecordId> {
    RecordId::parse(id).map_err(|_| ValidationError::InvalidFormat {
        value: id.to_string(),
    })
}

pub fn validate_timestamp(ts: &str) -> Result<Timestamp> {
    Timestamp::parse(ts).map_err(|_| ValidationError::InvalidTimestamp {
        value: ts.to_string(),
    })
}

pub fn validate_kind(kind: &str) -> Result<ZakatKind> {
    kind.parse().map_err(|_| ValidationError::InvalidKind {
        value: kind.to_string(),
    })
}

/// Amounts must be strictly greater than zero. NaN and infinities are
/// rejected as well since they cannot be persisted as JSON numbers.
pub fn validate_amount(amount: f64) -> Result<f64> {
    if !amount.is_finite() || amount <= 0.0 {
        return Err(ValidationError::InvalidAmount { value: amount });
    }
    Ok(amount)
}

/// A handed-out amount may be zero but never negative, and never more than
/// `available`.
pub fn validate_distribution_amount(amount: f64, available: f64) -> Result<f64> {
    if !amount.is_finite() || amount < 0.0 || amount > available {
        return Err(ValidationError::InvalidDistribution {
            value: amount,
            available,
        });
    }
    Ok(amount)
}

pub fn validate_organization(org: &str) -> Result<Organization> {
    org.parse().map_err(|_| ValidationError::InvalidOrganization {
        value: org.to_string(),
        reason: "must be either 'YDSF Malang' or 'YDSF Jatim'".into(),
    })
}

pub fn validate_status(status: &str) -> Result<Status> {
    status.parse().map_err(|_| ValidationError::InvalidStatus {
        value: status.to_string(),
    })
}

/// The organization must be the one named by the id's `MLG`/`JTM` code.
pub fn validate_organization_matches(id: &RecordId, org: Organization) -> Result<()> {
    if id.organization() != org {
        return Err(ValidationError::InvalidOrganization {
            value: org.to_string(),
            reason: format!(
                "id {id} carries code {} which belongs to '{}'",
                id.org_code(),
                id.organization()
            ),
        });
    }
    Ok(())
}

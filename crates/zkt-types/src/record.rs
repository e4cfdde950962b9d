use crate::enums::{Organization, Status, ZakatKind};
use crate::error::TransitionError;
use crate::id::RecordId;
use crate::temporal::{StoredTime, Timestamp};

/// Details captured when a collected zakat is handed to its recipient.
#[derive(Clone, Debug, PartialEq)]
pub struct Distribution {
    /// The mustahik (recipient).
    pub recipient_name: String,
    pub amount: f64,
    pub distributed_at: StoredTime,
}

/// Forward-only record state: `Collected` → `Distributed`, exactly once.
#[derive(Clone, Debug, PartialEq)]
pub enum Lifecycle {
    Collected,
    Distributed(Distribution),
}

impl Lifecycle {
    pub fn status(&self) -> Status {
        match self {
            Self::Collected => Status::Collected,
            Self::Distributed(_) => Status::Distributed,
        }
    }
}

/// A single zakat transaction.
#[derive(Clone, Debug, PartialEq)]
pub struct ZakatRecord {
    pub id: RecordId,
    /// The muzakki (donor).
    pub donor_name: String,
    pub amount: f64,
    pub kind: ZakatKind,
    pub organization: Organization,
    pub collected_at: Timestamp,
    pub lifecycle: Lifecycle,
}

impl ZakatRecord {
    /// A freshly collected record. Field validation is the caller's job.
    pub fn collected(
        id: RecordId,
        donor_name: impl Into<String>,
        amount: f64,
        kind: ZakatKind,
        organization: Organization,
        collected_at: Timestamp,
    ) -> Self {
        Self {
            id,
            donor_name: donor_name.into(),
            amount,
            kind,
            organization,
            collected_at,
            lifecycle: Lifecycle::Collected,
        }
    }

    pub fn status(&self) -> Status {
        self.lifecycle.status()
    }

    pub fn is_distributed(&self) -> bool {
        matches!(self.lifecycle, Lifecycle::Distributed(_))
    }

    pub fn distribution(&self) -> Option<&Distribution> {
        match &self.lifecycle {
            Lifecycle::Collected => None,
            Lifecycle::Distributed(d) => Some(d),
        }
    }

    /// Recipient name, empty until distributed.
    pub fn recipient_name(&self) -> &str {
        self.distribution()
            .map(|d| d.recipient_name.as_str())
            .unwrap_or("")
    }

    /// Distributed amount, zero until distributed.
    pub fn distributed_amount(&self) -> f64 {
        self.distribution().map(|d| d.amount).unwrap_or(0.0)
    }

    pub fn distributed_at(&self) -> Option<&StoredTime> {
        self.distribution().map(|d| &d.distributed_at)
    }

    /// Apply the one permitted transition.
    ///
    /// Fails without modifying `self` if the record is already distributed
    /// or the requested amount exceeds what was collected.
    pub fn distribute(&mut self, distribution: Distribution) -> Result<(), TransitionError> {
        if self.is_distributed() {
            return Err(TransitionError::AlreadyDistributed(self.id.to_string()));
        }
        if distribution.amount > self.amount {
            return Err(TransitionError::AmountExceeded {
                requested: distribution.amount,
                available: self.amount,
            });
        }
        self.lifecycle = Lifecycle::Distributed(distribution);
        Ok(())
    }
}

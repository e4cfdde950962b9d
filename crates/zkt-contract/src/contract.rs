use tracing::{debug, info};
use zkt_store::{KvStore, StoreError};
use zkt_types::{
    decode_record, encode_record, Distribution, StoredTime, Timestamp, TransitionError,
    ZakatRecord,
};
use zkt_validate::{
    validate_distribution_amount, validate_new_record, validate_record, validate_timestamp,
    RecordDraft,
};

use crate::config::{ContractConfig, WriteGuard};
use crate::error::{ContractError, ContractResult};
use crate::listing::RecordIter;

/// The zakat ledger contract.
///
/// Every operation is one logical transaction against the store: checks
/// first, then at most one read and one write. The contract itself holds no
/// locks; see [`WriteGuard`] for how concurrent writers are handled.
pub struct ZakatContract<S> {
    store: S,
    config: ContractConfig,
}

impl<S: KvStore> ZakatContract<S> {
    /// Create a contract with the default configuration.
    pub fn new(store: S) -> Self {
        Self::with_config(store, ContractConfig::default())
    }

    pub fn with_config(store: S, config: ContractConfig) -> Self {
        Self { store, config }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn config(&self) -> &ContractConfig {
        &self.config
    }

    pub fn into_store(self) -> S {
        self.store
    }

    // ---- Lifecycle operations ----

    /// Write the configured seed record, stamped with the current time.
    pub fn bootstrap(&self) -> ContractResult<ZakatRecord> {
        self.bootstrap_at(Timestamp::now())
    }

    /// Write the configured seed record with an explicit collection time.
    ///
    /// Fails with `AlreadyInitialized` if the seed key is present.
    pub fn bootstrap_at(&self, collected_at: Timestamp) -> ContractResult<ZakatRecord> {
        let seed = &self.config.seed;
        if self
            .store
            .get(&seed.id)
            .map_err(ContractError::StoreRead)?
            .is_some()
        {
            return Err(ContractError::AlreadyInitialized {
                id: seed.id.clone(),
            });
        }

        let draft = RecordDraft {
            id: &seed.id,
            donor_name: &seed.donor_name,
            amount: seed.amount,
            kind: &seed.kind,
            organization: &seed.organization,
            collected_at: collected_at.as_str(),
        };
        let record = validate_new_record(&draft).map_err(ContractError::InternalValidation)?;
        validate_record(&record).map_err(ContractError::InternalValidation)?;

        let bytes = encode(&record)?;
        if !self.write_new(record.id.as_str(), &bytes)? {
            return Err(ContractError::AlreadyInitialized {
                id: seed.id.clone(),
            });
        }
        info!(id = %record.id, "ledger bootstrapped");
        Ok(record)
    }

    /// Record a new collection in state `collected`.
    pub fn create_record(
        &self,
        id: &str,
        donor_name: &str,
        amount: f64,
        kind: &str,
        organization: &str,
        collected_at: &str,
    ) -> ContractResult<ZakatRecord> {
        let record = validate_new_record(&RecordDraft {
            id,
            donor_name,
            amount,
            kind,
            organization,
            collected_at,
        })?;

        if self.record_exists(id)? {
            debug!(id, "create rejected: record exists");
            return Err(ContractError::AlreadyExists { id: id.to_string() });
        }

        let bytes = encode(&record)?;
        if !self.write_new(id, &bytes)? {
            debug!(id, "create lost race to a concurrent writer");
            return Err(ContractError::AlreadyExists { id: id.to_string() });
        }
        info!(id, amount, kind, organization, "zakat collected");
        Ok(record)
    }

    /// Load a record by id.
    pub fn query_record(&self, id: &str) -> ContractResult<ZakatRecord> {
        self.load(id).map(|(record, _)| record)
    }

    /// Lazily decode every record in key order.
    pub fn list_records(&self) -> ContractResult<RecordIter<'_>> {
        let scan = self.store.scan("", "").map_err(ContractError::Scan)?;
        debug!("listing records");
        Ok(RecordIter::new(scan))
    }

    /// Collect [`Self::list_records`], failing on the first bad record.
    pub fn list_all(&self) -> ContractResult<Vec<ZakatRecord>> {
        self.list_records()?.collect()
    }

    /// Hand a collected record to its recipient.
    ///
    /// Overwrites the record under the same key. The record is loaded
    /// first, so an unknown id is `NotFound` whatever the other arguments.
    /// Then, in order: `AlreadyDistributed` on a second attempt,
    /// `AmountExceeded` when `amount` is larger than what was collected,
    /// `InvalidDistribution` for a negative or non-finite amount, and
    /// `InvalidTimestamp` unless `distributed_at` is RFC3339. A zero
    /// amount is accepted.
    pub fn distribute_record(
        &self,
        id: &str,
        recipient_name: &str,
        amount: f64,
        distributed_at: &str,
    ) -> ContractResult<ZakatRecord> {
        let (mut record, previous) = self.load(id)?;
        record
            .distribute(Distribution {
                recipient_name: recipient_name.to_string(),
                amount,
                distributed_at: StoredTime::from_stored(distributed_at),
            })
            .map_err(|e| {
                debug!(id, error = %e, "distribution rejected");
                transition_error(id, e)
            })?;
        validate_distribution_amount(amount, record.amount)?;
        validate_timestamp(distributed_at)?;

        let bytes = encode(&record)?;
        if !self.write_update(id, &previous, &bytes)? {
            // Someone else wrote the key between our read and write.
            let current = self.query_record(id)?;
            debug!(id, status = %current.status(), "distribution lost race");
            return Err(if current.is_distributed() {
                ContractError::AlreadyDistributed { id: id.to_string() }
            } else {
                ContractError::WriteConflict { id: id.to_string() }
            });
        }
        info!(id, recipient = recipient_name, amount, "zakat distributed");
        Ok(record)
    }

    /// Whether any value is stored under `id`. Empty values count.
    pub fn record_exists(&self, id: &str) -> ContractResult<bool> {
        Ok(self
            .store
            .get(id)
            .map_err(ContractError::StoreRead)?
            .is_some())
    }

    // ---- Internals ----

    fn load(&self, id: &str) -> ContractResult<(ZakatRecord, Vec<u8>)> {
        let bytes = self
            .store
            .get(id)
            .map_err(ContractError::StoreRead)?
            .ok_or_else(|| ContractError::NotFound { id: id.to_string() })?;
        let record = decode_record(&bytes).map_err(|e| ContractError::Deserialization {
            key: id.to_string(),
            reason: e.to_string(),
        })?;
        Ok((record, bytes))
    }

    fn guarded(&self) -> ContractResult<bool> {
        let supported = self.store.supports_compare_and_put();
        match self.config.write_guard {
            WriteGuard::Auto => {
                if !supported {
                    debug!("store lacks compare-and-put; relying on store ordering");
                }
                Ok(supported)
            }
            WriteGuard::CompareAndPut if !supported => Err(ContractError::Store(
                StoreError::Unsupported("compare_and_put"),
            )),
            WriteGuard::CompareAndPut => Ok(true),
            WriteGuard::StoreOrdering => Ok(false),
        }
    }

    /// Write a key expected to be absent. `Ok(false)` if it appeared.
    fn write_new(&self, key: &str, value: &[u8]) -> ContractResult<bool> {
        if self.guarded()? {
            return self
                .store
                .compare_and_put(key, None, value)
                .map_err(ContractError::Store);
        }
        self.store.put(key, value).map_err(ContractError::Store)?;
        Ok(true)
    }

    /// Overwrite a key last seen holding `previous`. `Ok(false)` if it changed.
    fn write_update(&self, key: &str, previous: &[u8], value: &[u8]) -> ContractResult<bool> {
        if self.guarded()? {
            return self
                .store
                .compare_and_put(key, Some(previous), value)
                .map_err(ContractError::Store);
        }
        self.store.put(key, value).map_err(ContractError::Store)?;
        Ok(true)
    }
}

impl<S> std::fmt::Debug for ZakatContract<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ZakatContract")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

fn encode(record: &ZakatRecord) -> ContractResult<Vec<u8>> {
    encode_record(record).map_err(|e| ContractError::Serialization(e.to_string()))
}

fn transition_error(id: &str, err: TransitionError) -> ContractError {
    match err {
        TransitionError::AlreadyDistributed(_) => ContractError::AlreadyDistributed {
            id: id.to_string(),
        },
        TransitionError::AmountExceeded {
            requested,
            available,
        } => ContractError::AmountExceeded {
            id: id.to_string(),
            requested,
            available,
        },
    }
}

//! Zakat ledger contract.
//!
//! This crate holds the record lifecycle. It provides:
//! - [`ZakatContract`] over any [`zkt_store::KvStore`]
//! - Bootstrap of a configured seed record
//! - Create, query, list, distribute and existence checks
//! - A ledger-wide [`AuditReport`] with a BLAKE3 state digest
//! - [`ContractConfig`] for the seed record and the write guard
//!
//! Each operation validates its input before touching the store and writes
//! only after every check has passed.

pub mod audit;
pub mod config;
pub mod contract;
pub mod error;
pub mod listing;

pub use audit::{AuditReport, Totals, Violation, ViolationKind};
pub use config::{ContractConfig, SeedConfig, WriteGuard};
pub use contract::ZakatContract;
pub use error::{ContractError, ContractResult, ErrorKind};
pub use listing::RecordIter;

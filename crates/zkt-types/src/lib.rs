//! Foundation types for the zakat ledger.
//!
//! Every other `zkt-*` crate depends on this one. It defines what a zakat
//! record *is*; validation policy lives in `zkt-validate` and storage
//! orchestration in `zkt-contract`.
//!
//! # Key Types
//!
//! - [`RecordId`] -- parsed `ZKT-YDSF-{MLG|JTM}-YYYYMM-NNNN` identifier
//! - [`ZakatKind`], [`Organization`], [`OrgCode`], [`Status`] -- closed enumerations
//! - [`Timestamp`] -- RFC3339 instant that keeps its original text
//! - [`StoredTime`] -- a stored time that may predate validation
//! - [`ZakatRecord`] / [`Lifecycle`] -- the record and its forward-only state
//! - [`ZakatWire`] -- the persisted JSON shape (`ID`, `muzakki`, `amount`, ...)

pub mod enums;
pub mod error;
pub mod id;
pub mod record;
pub mod temporal;
pub mod wire;

pub use enums::{OrgCode, Organization, Status, ZakatKind};
pub use error::{TransitionError, TypeError};
pub use id::RecordId;
pub use record::{Distribution, Lifecycle, ZakatRecord};
pub use temporal::{StoredTime, Timestamp};
pub use wire::{decode_record, encode_record, ZakatWire};

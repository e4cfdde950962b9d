//! Field validation for zakat records.
//!
//! Every check is a pure function that either returns the typed value it
//! proved valid or a [`ValidationError`] naming the violated rule. Callers
//! run the applicable checks before touching storage and stop at the first
//! failure; [`validate_new_record`] does exactly that for a creation request.
//!
//! # Modules
//!
//! - [`error`] -- the validation failure taxonomy
//! - [`fields`] -- single-field checks
//! - [`record`] -- whole-record checks built from the field checks

pub mod error;
pub mod fields;
pub mod record;

pub use error::{Result, ValidationError};
pub use fields::{
    validate_amount, validate_distribution_amount, validate_id, validate_kind, validate_organization,
    validate_organization_matches, validate_status, validate_timestamp,
};
pub use record::{validate_new_record, validate_record, RecordDraft};

//! Key-value store capability for the zakat ledger.
//!
//! The ledger contract never talks to a concrete database. It consumes the
//! narrow [`KvStore`] trait -- point reads, point writes, ordered range scans,
//! and an optional compare-and-put -- which the hosting ledger runtime
//! provides. Any engine satisfying the trait is interchangeable.
//!
//! # Storage Backends
//!
//! - [`InMemoryKvStore`] -- `BTreeMap`-based ordered store for tests, the
//!   CLI, and embedding. Supports compare-and-put.
//!
//! [`snapshot`] persists an [`InMemoryKvStore`] to a JSON file so the CLI can
//! carry state between invocations.
//!
//! # Design Rules
//!
//! 1. The store never interprets values -- they are opaque bytes.
//! 2. Scans are ordered by key, `[start, end)`, with `""` meaning unbounded.
//! 3. A present-but-empty value is still present.
//! 4. All backend errors are propagated, never silently ignored.

pub mod error;
pub mod memory;
pub mod snapshot;
pub mod traits;

pub use error::{StoreError, StoreResult};
pub use memory::InMemoryKvStore;
pub use snapshot::{load_snapshot, save_snapshot};
pub use traits::{KvIter, KvStore};

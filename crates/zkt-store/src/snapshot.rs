//! JSON file snapshots of an [`InMemoryKvStore`].
//!
//! The snapshot is a single JSON object mapping each key to its value as a
//! UTF-8 string. Saving writes to a temporary file in the destination
//! directory and renames it over the target, so a crash never leaves a
//! half-written snapshot behind.

use std::collections::BTreeMap;
use std::io::Write;
use std::path::Path;

use tracing::debug;

use crate::error::{StoreError, StoreResult};
use crate::memory::InMemoryKvStore;

/// Load a snapshot. A missing file yields an empty store.
pub fn load_snapshot(path: &Path) -> StoreResult<InMemoryKvStore> {
    let bytes = match std::fs::read(path) {
        Ok(bytes) => bytes,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            debug!(path = %path.display(), "no snapshot; starting empty");
            return Ok(InMemoryKvStore::new());
        }
        Err(e) => return Err(StoreError::Io(e)),
    };

    let map: BTreeMap<String, String> = serde_json::from_slice(&bytes)
        .map_err(|e| StoreError::Serialization(format!("{}: {e}", path.display())))?;
    debug!(path = %path.display(), keys = map.len(), "snapshot loaded");
    Ok(InMemoryKvStore::from_entries(
        map.into_iter().map(|(k, v)| (k, v.into_bytes())),
    ))
}

/// Atomically write `store` to `path`.
///
/// Fails with [`StoreError::Serialization`] if any value is not UTF-8.
pub fn save_snapshot(store: &InMemoryKvStore, path: &Path) -> StoreResult<()> {
    let mut map = BTreeMap::new();
    for (key, value) in store.entries()? {
        let text = String::from_utf8(value).map_err(|_| {
            StoreError::Serialization(format!("value under {key:?} is not valid UTF-8"))
        })?;
        map.insert(key, text);
    }
    let json = serde_json::to_vec_pretty(&map)
        .map_err(|e| StoreError::Serialization(e.to_string()))?;

    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let mut tmp = tempfile::NamedTempFile::new_in(dir)?;
    tmp.write_all(&json)?;
    tmp.as_file().sync_all()?;
    tmp.persist(path).map_err(|e| StoreError::Io(e.error))?;
    debug!(path = %path.display(), keys = map.len(), "snapshot saved");
    Ok(())
}

use crate::error::{StoreError, StoreResult};

/// Ordered stream of `(key, value)` pairs produced by [`KvStore::scan`].
///
/// Items are fallible: a backend may fail partway through a scan.
pub type KvIter<'a> = Box<dyn Iterator<Item = StoreResult<(String, Vec<u8>)>> + Send + 'a>;

/// Key-value capability provided by the hosting ledger runtime.
///
/// All implementations must satisfy these invariants:
/// - `get` distinguishes absence (`Ok(None)`) from failure (`Err`).
/// - `scan` yields keys in ascending byte order within `[start, end)`;
///   an empty `start` or `end` leaves that side unbounded.
/// - Conflicting writes to the same key are serialized by the backend.
pub trait KvStore: Send + Sync {
    /// Read the value stored under `key`.
    ///
    /// Returns `Ok(None)` if the key does not exist.
    fn get(&self, key: &str) -> StoreResult<Option<Vec<u8>>>;

    /// Create or overwrite `key`.
    fn put(&self, key: &str, value: &[u8]) -> StoreResult<()>;

    /// Start an ordered range scan over `[start, end)`.
    ///
    /// Errors returned here mean the scan could not start; errors yielded by
    /// the iterator mean it failed midway.
    fn scan(&self, start: &str, end: &str) -> StoreResult<KvIter<'_>>;

    /// Whether [`Self::compare_and_put`] is implemented.
    fn supports_compare_and_put(&self) -> bool {
        false
    }

    /// Write `value` only if the current value equals `expected`
    /// (`None` meaning the key must be absent).
    ///
    /// Returns `Ok(false)` without writing when the comparison fails. The
    /// default implementation reports the operation as unsupported.
    fn compare_and_put(
        &self,
        key: &str,
        expected: Option<&[u8]>,
        value: &[u8],
    ) -> StoreResult<bool> {
        let _ = (key, expected, value);
        Err(StoreError::Unsupported("compare_and_put"))
    }
}

impl<S: KvStore + ?Sized> KvStore for &S {
    fn get(&self, key: &str) -> StoreResult<Option<Vec<u8>>> {
        (**self).get(key)
    }

    fn put(&self, key: &str, value: &[u8]) -> StoreResult<()> {
        (**self).put(key, value)
    }

    fn scan(&self, start: &str, end: &str) -> StoreResult<KvIter<'_>> {
        (**self).scan(start, end)
    }

    fn supports_compare_and_put(&self) -> bool {
        (**self).supports_compare_and_put()
    }

    fn compare_and_put(
        &self,
        key: &str,
        expected: Option<&[u8]>,
        value: &[u8],
    ) -> StoreResult<bool> {
        (**self).compare_and_put(key, expected, value)
    }
}

impl<S: KvStore + ?Sized> KvStore for std::sync::Arc<S> {
    fn get(&self, key: &str) -> StoreResult<Option<Vec<u8>>> {
        (**self).get(key)
    }

    fn put(&self, key: &str, value: &[u8]) -> StoreResult<()> {
        (**self).put(key, value)
    }

    fn scan(&self, start: &str, end: &str) -> StoreResult<KvIter<'_>> {
        (**self).scan(start, end)
    }

    fn supports_compare_and_put(&self) -> bool {
        (**self).supports_compare_and_put()
    }

    fn compare_and_put(
        &self,
        key: &str,
        expected: Option<&[u8]>,
        value: &[u8],
    ) -> StoreResult<bool> {
        (**self).compare_and_put(key, expected, value)
    }
}

use std::iter::FusedIterator;

use zkt_store::KvIter;
use zkt_types::{decode_record, ZakatRecord};

use crate::error::{ContractError, ContractResult};

/// Lazy, single-pass decoder over a store scan.
///
/// Yields records in scan order. The first decode or scan failure is
/// yielded as an error and ends the iteration; records are never skipped.
/// Iterating again requires a fresh [`crate::ZakatContract::list_records`].
pub struct RecordIter<'a> {
    inner: KvIter<'a>,
    finished: bool,
}

impl<'a> RecordIter<'a> {
    pub(crate) fn new(inner: KvIter<'a>) -> Self {
        Self {
            inner,
            finished: false,
        }
    }
}

impl Iterator for RecordIter<'_> {
    type Item = ContractResult<ZakatRecord>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }
        let item = match self.inner.next() {
            Some(item) => item,
            None => {
                self.finished = true;
                return None;
            }
        };
        let result = match item {
            Ok((key, value)) => decode_record(&value).map_err(|e| ContractError::Deserialization {
                key,
                reason: e.to_string(),
            }),
            Err(e) => Err(ContractError::Scan(e)),
        };
        if result.is_err() {
            self.finished = true;
        }
        Some(result)
    }
}

impl FusedIterator for RecordIter<'_> {}

impl std::fmt::Debug for RecordIter<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RecordIter")
            .field("finished", &self.finished)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use zkt_store::StoreError;

    use super::*;
    use crate::error::ErrorKind;

    const RECORD: &str = r#"{"ID":"ZKT-YDSF-MLG-202311-0001","muzakki":"John Doe","amount":1000000,"type":"maal","status":"collected","organization":"YDSF Malang","timestamp":"2023-11-28T12:00:00Z","mustahik":"","distribution":0,"distributedAt":""}"#;

    fn iter_over(items: Vec<Result<(String, Vec<u8>), StoreError>>) -> RecordIter<'static> {
        RecordIter::new(Box::new(items.into_iter()))
    }

    fn ok(key: &str, value: &[u8]) -> Result<(String, Vec<u8>), StoreError> {
        Ok((key.to_string(), value.to_vec()))
    }

    #[test]
    fn empty_scan_yields_nothing() {
        let mut iter = iter_over(vec![]);
        assert!(iter.next().is_none());
        assert!(iter.next().is_none());
    }

    #[test]
    fn decodes_each_value() {
        let iter = iter_over(vec![
            ok("a", RECORD.as_bytes()),
            ok("b", RECORD.as_bytes()),
        ]);
        let records: Vec<_> = iter.collect::<Result<_, _>>().unwrap();
        assert_eq!(records.len(), 2);
    }

    #[test]
    fn decode_failure_ends_iteration() {
        let mut iter = iter_over(vec![
            ok("a", RECORD.as_bytes()),
            ok("b", b"existing"),
            ok("c", RECORD.as_bytes()),
        ]);
        assert!(iter.next().unwrap().is_ok());
        let err = iter.next().unwrap().unwrap_err();
        assert_eq!(err.kind(), ErrorKind::DeserializationError);
        assert!(err.to_string().contains("stored zakat b"));
        assert!(iter.next().is_none());
    }

    #[test]
    fn scan_failure_ends_iteration() {
        let mut iter = iter_over(vec![
            Err(StoreError::Backend("iterator closed".into())),
            ok("c", RECORD.as_bytes()),
        ]);
        assert_eq!(iter.next().unwrap().unwrap_err().kind(), ErrorKind::ScanError);
        assert!(iter.next().is_none());
    }
}

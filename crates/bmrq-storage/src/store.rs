//! The storage capability trait shared by every backend.

use async_trait::async_trait;
use bmrq_core::record::SubmissionRecord;

use crate::error::StorageError;

/// How a backend reports its existing contents for sequence allocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SequenceHint {
    /// The largest sid already stored; `None` when the store is empty or
    /// its sid column is not numeric.
    MaxSid(Option<u32>),
    /// A count of data rows, header excluded.
    RecordCount(u32),
}

impl SequenceHint {
    /// The next sequence id implied by this hint.
    pub fn next_sid(self) -> u32 {
        match self {
            SequenceHint::MaxSid(Some(max)) => max + 1,
            SequenceHint::MaxSid(None) => 1,
            SequenceHint::RecordCount(count) => count + 1,
        }
    }
}

/// A backend that can hold submission records.
///
/// Implemented by the managed-table backend, the spreadsheet backend, and
/// the local CSV fallback. The sequence allocator and the persistence
/// gateway are polymorphic over this trait; which variant is active is
/// decided by configuration.
#[async_trait]
pub trait SubmissionStore: Send + Sync {
    /// Short human-readable backend name for outcome messages.
    fn describe(&self) -> &str;

    /// Report existing contents for sequence-id allocation.
    async fn sequence_hint(&self) -> Result<SequenceHint, StorageError>;

    /// Append one complete record. A row is written whole or not at all.
    async fn append(&self, record: &SubmissionRecord) -> Result<(), StorageError>;
}

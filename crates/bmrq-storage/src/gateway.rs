//! Remote-first persistence with local fallback.

use std::sync::Arc;

use bmrq_core::record::SubmissionRecord;
use tracing::{info, warn};

use crate::local::CsvStore;
use crate::sequence;
use crate::store::SubmissionStore;

/// Where a submission ended up.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteTarget {
    Remote,
    Local,
}

/// Result of a persistence attempt. Never an error: failures are captured
/// in `error` for display and the submission flow continues.
#[derive(Debug, Clone)]
pub struct WriteOutcome {
    pub written_to: Option<WriteTarget>,
    pub error: Option<String>,
}

/// Writes each record to the configured remote store, falling back to the
/// local CSV. Constructed once at process start and passed in.
pub struct PersistenceGateway {
    remote: Option<Arc<dyn SubmissionStore>>,
    local: CsvStore,
}

impl PersistenceGateway {
    pub fn new(remote: Option<Arc<dyn SubmissionStore>>, local: CsvStore) -> Self {
        Self { remote, local }
    }

    pub fn remote(&self) -> Option<&dyn SubmissionStore> {
        self.remote.as_deref()
    }

    pub fn local(&self) -> &CsvStore {
        &self.local
    }

    /// Allocate the next sequence id against whichever store is active.
    pub async fn next_sid(&self) -> u32 {
        sequence::next_sid(self.remote.as_deref(), &self.local).await
    }

    /// Persist one record. The remote store is attempted exactly once; any
    /// failure falls back to the local CSV without retry. Duplicate
    /// submissions append duplicate rows; there is no idempotency key.
    pub async fn persist(&self, record: &SubmissionRecord) -> WriteOutcome {
        let mut remote_error = None;
        if let Some(store) = &self.remote {
            match store.append(record).await {
                Ok(()) => {
                    info!(sid = record.sid, backend = store.describe(), "record persisted");
                    return WriteOutcome {
                        written_to: Some(WriteTarget::Remote),
                        error: None,
                    };
                }
                Err(e) => {
                    warn!(
                        sid = record.sid,
                        backend = store.describe(),
                        "remote write failed: {e}, falling back to local CSV"
                    );
                    remote_error = Some(format!("{} write failed: {e}", store.describe()));
                }
            }
        }

        match self.local.append(record).await {
            Ok(()) => {
                info!(
                    sid = record.sid,
                    path = %self.local.path().display(),
                    "record persisted to local CSV"
                );
                WriteOutcome {
                    written_to: Some(WriteTarget::Local),
                    error: remote_error,
                }
            }
            Err(e) => {
                warn!(sid = record.sid, "local CSV write failed: {e}");
                let local_error = format!("local CSV write failed: {e}");
                let error = match remote_error {
                    Some(remote) => format!("{remote}; {local_error}"),
                    None => local_error,
                };
                WriteOutcome {
                    written_to: None,
                    error: Some(error),
                }
            }
        }
    }
}

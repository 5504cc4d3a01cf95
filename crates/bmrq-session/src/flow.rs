//! The render/score/persist/notify flow.

use bmrq_core::record::{ITEM_COUNT, SubmissionRecord, subject_code};
use bmrq_instrument::error::ScoringError;
use bmrq_instrument::scoring::{Sensitivity, score};
use bmrq_notify::email::{NotifyOutcome, notify};
use bmrq_storage::gateway::WriteOutcome;

use crate::context::SessionContext;

/// A rendered form: the provisional sequence id and the running count
/// shown to the subject.
#[derive(Debug, Clone)]
pub struct FormSession {
    /// Allocated at render and written unchanged at submit. Two sessions
    /// rendered in the same window can carry the same sid; the backing
    /// store's append order is the source of truth.
    pub sid: u32,
    pub subject_code: String,
    /// Submissions already collected, `sid - 1`.
    pub collected: u32,
}

/// Everything the shell needs to display after a submission.
#[derive(Debug)]
pub struct SubmissionOutcome {
    pub record: SubmissionRecord,
    pub sensitivity: Sensitivity,
    pub write: WriteOutcome,
    pub notification: NotifyOutcome,
}

impl SessionContext {
    /// Allocate the provisional sequence id for a freshly rendered form.
    pub async fn render(&self) -> FormSession {
        let sid = self.gateway().next_sid().await;
        FormSession {
            sid,
            subject_code: subject_code(sid),
            collected: sid.saturating_sub(1),
        }
    }

    /// Score, persist, and notify for one submission.
    ///
    /// Only incomplete or out-of-scale answers block, before anything is
    /// written. Storage and notification failures are captured in the
    /// outcome for display and never abort the flow.
    pub async fn submit(
        &self,
        session: &FormSession,
        name: &str,
        raw: &[Option<u8>; ITEM_COUNT],
    ) -> Result<SubmissionOutcome, ScoringError> {
        let scored = score(raw)?;
        let record = SubmissionRecord::new(session.sid, name, scored.per_item, scored.total);
        let sensitivity = Sensitivity::classify(scored.total);

        let write = self.gateway().persist(&record).await;
        let notification = notify(self.email(), &record.name, record.total, record.timestamp).await;

        Ok(SubmissionOutcome {
            record,
            sensitivity,
            write,
            notification,
        })
    }
}

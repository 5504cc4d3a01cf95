use jiff::Timestamp;
use serde::{Deserialize, Serialize};

/// Number of items in the instrument. Every persisted record carries one
/// scored value per item.
pub const ITEM_COUNT: usize = 20;

/// One persisted submission. Created once at successful form submission,
/// never updated or deleted afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubmissionRecord {
    /// Submission time, UTC.
    pub timestamp: Timestamp,
    /// Sequence id allocated when the form was rendered. Monotonically
    /// non-decreasing across the collection, not gap-free, and not unique
    /// when two sessions render in the same window.
    pub sid: u32,
    pub subject_code: String,
    /// Display name; trimmed, defaults to the subject code when blank.
    pub name: String,
    /// Per-item scored values, post reverse-coding, each in [1, 5].
    pub scores: [u8; ITEM_COUNT],
    /// Sum of `scores`, in [20, 100].
    pub total: u16,
}

impl SubmissionRecord {
    /// Build a record for a scored submission, timestamped now.
    pub fn new(sid: u32, name: &str, scores: [u8; ITEM_COUNT], total: u16) -> Self {
        let subject_code = subject_code(sid);
        let trimmed = name.trim();
        let name = if trimmed.is_empty() {
            subject_code.clone()
        } else {
            trimmed.to_string()
        };
        Self {
            timestamp: Timestamp::now(),
            sid,
            subject_code,
            name,
            scores,
            total,
        }
    }
}

/// Zero-padded display code for a sequence id: `S001`, `S042`. Widens past
/// three digits instead of truncating.
pub fn subject_code(sid: u32) -> String {
    format!("S{sid:03}")
}

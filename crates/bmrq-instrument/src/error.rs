use thiserror::Error;

use crate::scoring::{SCALE_MAX, SCALE_MIN};

/// Validation failures for a raw response set. The only errors in the
/// pipeline allowed to block a submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ScoringError {
    #[error("item {position} is unanswered")]
    Incomplete { position: u8 },

    #[error("item {position} has raw value {value} outside the {SCALE_MIN}-{SCALE_MAX} scale")]
    OutOfRange { position: u8, value: u8 },
}

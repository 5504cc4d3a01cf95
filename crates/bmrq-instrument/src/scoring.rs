//! Scoring rules: reverse coding, totals, and the sensitivity threshold.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::ScoringError;

pub use bmrq_core::record::ITEM_COUNT;

/// 1-based positions whose raw score is inverted before summing.
pub const REVERSE_POSITIONS: [u8; 2] = [2, 5];

/// Totals strictly above this threshold classify as normal sensitivity.
pub const PASS_THRESHOLD: u16 = 65;

/// Lowest raw agreement score.
pub const SCALE_MIN: u8 = 1;

/// Highest raw agreement score.
pub const SCALE_MAX: u8 = 5;

/// A complete, validated, reverse-coded response set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScoredResponses {
    /// Per-item scored values, each in [`SCALE_MIN`, `SCALE_MAX`].
    pub per_item: [u8; ITEM_COUNT],
    /// Sum of `per_item`; in [20, 100] by construction.
    pub total: u16,
}

/// Score a raw response vector.
///
/// Any unanswered or out-of-scale item fails validation and the caller
/// must not proceed to persistence. For a position in
/// [`REVERSE_POSITIONS`] the scored value is `6 - raw`, otherwise the raw
/// value unchanged. Deterministic, no side effects.
pub fn score(raw: &[Option<u8>; ITEM_COUNT]) -> Result<ScoredResponses, ScoringError> {
    let mut per_item = [0u8; ITEM_COUNT];
    for (idx, slot) in raw.iter().enumerate() {
        let position = (idx + 1) as u8;
        let value = slot.ok_or(ScoringError::Incomplete { position })?;
        if !(SCALE_MIN..=SCALE_MAX).contains(&value) {
            return Err(ScoringError::OutOfRange { position, value });
        }
        per_item[idx] = if REVERSE_POSITIONS.contains(&position) {
            SCALE_MAX + 1 - value
        } else {
            value
        };
    }
    let total = per_item.iter().map(|&v| v as u16).sum();
    Ok(ScoredResponses { per_item, total })
}

/// Threshold judgement on a total score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Sensitivity {
    /// Total above [`PASS_THRESHOLD`].
    Normal,
    /// Total at or below [`PASS_THRESHOLD`].
    Low,
}

impl Sensitivity {
    pub fn classify(total: u16) -> Self {
        if total > PASS_THRESHOLD {
            Sensitivity::Normal
        } else {
            Sensitivity::Low
        }
    }
}

impl fmt::Display for Sensitivity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Sensitivity::Normal => write!(f, "normal sensitivity"),
            Sensitivity::Low => write!(f, "low sensitivity"),
        }
    }
}

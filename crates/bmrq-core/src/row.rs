//! Column-order contract for tabular backends.
//!
//! Spreadsheet and CSV rows are written in exactly this order; downstream
//! readers misalign columns if the header and the data ever disagree.

use jiff::Timestamp;

use crate::error::CoreError;
use crate::record::{ITEM_COUNT, SubmissionRecord};

/// Full-schema column count: `timestamp, sid, subject_code, name, Q1..Q20, total`.
pub const COLUMN_COUNT: usize = 4 + ITEM_COUNT + 1;

/// Header row for the full schema, in write order.
pub fn header() -> Vec<String> {
    let mut cols = Vec::with_capacity(COLUMN_COUNT);
    cols.push("timestamp".to_string());
    cols.push("sid".to_string());
    cols.push("subject_code".to_string());
    cols.push("name".to_string());
    for i in 1..=ITEM_COUNT {
        cols.push(format!("Q{i}"));
    }
    cols.push("total".to_string());
    cols
}

impl SubmissionRecord {
    /// Serialize to one tabular row in [`header`] order.
    pub fn to_row(&self) -> Vec<String> {
        let mut cells = Vec::with_capacity(COLUMN_COUNT);
        cells.push(self.timestamp.to_string());
        cells.push(self.sid.to_string());
        cells.push(self.subject_code.clone());
        cells.push(self.name.clone());
        for score in self.scores {
            cells.push(score.to_string());
        }
        cells.push(self.total.to_string());
        cells
    }

    /// Reconstruct a record from a row read back in [`header`] order.
    pub fn from_row(cells: &[String]) -> Result<Self, CoreError> {
        if cells.len() != COLUMN_COUNT {
            return Err(CoreError::ColumnCount {
                expected: COLUMN_COUNT,
                actual: cells.len(),
            });
        }

        let timestamp: Timestamp = parse_cell(&cells[0], "timestamp")?;
        let sid: u32 = parse_cell(&cells[1], "sid")?;
        let subject_code = cells[2].clone();
        let name = cells[3].clone();

        let mut scores = [0u8; ITEM_COUNT];
        for (i, slot) in scores.iter_mut().enumerate() {
            *slot = parse_cell(&cells[4 + i], &format!("Q{}", i + 1))?;
        }
        let total: u16 = parse_cell(&cells[4 + ITEM_COUNT], "total")?;

        Ok(Self {
            timestamp,
            sid,
            subject_code,
            name,
            scores,
            total,
        })
    }
}

fn parse_cell<T: std::str::FromStr>(cell: &str, column: &str) -> Result<T, CoreError> {
    cell.trim().parse().map_err(|_| CoreError::InvalidCell {
        column: column.to_string(),
        value: cell.to_string(),
    })
}

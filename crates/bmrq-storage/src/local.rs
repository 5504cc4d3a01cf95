//! Local CSV fallback store.
//!
//! Appends full-schema rows to a tabular file on disk, writing the header
//! only when the file is first created. Also the fallback source for
//! sequence allocation when no remote backend is reachable.

use std::fs::OpenOptions;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use bmrq_core::record::SubmissionRecord;
use bmrq_core::row;

use crate::error::StorageError;
use crate::store::{SequenceHint, SubmissionStore};

pub struct CsvStore {
    path: PathBuf,
}

impl CsvStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl SubmissionStore for CsvStore {
    fn describe(&self) -> &str {
        "local CSV"
    }

    /// Scan the file for a sequence hint: the maximum of a numeric `sid`
    /// column when one exists, otherwise the data-row count. An absent
    /// file reads as empty.
    async fn sequence_hint(&self) -> Result<SequenceHint, StorageError> {
        // The fallback file is small and local; blocking reads are fine.
        if !self.path.exists() {
            return Ok(SequenceHint::MaxSid(None));
        }

        let mut reader = csv::Reader::from_path(&self.path)?;
        let sid_idx = reader.headers()?.iter().position(|h| h == "sid");

        let mut count = 0u32;
        let mut max_sid: Option<u32> = None;
        let mut numeric = sid_idx.is_some();
        for record in reader.records() {
            let record = record?;
            count += 1;
            if let Some(idx) = sid_idx {
                match record.get(idx).and_then(|c| c.trim().parse::<u32>().ok()) {
                    Some(sid) => max_sid = Some(max_sid.map_or(sid, |m| m.max(sid))),
                    None => numeric = false,
                }
            }
        }

        if numeric {
            Ok(SequenceHint::MaxSid(max_sid))
        } else {
            Ok(SequenceHint::RecordCount(count))
        }
    }

    async fn append(&self, record: &SubmissionRecord) -> Result<(), StorageError> {
        if let Some(dir) = self.path.parent()
            && !dir.as_os_str().is_empty()
        {
            std::fs::create_dir_all(dir)?;
        }

        let new_file = !self.path.exists();
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;
        let mut writer = csv::Writer::from_writer(file);
        if new_file {
            writer.write_record(row::header())?;
        }
        writer.write_record(record.to_row())?;
        writer.flush()?;
        Ok(())
    }
}

//! Managed-table backend: a PostgREST-style REST API.
//!
//! Writes the reduced schema (`timestamp, sid, subject_code, name, total`);
//! the per-item columns are not modeled by this backend. The API key is
//! provisioned externally; this client assumes it is already valid.

use async_trait::async_trait;
use bmrq_core::record::SubmissionRecord;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::error::StorageError;
use crate::store::{SequenceHint, SubmissionStore};

/// Reduced-schema wire row for the managed table.
#[derive(Debug, Serialize)]
struct TableRow<'a> {
    timestamp: String,
    sid: u32,
    subject_code: &'a str,
    name: &'a str,
    total: u16,
}

#[derive(Debug, Deserialize)]
struct SidRow {
    sid: serde_json::Value,
}

pub struct TableStore {
    http: Client,
    base_url: String,
    api_key: String,
    table: String,
}

impl TableStore {
    pub fn new(
        http: Client,
        base_url: impl Into<String>,
        api_key: impl Into<String>,
        table: impl Into<String>,
    ) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            http,
            base_url,
            api_key: api_key.into(),
            table: table.into(),
        }
    }

    fn rows_url(&self) -> String {
        format!("{}/rest/v1/{}", self.base_url, self.table)
    }
}

#[async_trait]
impl SubmissionStore for TableStore {
    fn describe(&self) -> &str {
        "managed table"
    }

    async fn sequence_hint(&self) -> Result<SequenceHint, StorageError> {
        let resp = self
            .http
            .get(self.rows_url())
            .query(&[("select", "sid"), ("order", "sid.desc"), ("limit", "1")])
            .header("apikey", &self.api_key)
            .bearer_auth(&self.api_key)
            .send()
            .await?;
        if !resp.status().is_success() {
            return Err(StorageError::TableApi(format!(
                "sid lookup returned {}",
                resp.status()
            )));
        }

        let rows: Vec<SidRow> = resp.json().await?;
        // Non-numeric sid values degrade to "no usable maximum".
        let max = rows
            .first()
            .and_then(|r| r.sid.as_u64())
            .map(|v| v as u32);
        Ok(SequenceHint::MaxSid(max))
    }

    async fn append(&self, record: &SubmissionRecord) -> Result<(), StorageError> {
        let row = TableRow {
            timestamp: record.timestamp.to_string(),
            sid: record.sid,
            subject_code: &record.subject_code,
            name: &record.name,
            total: record.total,
        };
        let resp = self
            .http
            .post(self.rows_url())
            .header("apikey", &self.api_key)
            .bearer_auth(&self.api_key)
            .json(&row)
            .send()
            .await?;
        if !resp.status().is_success() {
            let status = resp.status();
            let body = resp.text().await.unwrap_or_default();
            return Err(StorageError::TableApi(format!(
                "insert returned {status}: {body}"
            )));
        }
        Ok(())
    }
}

//! bmrq-storage
//!
//! Storage backends for submission records — a managed-table REST backend,
//! a Google Sheets backend, and the local CSV fallback — unified behind the
//! [`store::SubmissionStore`] capability trait. Also owns sequence-id
//! allocation and the remote-first persistence gateway.

pub mod error;
pub mod gateway;
pub mod local;
pub mod sequence;
pub mod sheet;
pub mod store;
pub mod table;

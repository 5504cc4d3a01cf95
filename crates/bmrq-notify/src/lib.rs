//! bmrq-notify
//!
//! Best-effort email notification of submission results. Nothing here is
//! allowed to block or fail the submission flow: a missing credential
//! skips the channel, a transport failure downgrades to a warning.

pub mod email;
pub mod error;

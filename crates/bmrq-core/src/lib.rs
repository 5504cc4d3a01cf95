//! bmrq-core
//!
//! Pure domain types and the tabular row contract. No I/O — this is the
//! shared vocabulary of the BMRQ collection pipeline.

pub mod error;
pub mod record;
pub mod row;

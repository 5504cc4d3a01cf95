//! bmrq-instrument
//!
//! The BMRQ (Barcelona Music Reward Questionnaire) instrument definition
//! and scoring rules. Pure data and arithmetic — no I/O.

pub mod error;
pub mod items;
pub mod scoring;

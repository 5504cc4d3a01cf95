//! bmrq-session
//!
//! Ties the pipeline together for a hosting form shell: configuration
//! from the environment, a context holding the backend clients (built
//! once at process start), and the render/score/persist/notify flow.

pub mod config;
pub mod context;
pub mod flow;

pub use config::SessionConfig;
pub use context::SessionContext;
pub use flow::{FormSession, SubmissionOutcome};

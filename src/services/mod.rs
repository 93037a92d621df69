//! Service layer
//!
//! The command service is the only entry point a front-end needs: it runs
//! kubectl, decodes the output, and keeps the transcript.

pub mod command_service;
pub mod transcript;

pub use command_service::{CommandTimeouts, KubectlService};
pub use transcript::Transcript;

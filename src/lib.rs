//! Kubescribe library
//!
//! The command core behind a kubectl front-end with a visible command
//! transcript: a shell-free process runner, decoders for kubectl JSON output,
//! a command service with a fixed operation surface, and a bounded history of
//! every command it ran.

pub mod cli;
pub mod config;
pub mod kubectl;
pub mod models;
pub mod parse;
pub mod rpc;
pub mod services;

// Re-export commonly used types for convenience
pub use kubectl::{CommandRunner, KubectlRunner, ValidationError};
pub use models::{CommandResult, Namespace, ParsedData, Pod};
pub use parse::ParseError;
pub use services::{CommandTimeouts, KubectlService, Transcript};

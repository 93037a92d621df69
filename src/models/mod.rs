//! Kubescribe model layer
//!
//! Structure:
//! - `envelope.rs` - The uniform result envelope returned by every operation
//! - `resources.rs` - View records decoded from kubectl JSON output

pub mod envelope;
pub mod resources;

pub use envelope::{CommandResult, ParsedData, display_command};
pub use resources::{Namespace, Pod};

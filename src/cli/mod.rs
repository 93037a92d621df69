//! CLI command handling module
//!
//! Handles CLI subcommands, output rendering, and logging setup.

mod commands;
mod logging;
pub mod render;
mod version;

pub use commands::{ConfigSubcommand, handle_config_command};
pub use logging::init_logging;
pub use version::display_version;

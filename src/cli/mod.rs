//! CLI command handlers
//!
//! This module contains the implementation of CLI commands,
//! bridging the clap argument parsing with the state container.

pub mod config;
pub mod record;
pub mod report;

use crate::display::DisplayOptions;

pub use config::{handle_config_command, ConfigCommands};
pub use record::{handle_record_command, RecordCommands};
pub use report::{handle_history_command, handle_summary_command};

/// How command results are printed
#[derive(Debug, Clone, Default)]
pub struct OutputOptions {
    pub display: DisplayOptions,
    /// Print JSON instead of formatted tables
    pub json: bool,
}

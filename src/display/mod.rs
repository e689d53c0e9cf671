//! Display formatting for terminal output
//!
//! Plain-text tables for record lists, the summary, and recent history.

pub mod record;
pub mod report;

pub use record::{format_record_list, format_record_row, DisplayOptions};
pub use report::{format_history, format_summary};

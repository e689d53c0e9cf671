//! Core data models for the expense tracker client
//!
//! Records as the server returns them, the bodies sent to create them, and
//! the cent-based money type both are built on.

pub mod ids;
pub mod money;
pub mod record;

pub use ids::RecordId;
pub use money::Money;
pub use record::{NewRecord, Record, RecordKind, RecordValidationError};

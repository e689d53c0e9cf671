//! Expense tracker client
//!
//! A terminal client for a remote income/expense tracking service. The
//! service owns the data; this crate fetches it, caches it in a
//! [`store::TrackerStore`], and derives totals and recent history.
//!
//! # Architecture
//!
//! - `config`: Configuration and path management
//! - `error`: Custom error types
//! - `models`: Records, record ids, and the cent-based money type
//! - `api`: The `TrackerApi` seam and its reqwest implementation
//! - `store`: The state container and history view
//! - `display`: Terminal formatting
//! - `cli`: Command handlers used by the `expense` binary
//!
//! # Example
//!
//! ```rust,ignore
//! use expense_tracker::api::HttpApi;
//! use expense_tracker::config::Settings;
//! use expense_tracker::store::TrackerStore;
//!
//! let api = HttpApi::from_settings(&Settings::default())?;
//! let mut store = TrackerStore::new(api);
//! store.refresh().await?;
//! println!("balance: {}", store.total_balance());
//! ```

pub mod api;
pub mod cli;
pub mod config;
pub mod display;
pub mod error;
pub mod models;
pub mod store;

pub use error::{TrackerError, TrackerResult};

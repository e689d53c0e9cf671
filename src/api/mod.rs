//! Remote API access
//!
//! `TrackerApi` is the seam between the state container and the network.
//! `HttpApi` talks to the real service with reqwest; tests supply their own
//! implementation.

pub mod http;

use serde_json::Value;

use crate::error::TrackerResult;
use crate::models::{NewRecord, Record, RecordId, RecordKind};

pub use http::HttpApi;

/// Operations the remote expense service exposes
#[allow(async_fn_in_trait)]
pub trait TrackerApi {
    /// Create a record; returns whatever the server echoed back
    async fn add(&self, kind: RecordKind, record: &NewRecord) -> TrackerResult<Value>;

    /// Fetch every record of one kind
    async fn list(&self, kind: RecordKind) -> TrackerResult<Vec<Record>>;

    /// Delete a record by id; returns whatever the server echoed back
    async fn delete(&self, kind: RecordKind, id: &RecordId) -> TrackerResult<Value>;
}

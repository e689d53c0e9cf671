//! Server-assigned record identifiers
//!
//! The remote API hands out opaque string ids (`_id` on the wire). The newtype
//! keeps them from being confused with titles or other free-form strings.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::TrackerError;

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RecordId(String);

impl RecordId {
    /// Wrap a raw identifier, rejecting values that cannot form a URL path segment
    pub fn parse(s: &str) -> Result<Self, TrackerError> {
        let s = s.trim();
        if s.is_empty() {
            return Err(TrackerError::Validation("Record id cannot be empty".into()));
        }
        if s.contains(['/', '?', '#']) || s.chars().any(char::is_whitespace) {
            return Err(TrackerError::Validation(format!(
                "Record id contains invalid characters: {}",
                s
            )));
        }
        Ok(Self(s.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Abbreviated form for tables
    pub fn short(&self) -> &str {
        let end = self
            .0
            .char_indices()
            .nth(8)
            .map(|(i, _)| i)
            .unwrap_or(self.0.len());
        &self.0[..end]
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for RecordId {
    type Err = TrackerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl AsRef<str> for RecordId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

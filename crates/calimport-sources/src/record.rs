//! Raw record schema of the demo source.
//!
//! Records live only for the duration of one fetch; they are mapped into
//! [`calimport_core::ImportEvent`]s and dropped.

use serde::{Deserialize, Serialize};

use crate::error::{SourceError, SourceResult};

/// A post as returned by the JSONPlaceholder `/posts` endpoint.
///
/// Missing fields fall back to zero or the empty string; only a body that is
/// not an array of objects is rejected.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RawRecord {
    pub id: i64,
    pub title: String,
    pub body: String,
    pub user_id: i64,
}

impl RawRecord {
    pub fn new(id: i64, title: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            id,
            title: title.into(),
            body: body.into(),
            user_id: 0,
        }
    }
}

/// Parses a response body as an ordered array of raw records.
pub fn parse_records(body: &[u8]) -> SourceResult<Vec<RawRecord>> {
    serde_json::from_slice(body).map_err(|e| {
        SourceError::invalid_response(format!("failed to parse records: {}", e)).with_source(e)
    })
}

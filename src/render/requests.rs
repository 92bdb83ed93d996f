//! Batch-update request body for the document service.
//!
//! Field names follow the service's JSON wire format (`insertTable`,
//! `endOfSegmentLocation`, `insertText`, `location.index`).

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::model::{Anchor, EditOperation, EditPlan};

use super::json::{to_json, JsonFormat};

/// Body of a `documents.batchUpdate` call.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatchUpdateRequest {
    /// Requests, applied by the service in order and atomically
    pub requests: Vec<Request>,
}

impl BatchUpdateRequest {
    /// Number of requests.
    pub fn len(&self) -> usize {
        self.requests.len()
    }

    /// Check if there is nothing to submit.
    pub fn is_empty(&self) -> bool {
        self.requests.is_empty()
    }

    /// Drop text insertions with empty text.
    ///
    /// The service rejects them, and an empty insertion shifts nothing, so the
    /// remaining offsets stay valid.
    pub fn without_empty_insertions(mut self) -> Self {
        self.requests.retain(|r| {
            r.insert_text
                .as_ref()
                .map_or(true, |insert| !insert.text.is_empty())
        });
        self
    }
}

/// One request; exactly one field is set.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Request {
    /// Table creation
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub insert_table: Option<InsertTableRequest>,

    /// Text insertion
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub insert_text: Option<InsertTextRequest>,
}

/// `insertTable` request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InsertTableRequest {
    /// Row count
    pub rows: usize,
    /// Column count
    pub columns: usize,
    /// Insert at the end of the body
    pub end_of_segment_location: EndOfSegmentLocation,
}

/// End of a document segment; the empty id is the body.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EndOfSegmentLocation {
    /// Segment id
    pub segment_id: String,
}

/// `insertText` request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InsertTextRequest {
    /// Text to insert
    pub text: String,
    /// Position to insert at
    pub location: Location,
}

/// Position in the document body.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Location {
    /// Zero-based index in UTF-16 code units
    pub index: usize,
}

impl From<&EditOperation> for Request {
    fn from(op: &EditOperation) -> Self {
        match op {
            EditOperation::InsertTable {
                rows,
                columns,
                anchor: Anchor::EndOfSegment,
            } => Request {
                insert_table: Some(InsertTableRequest {
                    rows: *rows,
                    columns: *columns,
                    end_of_segment_location: EndOfSegmentLocation::default(),
                }),
                insert_text: None,
            },
            EditOperation::InsertText { text, offset } => Request {
                insert_table: None,
                insert_text: Some(InsertTextRequest {
                    text: text.clone(),
                    location: Location { index: *offset },
                }),
            },
        }
    }
}

/// Convert a plan to a batch-update request body.
pub fn to_batch_request(plan: &EditPlan) -> BatchUpdateRequest {
    BatchUpdateRequest {
        requests: plan.iter().map(Request::from).collect(),
    }
}

/// Convert a plan to the JSON batch-update body.
pub fn to_request_json(plan: &EditPlan, format: JsonFormat) -> Result<String> {
    to_json(&to_batch_request(plan), format)
}

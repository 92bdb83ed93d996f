//! Error types for tablemirror library.

use std::fmt;
use std::io;
use thiserror::Error;

/// Result type alias for tablemirror operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur while extracting, planning or syncing a table.
#[derive(Error, Debug)]
pub enum Error {
    /// I/O error when reading or writing files.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// The source could not be parsed as HTML.
    #[error("HTML parsing error: {0}")]
    HtmlParse(String),

    /// The source markup does not have the expected table shape.
    #[error("Malformed input: {0}")]
    MalformedInput(String),

    /// An edit plan cannot be built from the given titles and rows.
    #[error("Invalid plan state: {0}")]
    InvalidPlanState(String),

    /// An operation references an offset that is out of range or already shifted.
    #[error("Offset violation at {offset}: {reason}")]
    OffsetViolation {
        /// Offending offset
        offset: usize,
        /// What went wrong
        reason: String,
    },

    /// Error during rendering (Markdown, text, JSON).
    #[error("Rendering error: {0}")]
    Render(String),

    /// A call to the remote document service failed.
    #[error("{stage} failed: {message}")]
    Remote {
        /// Which step of the sync was running
        stage: SyncStage,
        /// Message from the remote side or the transport
        message: String,
    },

    /// Generic error with message.
    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Create a malformed input error.
    pub fn malformed(msg: impl Into<String>) -> Self {
        Error::MalformedInput(msg.into())
    }

    /// Create a remote error for the given stage.
    pub fn remote(stage: SyncStage, message: impl fmt::Display) -> Self {
        Error::Remote {
            stage,
            message: message.to_string(),
        }
    }

    /// Stage of the sync that failed, if this is a remote error.
    pub fn stage(&self) -> Option<SyncStage> {
        match self {
            Error::Remote { stage, .. } => Some(*stage),
            _ => None,
        }
    }
}

/// Step of the mirroring pipeline that talks to an external collaborator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SyncStage {
    /// Downloading the source page
    FetchSource,
    /// Listing files visible to the service account
    ListFiles,
    /// Creating a new document
    CreateDocument,
    /// Granting public read access to a new document
    GrantPermission,
    /// Erasing the content of an existing document
    ClearDocument,
    /// Submitting the edit plan
    BatchUpdate,
}

impl fmt::Display for SyncStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            SyncStage::FetchSource => "Fetching the source page",
            SyncStage::ListFiles => "Listing files",
            SyncStage::CreateDocument => "Creating the document",
            SyncStage::GrantPermission => "Granting read permission",
            SyncStage::ClearDocument => "Clearing the document",
            SyncStage::BatchUpdate => "Updating the document",
        };
        f.write_str(name)
    }
}

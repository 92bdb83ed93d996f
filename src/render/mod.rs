//! Rendering module: table previews and the document service's request body.

mod json;
mod markdown;
mod requests;
mod text;

pub use json::{to_json, JsonFormat};
pub use markdown::{page_to_markdown, to_markdown};
pub use requests::{
    to_batch_request, to_request_json, BatchUpdateRequest, EndOfSegmentLocation,
    InsertTableRequest, InsertTextRequest, Location, Request,
};
pub use text::to_text;

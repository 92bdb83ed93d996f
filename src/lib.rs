//! # tablemirror
//!
//! Mirror a two-column wiki table into a cloud document.
//!
//! The pipeline has three pure stages and one remote one:
//!
//! 1. parse the page's HTML and extract a normalized [`Table`]
//!    (header titles, codes, descriptions, bulleted sub-lists);
//! 2. turn the table into an [`EditPlan`]: one table creation followed by
//!    text insertions ordered so that none of them invalidates a later offset;
//! 3. serialize the plan into the document service's batch-update body;
//! 4. submit it through a [`sync::DocumentService`].
//!
//! ## Quick Start
//!
//! ```no_run
//! use tablemirror::{parse_file, plan, render};
//!
//! fn main() -> tablemirror::Result<()> {
//!     let page = parse_file("page.html")?;
//!     let plan = plan::build_plan(&page.table)?;
//!     println!("{}", render::to_request_json(&plan, render::JsonFormat::Pretty)?);
//!     Ok(())
//! }
//! ```

pub mod detect;
pub mod error;
pub mod model;
pub mod parser;
pub mod plan;
pub mod render;
pub mod sync;

// Re-export commonly used types
pub use detect::{detect_format_from_bytes, detect_format_from_path, is_html, SourceFormat};
pub use error::{Error, Result, SyncStage};
pub use model::{Anchor, CellContent, EditOperation, EditPlan, Row, Table, WikiPage};
pub use parser::{ErrorMode, HtmlParser, PairingMode, ParseOptions};
pub use plan::{DocumentSimulator, EditPlanBuilder};
pub use render::{BatchUpdateRequest, JsonFormat};
pub use sync::{DocumentService, SyncDriver, SyncReport};

use std::io::Read;
use std::path::Path;

/// Parse an HTML file and return the page title and table.
///
/// # Example
///
/// ```no_run
/// use tablemirror::parse_file;
///
/// let page = parse_file("page.html").unwrap();
/// println!("Rows: {}", page.table.row_count());
/// ```
pub fn parse_file<P: AsRef<Path>>(path: P) -> Result<WikiPage> {
    HtmlParser::open(path)?.parse()
}

/// Parse an HTML file with custom options.
///
/// # Example
///
/// ```no_run
/// use tablemirror::{parse_file_with_options, ParseOptions};
///
/// let options = ParseOptions::new().lenient().per_row();
/// let page = parse_file_with_options("page.html", options).unwrap();
/// ```
pub fn parse_file_with_options<P: AsRef<Path>>(path: P, options: ParseOptions) -> Result<WikiPage> {
    HtmlParser::open_with_options(path, options)?.parse()
}

/// Parse a page from an HTML string.
pub fn parse_html(html: &str) -> Result<WikiPage> {
    HtmlParser::from_html(html)?.parse()
}

/// Parse a page from an HTML string with custom options.
pub fn parse_html_with_options(html: &str, options: ParseOptions) -> Result<WikiPage> {
    HtmlParser::from_html_with_options(html, options)?.parse()
}

/// Parse a page from bytes.
pub fn parse_bytes(data: &[u8]) -> Result<WikiPage> {
    HtmlParser::from_bytes(data)?.parse()
}

/// Parse a page from a reader.
pub fn parse_reader<R: Read>(reader: R) -> Result<WikiPage> {
    HtmlParser::from_reader(reader)?.parse()
}

/// Extract the table from an HTML string and build its edit plan.
///
/// # Example
///
/// ```
/// let html = "<table><thead><tr><th>Code</th><th>Description</th></tr></thead>\
///             <tbody><tr><td>X1</td><td>d1</td></tr></tbody></table>";
/// let plan = tablemirror::plan_html(html).unwrap();
/// assert_eq!(plan.len(), 5);
/// ```
pub fn plan_html(html: &str) -> Result<EditPlan> {
    let page = parse_html(html)?;
    plan::build_plan(&page.table)
}

/// Builder for extracting a page and producing its edit plan.
///
/// # Example
///
/// ```no_run
/// use tablemirror::TableMirror;
///
/// let json = TableMirror::new()
///     .lenient()
///     .per_row()
///     .parse_file("page.html")?
///     .to_request_json()?;
/// # Ok::<(), tablemirror::Error>(())
/// ```
pub struct TableMirror {
    parse_options: ParseOptions,
    json_format: JsonFormat,
}

impl TableMirror {
    /// Create a new builder.
    pub fn new() -> Self {
        Self {
            parse_options: ParseOptions::default(),
            json_format: JsonFormat::default(),
        }
    }

    /// Enable lenient parsing mode.
    pub fn lenient(mut self) -> Self {
        self.parse_options = self.parse_options.lenient();
        self
    }

    /// Pair body cells per row.
    pub fn per_row(mut self) -> Self {
        self.parse_options = self.parse_options.per_row();
        self
    }

    /// Keep extracted text verbatim.
    pub fn raw_text(mut self) -> Self {
        self.parse_options = self.parse_options.raw_text();
        self
    }

    /// Set the id of the title element.
    pub fn with_title_element_id(mut self, id: impl Into<String>) -> Self {
        self.parse_options = self.parse_options.with_title_element_id(id);
        self
    }

    /// Set the JSON output format.
    pub fn with_json_format(mut self, format: JsonFormat) -> Self {
        self.json_format = format;
        self
    }

    /// Parse an HTML file.
    pub fn parse_file<P: AsRef<Path>>(self, path: P) -> Result<MirrorResult> {
        let page = HtmlParser::open_with_options(path, self.parse_options)?.parse()?;
        MirrorResult::new(page, self.json_format)
    }

    /// Parse HTML from bytes.
    pub fn parse_bytes(self, data: &[u8]) -> Result<MirrorResult> {
        let page = HtmlParser::from_bytes_with_options(data, self.parse_options)?.parse()?;
        MirrorResult::new(page, self.json_format)
    }
}

impl Default for TableMirror {
    fn default() -> Self {
        Self::new()
    }
}

/// An extracted page together with its edit plan.
pub struct MirrorResult {
    /// The parsed page
    pub page: WikiPage,
    /// Plan that rebuilds the page's table
    pub plan: EditPlan,
    json_format: JsonFormat,
}

impl MirrorResult {
    fn new(page: WikiPage, json_format: JsonFormat) -> Result<Self> {
        let plan = plan::build_plan(&page.table)?;
        Ok(Self {
            page,
            plan,
            json_format,
        })
    }

    /// Batch-update request body as JSON.
    pub fn to_request_json(&self) -> Result<String> {
        render::to_request_json(&self.plan, self.json_format)
    }

    /// Table preview as Markdown.
    pub fn to_markdown(&self) -> Result<String> {
        render::page_to_markdown(&self.page)
    }

    /// Table as JSON.
    pub fn to_json(&self) -> Result<String> {
        render::to_json(&self.page.table, self.json_format)
    }

    /// Replay the plan against a simulated document and return the grid.
    pub fn verify(&self) -> Result<Vec<Vec<String>>> {
        DocumentSimulator::replay(&self.plan)
    }
}

//! Table types.

use serde::{Deserialize, Serialize};

/// Prefix written in front of every bullet item when a list is flattened to text.
pub const BULLET_PREFIX: &str = "- ";

/// A normalized two-column table: column titles plus ordered rows.
///
/// Built once per run from the source markup and not modified afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Table {
    /// Titles of the code column and the description column
    pub column_titles: (String, String),

    /// Data rows in document order
    pub rows: Vec<Row>,
}

impl Table {
    /// Create a table with the given titles and no rows.
    pub fn new(code_title: impl Into<String>, description_title: impl Into<String>) -> Self {
        Self {
            column_titles: (code_title.into(), description_title.into()),
            rows: Vec::new(),
        }
    }

    /// Add a row to the table.
    pub fn add_row(&mut self, row: Row) {
        self.rows.push(row);
    }

    /// Add a row and return self.
    pub fn with_row(mut self, row: Row) -> Self {
        self.rows.push(row);
        self
    }

    /// Get the number of data rows (header excluded).
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Check if the table has no data rows.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Column titles as a slice-friendly array.
    pub fn titles(&self) -> [&str; 2] {
        [&self.column_titles.0, &self.column_titles.1]
    }

    /// Get plain text representation of the table.
    pub fn plain_text(&self) -> String {
        let mut lines = vec![format!("{}\t{}", self.column_titles.0, self.column_titles.1)];
        lines.extend(self.rows.iter().map(|row| row.plain_text()));
        lines.join("\n")
    }
}

/// A data row: one code and its description.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Row {
    /// Identifier shown in the first column
    pub code: String,

    /// Content of the second column
    pub description: CellContent,
}

impl Row {
    /// Create a new row.
    pub fn new(code: impl Into<String>, description: CellContent) -> Self {
        Self {
            code: code.into(),
            description,
        }
    }

    /// Create a row whose description is plain text.
    pub fn text(code: impl Into<String>, description: impl Into<String>) -> Self {
        Self::new(code, CellContent::text(description))
    }

    /// Get plain text representation (tab separated).
    pub fn plain_text(&self) -> String {
        format!(
            "{}\t{}",
            self.code,
            self.description.render_text().trim_end().replace('\n', " ")
        )
    }
}

/// Content of a description cell.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum CellContent {
    /// A flat text cell
    PlainText {
        /// Cell text
        text: String,
    },
    /// A cell holding an intro paragraph followed by a bulleted list
    BulletList {
        /// Paragraph text preceding the list
        intro: String,
        /// List items in document order
        items: Vec<String>,
    },
}

impl CellContent {
    /// Create a plain text cell.
    pub fn text(text: impl Into<String>) -> Self {
        CellContent::PlainText { text: text.into() }
    }

    /// Create a bullet list cell.
    pub fn bullets<S: Into<String>>(
        intro: impl Into<String>,
        items: impl IntoIterator<Item = S>,
    ) -> Self {
        CellContent::BulletList {
            intro: intro.into(),
            items: items.into_iter().map(Into::into).collect(),
        }
    }

    /// Check if this cell is a bullet list.
    pub fn is_bullet_list(&self) -> bool {
        matches!(self, CellContent::BulletList { .. })
    }

    /// Text written into the target document for this cell.
    ///
    /// Bullet lists become `intro\n- item\n- item\n`.
    pub fn render_text(&self) -> String {
        match self {
            CellContent::PlainText { text } => text.clone(),
            CellContent::BulletList { intro, items } => {
                let mut out = String::with_capacity(
                    intro.len() + 1 + items.iter().map(|i| i.len() + 3).sum::<usize>(),
                );
                out.push_str(intro);
                out.push('\n');
                for item in items {
                    out.push_str(BULLET_PREFIX);
                    out.push_str(item);
                    out.push('\n');
                }
                out
            }
        }
    }
}

impl From<&str> for CellContent {
    fn from(text: &str) -> Self {
        CellContent::text(text)
    }
}

impl From<String> for CellContent {
    fn from(text: String) -> Self {
        CellContent::PlainText { text }
    }
}

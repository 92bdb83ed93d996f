//! Page-level types.

use super::Table;
use serde::{Deserialize, Serialize};

/// A parsed wiki page: its title and the table it carries.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WikiPage {
    /// Page title (used as the name of the mirrored document)
    pub title: Option<String>,

    /// The extracted two-column table
    pub table: Table,
}

impl WikiPage {
    /// Create a new page from a table.
    pub fn new(table: Table) -> Self {
        Self { title: None, table }
    }

    /// Set the title and return self.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Title to use for the mirrored document, preferring an explicit override.
    pub fn document_title<'a>(&'a self, override_title: Option<&'a str>) -> Option<&'a str> {
        override_title
            .filter(|t| !t.trim().is_empty())
            .or(self.title.as_deref())
            .filter(|t| !t.trim().is_empty())
    }
}

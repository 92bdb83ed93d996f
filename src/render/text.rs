//! Plain text preview of an extracted table.

use crate::error::Result;
use crate::model::Table;

/// Convert a table to tab separated text, header first.
pub fn to_text(table: &Table) -> Result<String> {
    Ok(table.plain_text())
}

//! Extraction of the two-column table from the markup tree.
//!
//! The header titles are found by descending twice through "first child"
//! from the `<thead>`. Body cells are assigned to columns either by a running
//! parity counter over the whole body (the default, matching minimal
//! markup where every row alternates code and description cells) or by
//! position within each row.

use markup5ever_rcdom::Handle;

use crate::error::{Error, Result};
use crate::model::{CellContent, Row, Table};

use super::bullet::BulletFormatter;
use super::markup::{
    children_of_first, element_children, has_element_children, parent, tag_of, text_content,
    Markup,
};
use super::options::{PairingMode, ParseOptions};
use super::text::clean;

/// Extracts a [`Table`] from a parsed page.
#[derive(Debug, Clone)]
pub struct TableExtractor {
    options: ParseOptions,
    bullets: BulletFormatter,
}

impl TableExtractor {
    /// Create an extractor with the given options.
    pub fn new(options: ParseOptions) -> Self {
        let bullets = BulletFormatter::new(options.error_mode, options.normalize_text);
        Self { options, bullets }
    }

    /// Extract the header titles and the rows.
    pub fn extract(&self, markup: &Markup) -> Result<Table> {
        let thead = markup
            .find_first("thead")
            .ok_or_else(|| Error::malformed("page has no table header"))?;
        let (code_title, description_title) = self.column_titles(&thead)?;

        let rows = match find_body(&thead) {
            Some(tbody) => match self.options.pairing {
                PairingMode::Parity => self.rows_by_parity(&tbody)?,
                PairingMode::PerRow => self.rows_per_row(&tbody)?,
            },
            None => {
                log::debug!("Table has no body section, extracting header only");
                Vec::new()
            }
        };

        log::debug!(
            "Extracted table \"{}\" / \"{}\" with {} rows",
            code_title,
            description_title,
            rows.len()
        );

        Ok(Table {
            column_titles: (code_title, description_title),
            rows,
        })
    }

    /// Titles of the two header cells.
    pub fn column_titles(&self, thead: &Handle) -> Result<(String, String)> {
        let cells = children_of_first(std::slice::from_ref(thead), 2);
        let titles: Vec<String> = cells
            .iter()
            .map(|cell| clean(text_content(cell), self.options.normalize_text))
            .collect();

        match <[String; 2]>::try_from(titles) {
            Ok([code, description]) => Ok((code, description)),
            Err(titles) => Err(Error::malformed(format!(
                "header row has {} cells, expected 2",
                titles.len()
            ))),
        }
    }

    /// Running-counter assignment over every cell of the body.
    ///
    /// A cell with element children is always a description. A flat cell is a
    /// code when the counter is even and a description otherwise. The counter
    /// advances once per cell, whichever branch was taken, and is never reset
    /// between rows.
    fn rows_by_parity(&self, tbody: &Handle) -> Result<Vec<Row>> {
        let mut codes = Vec::new();
        let mut descriptions = Vec::new();
        let mut counter = 0usize;

        for row in element_children(tbody) {
            for cell in element_children(&row) {
                if has_element_children(&cell) {
                    descriptions.push(self.bullets.classify(&cell)?);
                } else {
                    let text = self.flat_text(&cell);
                    if counter % 2 == 0 {
                        codes.push(text);
                    } else {
                        descriptions.push(CellContent::text(text));
                    }
                }
                counter += 1;
            }
        }

        pair(codes, descriptions)
    }

    /// Explicit assignment: every row holds a code cell and a description cell.
    fn rows_per_row(&self, tbody: &Handle) -> Result<Vec<Row>> {
        element_children(tbody)
            .iter()
            .enumerate()
            .map(|(index, row)| {
                let cells = element_children(row);
                match cells.as_slice() {
                    [code, description] => Ok(Row::new(
                        self.flat_text(code),
                        self.bullets.classify(description)?,
                    )),
                    _ => Err(Error::malformed(format!(
                        "body row {} has {} cells, expected 2",
                        index + 1,
                        cells.len()
                    ))),
                }
            })
            .collect()
    }

    fn flat_text(&self, cell: &Handle) -> String {
        clean(text_content(cell), self.options.normalize_text)
    }
}

impl Default for TableExtractor {
    fn default() -> Self {
        Self::new(ParseOptions::default())
    }
}

/// The `<tbody>` of the table owning `thead`.
///
/// Bodies of other tables on the page never belong to this header.
fn find_body(thead: &Handle) -> Option<Handle> {
    let table = parent(thead)?;
    element_children(&table)
        .into_iter()
        .find(|c| tag_of(c) == Some("tbody"))
}

fn pair(codes: Vec<String>, descriptions: Vec<CellContent>) -> Result<Vec<Row>> {
    if codes.len() != descriptions.len() {
        return Err(Error::malformed(format!(
            "body has {} codes but {} descriptions",
            codes.len(),
            descriptions.len()
        )));
    }

    Ok(codes
        .into_iter()
        .zip(descriptions)
        .map(|(code, description)| Row { code, description })
        .collect())
}

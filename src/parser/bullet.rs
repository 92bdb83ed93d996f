//! Bulleted-list cell formatting.

use markup5ever_rcdom::Handle;

use crate::error::{Error, Result};
use crate::model::CellContent;

use super::markup::{children_by_tag, text_content, text_content_excluding};
use super::options::ErrorMode;
use super::text::clean;

const LIST_TAGS: &[&str] = &["ul", "ol"];

/// Turns a cell holding an intro paragraph and a nested unordered list into
/// [`CellContent::BulletList`].
///
/// Only the direct `<li>` children of the first nested `<ul>` are items;
/// deeper lists are not descended into.
#[derive(Debug, Clone, Copy)]
pub struct BulletFormatter {
    error_mode: ErrorMode,
    normalize_text: bool,
}

impl BulletFormatter {
    /// Create a new formatter.
    pub fn new(error_mode: ErrorMode, normalize_text: bool) -> Self {
        Self {
            error_mode,
            normalize_text,
        }
    }

    /// Check if a cell carries a nested unordered list.
    pub fn is_bullet_cell(cell: &Handle) -> bool {
        !children_by_tag(cell, "ul").is_empty()
    }

    /// Classify a structured cell: bullet list when it has a nested `<ul>`,
    /// otherwise its flat text.
    pub fn classify(&self, cell: &Handle) -> Result<CellContent> {
        if Self::is_bullet_cell(cell) {
            self.format(cell)
        } else {
            Ok(CellContent::text(clean(
                text_content(cell),
                self.normalize_text,
            )))
        }
    }

    /// Format a cell known to contain a nested `<ul>`.
    pub fn format(&self, cell: &Handle) -> Result<CellContent> {
        let list = children_by_tag(cell, "ul")
            .into_iter()
            .next()
            .ok_or_else(|| Error::malformed("cell has no nested list"))?;

        let intro = self.intro_text(cell);
        let items: Vec<String> = children_by_tag(&list, "li")
            .iter()
            .map(|li| clean(text_content_excluding(li, LIST_TAGS), self.normalize_text))
            .collect();

        if items.is_empty() {
            match self.error_mode {
                ErrorMode::Strict => {
                    return Err(Error::malformed(format!(
                        "bulleted cell \"{}\" has an empty list",
                        intro
                    )))
                }
                ErrorMode::Lenient => {
                    log::warn!("Bulleted cell \"{}\" has no items, keeping intro only", intro);
                    return Ok(CellContent::text(intro));
                }
            }
        }

        log::debug!("Bulleted cell with {} items", items.len());
        Ok(CellContent::BulletList { intro, items })
    }

    /// Text of the `<p>` children, or of everything but the lists when the
    /// cell has no paragraphs.
    fn intro_text(&self, cell: &Handle) -> String {
        let paragraphs = children_by_tag(cell, "p");
        let raw = if paragraphs.is_empty() {
            text_content_excluding(cell, LIST_TAGS)
        } else {
            paragraphs.iter().map(text_content).collect::<String>()
        };
        clean(raw, self.normalize_text)
    }
}

impl Default for BulletFormatter {
    fn default() -> Self {
        Self::new(ErrorMode::Strict, true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::markup::Markup;

    fn first_cell(html: &str) -> (Markup, Handle) {
        let markup = Markup::parse(html).unwrap();
        let cell = markup.find_first("td").unwrap();
        (markup, cell)
    }

    #[test]
    fn test_format_intro_and_items() {
        let (_m, cell) = first_cell(
            "<table><tr><td><p>Lorem</p><ul><li><span>a</span></li><li><span>b</span></li></ul></td></tr></table>",
        );
        let content = BulletFormatter::default().format(&cell).unwrap();
        assert_eq!(content, CellContent::bullets("Lorem", ["a", "b"]));
        assert_eq!(content.render_text(), "Lorem\n- a\n- b\n");
    }

    #[test]
    fn test_nested_lists_are_not_descended() {
        let (_m, cell) = first_cell(
            "<table><tr><td><p>Intro</p><ul><li>top<ul><li>deep</li></ul></li><li>next</li></ul></td></tr></table>",
        );
        let content = BulletFormatter::default().format(&cell).unwrap();
        assert_eq!(content, CellContent::bullets("Intro", ["top", "next"]));
    }

    #[test]
    fn test_intro_without_paragraph() {
        let (_m, cell) =
            first_cell("<table><tr><td>Causes: <ul><li>one</li></ul></td></tr></table>");
        let content = BulletFormatter::default().format(&cell).unwrap();
        assert_eq!(content, CellContent::bullets("Causes:", ["one"]));
    }

    #[test]
    fn test_empty_list_strict() {
        let (_m, cell) = first_cell("<table><tr><td><p>Nothing</p><ul></ul></td></tr></table>");
        let result = BulletFormatter::default().format(&cell);
        assert!(matches!(result, Err(Error::MalformedInput(_))));
    }

    #[test]
    fn test_empty_list_lenient() {
        let (_m, cell) = first_cell("<table><tr><td><p>Nothing</p><ul></ul></td></tr></table>");
        let content = BulletFormatter::new(ErrorMode::Lenient, true)
            .format(&cell)
            .unwrap();
        assert_eq!(content, CellContent::text("Nothing"));
    }

    #[test]
    fn test_classify_structured_without_list() {
        let (_m, cell) = first_cell("<table><tr><td><p>Only <b>text</b></p></td></tr></table>");
        let formatter = BulletFormatter::default();
        assert!(!BulletFormatter::is_bullet_cell(&cell));
        assert_eq!(
            formatter.classify(&cell).unwrap(),
            CellContent::text("Only text")
        );
    }
}

//! Wiki page parser using html5ever.

use std::io::Read;
use std::path::Path;

use crate::detect::{detect_format_from_bytes, detect_format_from_path};
use crate::error::Result;
use crate::model::{Table, WikiPage};

use super::markup::{element_children, text_content, Markup};
use super::options::ParseOptions;
use super::table_extractor::TableExtractor;
use super::text::clean;

/// Wiki page parser.
pub struct HtmlParser {
    markup: Markup,
    options: ParseOptions,
}

impl HtmlParser {
    /// Open an HTML file.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        Self::open_with_options(path, ParseOptions::default())
    }

    /// Open an HTML file with custom options.
    pub fn open_with_options<P: AsRef<Path>>(path: P, options: ParseOptions) -> Result<Self> {
        let path = path.as_ref();

        let format = detect_format_from_path(path)?;
        log::debug!("Reading {} from {}", format, path.display());

        let data = std::fs::read(path)?;
        let markup = Markup::parse_bytes(&data)?;
        Ok(Self { markup, options })
    }

    /// Parse a page from bytes.
    pub fn from_bytes(data: &[u8]) -> Result<Self> {
        Self::from_bytes_with_options(data, ParseOptions::default())
    }

    /// Parse a page from bytes with custom options.
    pub fn from_bytes_with_options(data: &[u8], options: ParseOptions) -> Result<Self> {
        detect_format_from_bytes(data)?;
        let markup = Markup::parse_bytes(data)?;
        Ok(Self { markup, options })
    }

    /// Parse a page from a string.
    pub fn from_html(html: &str) -> Result<Self> {
        Self::from_bytes(html.as_bytes())
    }

    /// Parse a page from a string with custom options.
    pub fn from_html_with_options(html: &str, options: ParseOptions) -> Result<Self> {
        Self::from_bytes_with_options(html.as_bytes(), options)
    }

    /// Parse a page from a reader.
    pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
        Self::from_reader_with_options(reader, ParseOptions::default())
    }

    /// Parse a page from a reader with custom options.
    pub fn from_reader_with_options<R: Read>(mut reader: R, options: ParseOptions) -> Result<Self> {
        let mut data = Vec::new();
        reader.read_to_end(&mut data)?;
        Self::from_bytes_with_options(&data, options)
    }

    /// Extract the title and the table.
    pub fn parse(&self) -> Result<WikiPage> {
        let table = self.table()?;
        Ok(WikiPage {
            title: self.title(),
            table,
        })
    }

    /// Extract only the table.
    pub fn table(&self) -> Result<Table> {
        TableExtractor::new(self.options.clone()).extract(&self.markup)
    }

    /// Page title.
    ///
    /// Text of the element children of the title element, falling back to the
    /// document `<title>`. Empty titles count as missing.
    pub fn title(&self) -> Option<String> {
        let from_heading = self
            .markup
            .find_by_id(&self.options.title_element_id)
            .map(|heading| {
                element_children(&heading)
                    .iter()
                    .map(text_content)
                    .collect::<String>()
            });
        let from_head = || self.markup.find_first("title").map(|t| text_content(&t));

        from_heading
            .map(|t| clean(t, self.options.normalize_text))
            .filter(|t| !t.trim().is_empty())
            .or_else(|| {
                from_head()
                    .map(|t| clean(t, self.options.normalize_text))
                    .filter(|t| !t.trim().is_empty())
            })
    }

    /// Parse options in use.
    pub fn options(&self) -> &ParseOptions {
        &self.options
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use crate::model::Row;

    const PAGE: &str = r#"<!DOCTYPE html>
<html>
<head><title>Fallback title</title></head>
<body>
  <h1 id="title-text"><a href="/x">Error codes</a></h1>
  <table>
    <thead><tr><th>Code</th><th>Description</th></tr></thead>
    <tbody>
      <tr><td>X1</td><td>d1</td></tr>
    </tbody>
  </table>
</body>
</html>"#;

    #[test]
    fn test_parse_page() {
        let page = HtmlParser::from_html(PAGE).unwrap().parse().unwrap();
        assert_eq!(page.title.as_deref(), Some("Error codes"));
        assert_eq!(page.table.rows, vec![Row::text("X1", "d1")]);
    }

    #[test]
    fn test_title_fallback_to_head() {
        let html = PAGE.replace("id=\"title-text\"", "id=\"other\"");
        let parser = HtmlParser::from_html(&html).unwrap();
        assert_eq!(parser.title().as_deref(), Some("Fallback title"));
    }

    #[test]
    fn test_title_custom_element_id() {
        let html = PAGE.replace("id=\"title-text\"", "id=\"main\"");
        let options = ParseOptions::new().with_title_element_id("main");
        let parser = HtmlParser::from_html_with_options(&html, options).unwrap();
        assert_eq!(parser.title().as_deref(), Some("Error codes"));
    }

    #[test]
    fn test_rejects_non_markup() {
        let result = HtmlParser::from_bytes(b"%PDF-1.4 binary");
        assert!(matches!(result, Err(Error::HtmlParse(_))));
    }

    #[test]
    fn test_from_reader() {
        let parser = HtmlParser::from_reader(PAGE.as_bytes()).unwrap();
        assert_eq!(parser.table().unwrap().row_count(), 1);
    }
}

//! Integration tests for page parsing and table extraction.

use std::io::Write;

use tablemirror::{
    parse_file, parse_file_with_options, parse_html, parse_html_with_options, CellContent, Error,
    HtmlParser, ParseOptions, Row, SourceFormat,
};

const PAGE: &str = r#"<!DOCTYPE html>
<html>
<head><title>Wiki - Error codes</title></head>
<body>
  <h1 id="title-text"><a href="/pages/1">Error codes</a></h1>
  <div class="wiki-content">
    <table class="confluenceTable">
      <thead>
        <tr><th>Code</th><th>Description</th></tr>
      </thead>
      <tbody>
        <tr><td>E100</td><td>Connection refused</td></tr>
        <tr>
          <td>E200</td>
          <td>
            <p>Quota exceeded when</p>
            <ul>
              <li><span>too many requests</span></li>
              <li><span>too much data</span></li>
            </ul>
          </td>
        </tr>
        <tr><td>E300</td><td>Unknown</td></tr>
      </tbody>
    </table>
  </div>
</body>
</html>"#;

#[test]
fn test_full_page() {
    let page = parse_html(PAGE).unwrap();

    assert_eq!(page.title.as_deref(), Some("Error codes"));
    assert_eq!(page.table.titles(), ["Code", "Description"]);
    assert_eq!(
        page.table.rows,
        vec![
            Row::text("E100", "Connection refused"),
            Row::new(
                "E200",
                CellContent::bullets("Quota exceeded when", ["too many requests", "too much data"])
            ),
            Row::text("E300", "Unknown"),
        ]
    );
}

#[test]
fn test_bullet_cell_rendering() {
    let page = parse_html(PAGE).unwrap();
    assert_eq!(
        page.table.rows[1].description.render_text(),
        "Quota exceeded when\n- too many requests\n- too much data\n"
    );
}

#[test]
fn test_per_row_matches_parity_on_regular_tables() {
    let parity = parse_html(PAGE).unwrap();
    let per_row = parse_html_with_options(PAGE, ParseOptions::new().per_row()).unwrap();
    assert_eq!(parity.table, per_row.table);
}

#[test]
fn test_parity_counter_runs_across_rows() {
    // The structured first cell takes the description slot while still
    // advancing the counter, so the next flat cell is read as a description.
    let html = "<table><thead><tr><th>A</th><th>B</th></tr></thead><tbody>\
        <tr><td><p>intro</p><ul><li>x</li></ul></td><td>C1</td></tr>\
        <tr><td>C2</td><td>d2</td></tr>\
        </tbody></table>";

    let err = parse_html(html).unwrap_err();
    assert!(matches!(err, Error::MalformedInput(_)));
    assert!(err.to_string().contains("codes but"));
}

#[test]
fn test_title_fallback_to_document_title() {
    let html = "<html><head><title>Fallback</title></head><body>\
        <table><thead><tr><th>A</th><th>B</th></tr></thead><tbody></tbody></table>\
        </body></html>";
    let page = parse_html(html).unwrap();
    assert_eq!(page.title.as_deref(), Some("Fallback"));
    assert!(page.table.is_empty());
}

#[test]
fn test_custom_title_element() {
    let html = "<h2 id=\"page-name\"><span>Custom</span></h2>\
        <table><thead><tr><th>A</th><th>B</th></tr></thead></table>";
    let options = ParseOptions::new().with_title_element_id("page-name");
    let page = parse_html_with_options(html, options).unwrap();
    assert_eq!(page.title.as_deref(), Some("Custom"));
}

#[test]
fn test_missing_header() {
    let html = "<table><tbody><tr><td>X1</td><td>d1</td></tr></tbody></table>";
    let err = parse_html(html).unwrap_err();
    assert!(matches!(err, Error::MalformedInput(_)));
}

#[test]
fn test_three_header_cells() {
    let html = "<table><thead><tr><th>A</th><th>B</th><th>C</th></tr></thead></table>";
    let err = parse_html(html).unwrap_err();
    assert!(err.to_string().contains("3 cells"));
}

#[test]
fn test_empty_bullet_list_strict_and_lenient() {
    let html = "<table><thead><tr><th>A</th><th>B</th></tr></thead><tbody>\
        <tr><td>X1</td><td><p>intro</p><ul></ul></td></tr>\
        </tbody></table>";

    assert!(parse_html(html).is_err());

    let page = parse_html_with_options(html, ParseOptions::new().lenient()).unwrap();
    assert_eq!(page.table.rows, vec![Row::text("X1", "intro")]);
}

#[test]
fn test_raw_text_keeps_whitespace() {
    let html = "<table><thead><tr><th>A</th><th>B</th></tr></thead><tbody>\
        <tr><td>X1</td><td>two  spaces</td></tr>\
        </tbody></table>";

    let normalized = parse_html(html).unwrap();
    assert_eq!(normalized.table.rows[0].description, CellContent::text("two spaces"));

    let raw = parse_html_with_options(html, ParseOptions::new().raw_text()).unwrap();
    assert_eq!(raw.table.rows[0].description, CellContent::text("two  spaces"));
}

#[test]
fn test_parse_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(PAGE.as_bytes()).unwrap();

    let page = parse_file(file.path()).unwrap();
    assert_eq!(page.table.row_count(), 3);

    let page = parse_file_with_options(file.path(), ParseOptions::new().per_row()).unwrap();
    assert_eq!(page.table.row_count(), 3);
}

#[test]
fn test_parse_missing_file() {
    let err = parse_file("/nonexistent/page.html").unwrap_err();
    assert!(matches!(err, Error::Io(_)));
}

#[test]
fn test_non_markup_bytes_rejected() {
    let result = HtmlParser::from_bytes(b"%PDF-1.7 binary");
    assert!(matches!(result, Err(Error::HtmlParse(_))));
}

#[test]
fn test_leading_text_before_table() {
    let html = "Codes list <table><thead><tr><th>Code</th><th>Description</th></tr></thead>\
        <tbody><tr><td>X1</td><td>d1</td></tr></tbody></table>";
    let page = parse_html(html).unwrap();
    assert_eq!(page.table.rows, vec![Row::text("X1", "d1")]);
}

#[test]
fn test_text_without_table_is_malformed() {
    let err = parse_html("not a table at all").unwrap_err();
    assert!(matches!(err, Error::MalformedInput(_)));
}

#[test]
fn test_detect_document_kind() {
    assert_eq!(
        tablemirror::detect_format_from_bytes(PAGE.as_bytes()).unwrap(),
        SourceFormat::HtmlDocument
    );
    assert_eq!(
        tablemirror::detect_format_from_bytes(b"<table></table>").unwrap(),
        SourceFormat::Fragment
    );
}

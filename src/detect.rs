//! Source format detection.
//!
//! Wiki pages arrive either from disk or over HTTP; before building a DOM we
//! make sure the payload is not a binary export or a JSON error body returned
//! by the server. Anything else goes to the HTML parser, which accepts loose
//! text around the markup.

use crate::error::{Error, Result};
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

/// UTF-8 byte order mark.
const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

/// How many leading bytes are inspected.
const SNIFF_LEN: usize = 512;

/// Leading bytes of payloads that are never a wiki page.
const NON_MARKUP_SIGNATURES: &[(&[u8], &str)] = &[
    (b"%PDF", "PDF"),
    (b"PK\x03\x04", "ZIP archive"),
    (b"\x89PNG", "PNG image"),
    (b"GIF8", "GIF image"),
    (b"\xFF\xD8\xFF", "JPEG image"),
    (b"{", "JSON"),
    (b"[", "JSON"),
];

/// Markup flavour recognized at the start of the input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceFormat {
    /// Starts with `<!DOCTYPE html`
    HtmlDocument,
    /// Starts with `<html`
    HtmlRoot,
    /// Some other markup, possibly preceded by loose text (a page fragment)
    Fragment,
}

impl std::fmt::Display for SourceFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SourceFormat::HtmlDocument => write!(f, "HTML document"),
            SourceFormat::HtmlRoot => write!(f, "HTML"),
            SourceFormat::Fragment => write!(f, "HTML fragment"),
        }
    }
}

/// Detect the source format from a file path.
pub fn detect_format_from_path<P: AsRef<Path>>(path: P) -> Result<SourceFormat> {
    let file = File::open(path)?;
    let mut reader = BufReader::new(file).take(SNIFF_LEN as u64);
    let mut header = Vec::with_capacity(SNIFF_LEN);
    reader.read_to_end(&mut header)?;
    detect_format_from_bytes(&header)
}

/// Detect the source format from the leading bytes of the input.
///
/// # Returns
/// * `Ok(SourceFormat)` for anything that may hold markup
/// * `Err(Error::HtmlParse)` for empty input or a known non-markup payload
pub fn detect_format_from_bytes(data: &[u8]) -> Result<SourceFormat> {
    let data = data.strip_prefix(UTF8_BOM).unwrap_or(data);
    let start = data
        .iter()
        .position(|b| !b.is_ascii_whitespace())
        .ok_or_else(|| Error::HtmlParse("input is empty".into()))?;
    let head = &data[start..data.len().min(start + SNIFF_LEN)];

    if let Some((_, kind)) = NON_MARKUP_SIGNATURES
        .iter()
        .find(|(signature, _)| head.starts_with(signature))
    {
        return Err(Error::HtmlParse(format!("input is {}, not markup", kind)));
    }

    let lower = head.to_ascii_lowercase();
    if lower.starts_with(b"<!doctype html") {
        Ok(SourceFormat::HtmlDocument)
    } else if lower.starts_with(b"<html") {
        Ok(SourceFormat::HtmlRoot)
    } else {
        Ok(SourceFormat::Fragment)
    }
}

/// Check if bytes look like HTML.
pub fn is_html_bytes(data: &[u8]) -> bool {
    detect_format_from_bytes(data).is_ok()
}

/// Check if a file looks like HTML.
pub fn is_html<P: AsRef<Path>>(path: P) -> bool {
    detect_format_from_path(path).is_ok()
}

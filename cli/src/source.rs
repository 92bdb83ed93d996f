//! Loading the source page from a URL or a local file

use std::fs;
use std::path::Path;
use std::time::Duration;

use reqwest::blocking::Client;
use tablemirror::{Error, Result, SyncStage};

const FETCH_TIMEOUT: Duration = Duration::from_secs(30);

/// Check if the source should be downloaded rather than read from disk
pub fn is_url(source: &str) -> bool {
    let lower = source.to_ascii_lowercase();
    lower.starts_with("http://") || lower.starts_with("https://")
}

/// Read the page bytes from `source`
pub fn load(source: &str) -> Result<Vec<u8>> {
    if is_url(source) {
        fetch(source)
    } else {
        log::debug!("Reading source file {}", source);
        Ok(fs::read(Path::new(source))?)
    }
}

fn fetch(url: &str) -> Result<Vec<u8>> {
    log::info!("Fetching {}", url);
    let client = Client::builder()
        .timeout(FETCH_TIMEOUT)
        .build()
        .map_err(|e| Error::remote(SyncStage::FetchSource, e))?;

    let response = client
        .get(url)
        .send()
        .map_err(|e| Error::remote(SyncStage::FetchSource, e))?;

    let status = response.status();
    if !status.is_success() {
        return Err(Error::remote(
            SyncStage::FetchSource,
            format!("HTTP {} from {}", status, url),
        ));
    }

    let bytes = response
        .bytes()
        .map_err(|e| Error::remote(SyncStage::FetchSource, e))?;
    Ok(bytes.to_vec())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_is_url() {
        assert!(is_url("https://wiki.example.com/pages/viewpage.action?pageId=1"));
        assert!(is_url("HTTP://host/page"));
        assert!(!is_url("page.html"));
        assert!(!is_url("/tmp/https.html"));
    }

    #[test]
    fn test_load_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"<table></table>").unwrap();
        let data = load(file.path().to_str().unwrap()).unwrap();
        assert_eq!(data, b"<table></table>");
    }

    #[test]
    fn test_load_missing_file() {
        assert!(matches!(load("/nonexistent/page.html"), Err(Error::Io(_))));
    }
}

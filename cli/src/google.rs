//! Google Drive and Docs implementation of the document service

use reqwest::blocking::{Client, RequestBuilder, Response};
use reqwest::header::CONTENT_TYPE;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::time::Duration;

use tablemirror::render::BatchUpdateRequest;
use tablemirror::{DocumentService, Error, Result, SyncStage};

const DRIVE_FILES_URL: &str = "https://www.googleapis.com/drive/v3/files";
const DRIVE_UPLOAD_URL: &str = "https://www.googleapis.com/upload/drive/v3/files";
const DOCS_URL: &str = "https://docs.googleapis.com/v1/documents";
const DOCUMENT_MIME_TYPE: &str = "application/vnd.google-apps.document";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(60);

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct FileList {
    #[serde(default)]
    files: Vec<FileEntry>,
    next_page_token: Option<String>,
}

#[derive(Deserialize)]
struct FileEntry {
    id: String,
    #[serde(default)]
    name: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct NewFile<'a> {
    name: &'a str,
    mime_type: &'a str,
}

#[derive(Serialize)]
struct Permission<'a> {
    #[serde(rename = "type")]
    kind: &'a str,
    role: &'a str,
}

/// Drive v3 + Docs v1 over HTTPS, authorized with an OAuth access token
pub struct GoogleDocs {
    client: Client,
    token: String,
}

impl GoogleDocs {
    /// Create a client using a bearer access token
    pub fn new(token: impl Into<String>) -> Result<Self> {
        let client = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| Error::Other(format!("Cannot build HTTP client: {}", e)))?;
        Ok(Self {
            client,
            token: token.into(),
        })
    }

    fn send(&self, stage: SyncStage, request: RequestBuilder) -> Result<Response> {
        let response = request
            .bearer_auth(&self.token)
            .send()
            .map_err(|e| Error::remote(stage, e))?;

        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().unwrap_or_default();
        Err(Error::remote(
            stage,
            format!("HTTP {}: {}", status, body.trim()),
        ))
    }

    fn send_json<T: DeserializeOwned>(&self, stage: SyncStage, request: RequestBuilder) -> Result<T> {
        self.send(stage, request)?
            .json()
            .map_err(|e| Error::remote(stage, e))
    }
}

/// Quote a value for a Drive `q` expression
fn quote_query(value: &str) -> String {
    format!("'{}'", value.replace('\\', "\\\\").replace('\'', "\\'"))
}

impl DocumentService for GoogleDocs {
    fn find_document(&self, name: &str) -> Result<Option<String>> {
        let query = format!("name = {} and trashed = false", quote_query(name));
        let mut page_token: Option<String> = None;

        loop {
            let mut request = self.client.get(DRIVE_FILES_URL).query(&[
                ("q", query.as_str()),
                ("fields", "nextPageToken, files(id, name)"),
            ]);
            if let Some(ref token) = page_token {
                request = request.query(&[("pageToken", token.as_str())]);
            }

            let list: FileList = self.send_json(SyncStage::ListFiles, request)?;
            if let Some(file) = list.files.into_iter().find(|f| f.name == name) {
                return Ok(Some(file.id));
            }

            match list.next_page_token {
                Some(next) => page_token = Some(next),
                None => return Ok(None),
            }
        }
    }

    fn create_document(&self, name: &str) -> Result<String> {
        let request = self.client.post(DRIVE_FILES_URL).json(&NewFile {
            name,
            mime_type: DOCUMENT_MIME_TYPE,
        });
        let file: FileEntry = self.send_json(SyncStage::CreateDocument, request)?;
        Ok(file.id)
    }

    fn grant_public_read(&self, document_id: &str) -> Result<()> {
        let url = format!("{}/{}/permissions", DRIVE_FILES_URL, document_id);
        let request = self.client.post(url).json(&Permission {
            kind: "anyone",
            role: "reader",
        });
        self.send(SyncStage::GrantPermission, request)?;
        Ok(())
    }

    fn clear_document(&self, document_id: &str) -> Result<()> {
        let url = format!("{}/{}", DRIVE_UPLOAD_URL, document_id);
        let request = self
            .client
            .patch(url)
            .query(&[("uploadType", "media")])
            .header(CONTENT_TYPE, "text/plain")
            .body("");
        self.send(SyncStage::ClearDocument, request)?;
        Ok(())
    }

    fn batch_update(&self, document_id: &str, request: &BatchUpdateRequest) -> Result<()> {
        let url = format!("{}/{}:batchUpdate", DOCS_URL, document_id);
        self.send(SyncStage::BatchUpdate, self.client.post(url).json(request))?;
        Ok(())
    }
}

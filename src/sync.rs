//! Mirroring a table into a remote document.
//!
//! The remote side is reached through [`DocumentService`]; [`SyncDriver`]
//! resolves the target document by name, empties it and submits the whole
//! edit plan as one batch.
//!
//! # Example
//!
//! ```no_run
//! use tablemirror::sync::{DocumentService, SyncDriver};
//! use tablemirror::{HtmlParser, Result};
//!
//! fn mirror<S: DocumentService>(service: S, html: &str) -> Result<()> {
//!     let page = HtmlParser::from_html(html)?.parse()?;
//!     let title = page.title.clone().unwrap_or_else(|| "Table".to_string());
//!     let report = SyncDriver::new(service).mirror(&title, &page.table)?;
//!     println!("{} operations sent to {}", report.operation_count, report.document_id);
//!     Ok(())
//! }
//! ```

use crate::error::{Error, Result};
use crate::model::{EditPlan, Table};
use crate::plan::{build_plan, check_shifts};
use crate::render::{to_batch_request, BatchUpdateRequest};

/// Remote file and document operations needed to mirror a table.
///
/// Implementations report failures as [`Error::Remote`] tagged with the
/// matching [`SyncStage`](crate::error::SyncStage).
pub trait DocumentService {
    /// Find a document whose name is exactly `name`.
    fn find_document(&self, name: &str) -> Result<Option<String>>;

    /// Create an empty document and return its id.
    fn create_document(&self, name: &str) -> Result<String>;

    /// Let anyone with the link read the document.
    fn grant_public_read(&self, document_id: &str) -> Result<()>;

    /// Remove all content from the document.
    fn clear_document(&self, document_id: &str) -> Result<()>;

    /// Apply a batch of requests atomically.
    fn batch_update(&self, document_id: &str, request: &BatchUpdateRequest) -> Result<()>;
}

impl<T: DocumentService + ?Sized> DocumentService for &T {
    fn find_document(&self, name: &str) -> Result<Option<String>> {
        (**self).find_document(name)
    }

    fn create_document(&self, name: &str) -> Result<String> {
        (**self).create_document(name)
    }

    fn grant_public_read(&self, document_id: &str) -> Result<()> {
        (**self).grant_public_read(document_id)
    }

    fn clear_document(&self, document_id: &str) -> Result<()> {
        (**self).clear_document(document_id)
    }

    fn batch_update(&self, document_id: &str, request: &BatchUpdateRequest) -> Result<()> {
        (**self).batch_update(document_id, request)
    }
}

/// Outcome of a successful sync.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyncReport {
    /// Id of the document that now holds the table
    pub document_id: String,
    /// Whether the document was created by this run
    pub created: bool,
    /// Number of requests submitted, empty text insertions excluded
    pub operation_count: usize,
}

/// Drives a [`DocumentService`] through resolve, clear and submit.
pub struct SyncDriver<S> {
    service: S,
}

impl<S: DocumentService> SyncDriver<S> {
    /// Create a driver over a service.
    pub fn new(service: S) -> Self {
        Self { service }
    }

    /// The underlying service.
    pub fn service(&self) -> &S {
        &self.service
    }

    /// Build the plan for `table` and mirror it into the document named `title`.
    pub fn mirror(&self, title: &str, table: &Table) -> Result<SyncReport> {
        let plan = build_plan(table)?;
        self.sync(title, &plan)
    }

    /// Mirror an already built plan into the document named `title`.
    ///
    /// The plan is validated before any remote call, so a bad plan never
    /// touches the document. Empty text insertions are left out of the batch:
    /// the service rejects them and they shift nothing.
    pub fn sync(&self, title: &str, plan: &EditPlan) -> Result<SyncReport> {
        if title.trim().is_empty() {
            return Err(Error::malformed("document title is empty"));
        }
        plan.check_ordering()?;
        check_shifts(plan)?;

        let (document_id, created) = self.resolve(title)?;

        log::info!("Clearing document {}", document_id);
        self.service.clear_document(&document_id)?;

        let request = to_batch_request(plan).without_empty_insertions();
        log::info!(
            "Submitting {} operations to document {}",
            request.len(),
            document_id
        );
        self.service.batch_update(&document_id, &request)?;

        Ok(SyncReport {
            document_id,
            created,
            operation_count: request.len(),
        })
    }

    /// Find the document by name, or create and share a new one.
    ///
    /// Returns the id and whether it was created.
    pub fn resolve(&self, title: &str) -> Result<(String, bool)> {
        if let Some(id) = self.service.find_document(title)? {
            log::info!("Reusing document \"{}\" ({})", title, id);
            return Ok((id, false));
        }

        let id = self.service.create_document(title)?;
        log::info!("Created document \"{}\" ({})", title, id);
        self.service.grant_public_read(&id)?;
        Ok((id, true))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SyncStage;
    use crate::model::Row;
    use std::cell::RefCell;

    #[derive(Default)]
    struct Recorder {
        existing: Option<String>,
        fail_at: Option<SyncStage>,
        calls: RefCell<Vec<String>>,
    }

    impl Recorder {
        fn step(&self, stage: SyncStage, call: String) -> Result<()> {
            self.calls.borrow_mut().push(call);
            if self.fail_at == Some(stage) {
                return Err(Error::remote(stage, "boom"));
            }
            Ok(())
        }
    }

    impl DocumentService for Recorder {
        fn find_document(&self, name: &str) -> Result<Option<String>> {
            self.step(SyncStage::ListFiles, format!("find {}", name))?;
            Ok(self.existing.clone())
        }

        fn create_document(&self, name: &str) -> Result<String> {
            self.step(SyncStage::CreateDocument, format!("create {}", name))?;
            Ok("new-id".into())
        }

        fn grant_public_read(&self, document_id: &str) -> Result<()> {
            self.step(SyncStage::GrantPermission, format!("share {}", document_id))
        }

        fn clear_document(&self, document_id: &str) -> Result<()> {
            self.step(SyncStage::ClearDocument, format!("clear {}", document_id))
        }

        fn batch_update(&self, document_id: &str, request: &BatchUpdateRequest) -> Result<()> {
            self.step(
                SyncStage::BatchUpdate,
                format!("update {} {}", document_id, request.len()),
            )
        }
    }

    fn table() -> Table {
        Table::new("Code", "Description").with_row(Row::text("X1", "d1"))
    }

    #[test]
    fn test_sync_creates_and_shares() {
        let driver = SyncDriver::new(Recorder::default());
        let report = driver.mirror("Codes", &table()).unwrap();

        assert!(report.created);
        assert_eq!(report.document_id, "new-id");
        assert_eq!(report.operation_count, 5);
        assert_eq!(
            *driver.service().calls.borrow(),
            vec![
                "find Codes",
                "create Codes",
                "share new-id",
                "clear new-id",
                "update new-id 5"
            ]
        );
    }

    #[test]
    fn test_sync_reuses_existing() {
        let service = Recorder {
            existing: Some("old-id".into()),
            ..Default::default()
        };
        let driver = SyncDriver::new(&service);
        let report = driver.mirror("Codes", &table()).unwrap();

        assert!(!report.created);
        assert_eq!(
            *service.calls.borrow(),
            vec!["find Codes", "clear old-id", "update old-id 5"]
        );
    }

    #[test]
    fn test_failure_stops_pipeline() {
        let service = Recorder {
            fail_at: Some(SyncStage::ClearDocument),
            ..Default::default()
        };
        let err = SyncDriver::new(&service)
            .mirror("Codes", &table())
            .unwrap_err();

        assert_eq!(err.stage(), Some(SyncStage::ClearDocument));
        assert!(!service.calls.borrow().iter().any(|c| c.starts_with("update")));
    }

    #[test]
    fn test_bad_plan_never_reaches_service() {
        let service = Recorder::default();
        let plan = EditPlan::new(vec![crate::model::EditOperation::insert_text("x", 5)]);
        assert!(SyncDriver::new(&service).sync("Codes", &plan).is_err());
        assert!(service.calls.borrow().is_empty());
    }

    #[test]
    fn test_empty_insertions_not_submitted() {
        let service = Recorder::default();
        let table = Table::new("Code", "").with_row(Row::text("X1", ""));
        let report = SyncDriver::new(&service).mirror("Codes", &table).unwrap();

        assert_eq!(report.operation_count, 3);
        assert_eq!(service.calls.borrow().last().unwrap(), "update new-id 3");
    }

    #[test]
    fn test_empty_title() {
        let service = Recorder::default();
        let err = SyncDriver::new(&service).mirror(" ", &table()).unwrap_err();
        assert!(matches!(err, Error::MalformedInput(_)));
        assert!(service.calls.borrow().is_empty());
    }
}

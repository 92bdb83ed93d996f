//! Data model shared by extraction, planning and rendering.
//!
//! A [`Table`] is extracted once from the source markup; an [`EditPlan`] is
//! derived from it and submitted as one batch to the document service.

mod page;
mod plan;
mod table;

pub use page::WikiPage;
pub use plan::{Anchor, EditOperation, EditPlan};
pub use table::{CellContent, Row, Table, BULLET_PREFIX};

//! Edit operation types.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};

/// Where a table is inserted in the target document.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Anchor {
    /// End of the document body
    #[default]
    EndOfSegment,
}

/// One atomic instruction of a batch submitted to the document service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum EditOperation {
    /// Create an empty grid of cells
    InsertTable {
        /// Row count including the header row
        rows: usize,
        /// Column count
        columns: usize,
        /// Insertion point of the table
        anchor: Anchor,
    },
    /// Insert text at a position of the document's linear coordinate space
    InsertText {
        /// Text to insert
        text: String,
        /// Offset, valid against the state left by all preceding operations
        offset: usize,
    },
}

impl EditOperation {
    /// Create a table insertion anchored at the end of the document.
    pub fn insert_table(rows: usize, columns: usize) -> Self {
        EditOperation::InsertTable {
            rows,
            columns,
            anchor: Anchor::EndOfSegment,
        }
    }

    /// Create a text insertion.
    pub fn insert_text(text: impl Into<String>, offset: usize) -> Self {
        EditOperation::InsertText {
            text: text.into(),
            offset,
        }
    }

    /// Offset of a text insertion.
    pub fn offset(&self) -> Option<usize> {
        match self {
            EditOperation::InsertText { offset, .. } => Some(*offset),
            EditOperation::InsertTable { .. } => None,
        }
    }
}

/// Ordered sequence of edit operations, applied strictly in order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EditPlan {
    operations: Vec<EditOperation>,
}

impl EditPlan {
    /// Wrap an operation sequence.
    pub fn new(operations: Vec<EditOperation>) -> Self {
        Self { operations }
    }

    /// Operations in application order.
    pub fn operations(&self) -> &[EditOperation] {
        &self.operations
    }

    /// Iterate over the operations.
    pub fn iter(&self) -> std::slice::Iter<'_, EditOperation> {
        self.operations.iter()
    }

    /// Number of operations.
    pub fn len(&self) -> usize {
        self.operations.len()
    }

    /// Check if the plan is empty.
    pub fn is_empty(&self) -> bool {
        self.operations.is_empty()
    }

    /// Text insertions as `(text, offset)` pairs, in order.
    pub fn text_insertions(&self) -> impl Iterator<Item = (&str, usize)> {
        self.operations.iter().filter_map(|op| match op {
            EditOperation::InsertText { text, offset } => Some((text.as_str(), *offset)),
            EditOperation::InsertTable { .. } => None,
        })
    }

    /// Verify the plan shape: one leading table insertion followed by text
    /// insertions at strictly descending offsets.
    ///
    /// A strictly descending sequence never touches an offset an earlier
    /// insertion has shifted.
    pub fn check_ordering(&self) -> Result<()> {
        let mut ops = self.operations.iter();
        match ops.next() {
            Some(EditOperation::InsertTable { rows, columns, .. }) if *rows > 0 && *columns > 0 => {}
            Some(EditOperation::InsertTable { .. }) => {
                return Err(Error::InvalidPlanState("table has no cells".into()))
            }
            _ => {
                return Err(Error::InvalidPlanState(
                    "plan must start with a table insertion".into(),
                ))
            }
        }

        let mut previous: Option<usize> = None;
        for op in ops {
            let offset = match op {
                EditOperation::InsertText { offset, .. } => *offset,
                EditOperation::InsertTable { .. } => {
                    return Err(Error::InvalidPlanState(
                        "plan contains more than one table insertion".into(),
                    ))
                }
            };
            if let Some(prev) = previous {
                if offset >= prev {
                    return Err(Error::OffsetViolation {
                        offset,
                        reason: format!("follows an insertion at {}, which shifted it", prev),
                    });
                }
            }
            previous = Some(offset);
        }
        Ok(())
    }
}

impl IntoIterator for EditPlan {
    type Item = EditOperation;
    type IntoIter = std::vec::IntoIter<EditOperation>;

    fn into_iter(self) -> Self::IntoIter {
        self.operations.into_iter()
    }
}

impl<'a> IntoIterator for &'a EditPlan {
    type Item = &'a EditOperation;
    type IntoIter = std::slice::Iter<'a, EditOperation>;

    fn into_iter(self) -> Self::IntoIter {
        self.operations.iter()
    }
}

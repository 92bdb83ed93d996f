//! In-memory model of the target document's linear coordinate space.
//!
//! The document is a flat sequence of positions. Creating a table lays out a
//! fixed grid of structural markers and one empty paragraph break per cell;
//! inserting text at offset `k` places it before position `k` and shifts
//! every later position. Lengths are counted in UTF-16 code units, like the
//! document service does.

use crate::error::{Error, Result};
use crate::model::{EditOperation, EditPlan};

/// Upper bound on the positions a single table may add.
const MAX_TABLE_SLOTS: usize = 1 << 24;

/// One position in the document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Slot {
    /// Structural marker (segment start, table/row/cell start, trailing break)
    Marker,
    /// Paragraph break closing a cell; text for the cell goes right before it
    CellEnd { row: usize, column: usize },
    /// One UTF-16 code unit of cell text
    Text { unit: u16, row: usize, column: usize },
}

/// Replays edit operations against an initially empty document.
#[derive(Debug, Clone)]
pub struct DocumentSimulator {
    slots: Vec<Slot>,
    shape: Option<(usize, usize)>,
}

impl DocumentSimulator {
    /// Create an empty document: a segment start and one empty paragraph.
    pub fn new() -> Self {
        Self {
            slots: vec![Slot::Marker, Slot::Marker],
            shape: None,
        }
    }

    /// Replay a whole plan and return the reconstructed grid.
    pub fn replay(plan: &EditPlan) -> Result<Vec<Vec<String>>> {
        let mut doc = Self::new();
        doc.apply_plan(plan)?;
        Ok(doc.grid())
    }

    /// Apply every operation in order, stopping at the first violation.
    pub fn apply_plan(&mut self, plan: &EditPlan) -> Result<()> {
        for (index, op) in plan.iter().enumerate() {
            self.apply(op).map_err(|e| {
                log::debug!("Operation {} rejected: {}", index, e);
                e
            })?;
        }
        Ok(())
    }

    /// Apply one operation.
    pub fn apply(&mut self, op: &EditOperation) -> Result<()> {
        match op {
            EditOperation::InsertTable { rows, columns, .. } => self.insert_table(*rows, *columns),
            EditOperation::InsertText { text, offset } => self.insert_text(text, *offset),
        }
    }

    /// Document length in positions.
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    /// Check if the document holds nothing but its initial structure.
    pub fn is_empty(&self) -> bool {
        self.shape.is_none()
    }

    /// Table shape as `(rows, columns)`, once a table exists.
    pub fn shape(&self) -> Option<(usize, usize)> {
        self.shape
    }

    /// Cell texts, row by row. Empty when no table was inserted.
    pub fn grid(&self) -> Vec<Vec<String>> {
        let Some((rows, columns)) = self.shape else {
            return Vec::new();
        };

        let mut units = vec![vec![Vec::<u16>::new(); columns]; rows];
        for slot in &self.slots {
            if let Slot::Text { unit, row, column } = *slot {
                units[row][column].push(unit);
            }
        }

        units
            .into_iter()
            .map(|row| {
                row.into_iter()
                    .map(|cell| String::from_utf16_lossy(&cell))
                    .collect()
            })
            .collect()
    }

    fn insert_table(&mut self, rows: usize, columns: usize) -> Result<()> {
        if self.shape.is_some() {
            return Err(Error::InvalidPlanState(
                "document already holds a table".into(),
            ));
        }
        if rows == 0 || columns == 0 {
            return Err(Error::InvalidPlanState(format!(
                "cannot create a {}x{} table",
                rows, columns
            )));
        }

        // A fresh paragraph break and the table start go before the final
        // paragraph break, followed by the rows and the table end.
        let size = columns
            .checked_mul(2)
            .and_then(|cells| cells.checked_add(1))
            .and_then(|per_row| per_row.checked_mul(rows))
            .and_then(|body| body.checked_add(3))
            .filter(|size| *size <= MAX_TABLE_SLOTS)
            .ok_or_else(|| {
                Error::InvalidPlanState(format!(
                    "a {}x{} table is too large to simulate",
                    rows, columns
                ))
            })?;

        let end = self.slots.len() - 1;
        let mut layout = Vec::with_capacity(size);
        layout.push(Slot::Marker);
        layout.push(Slot::Marker);
        for row in 0..rows {
            layout.push(Slot::Marker);
            for column in 0..columns {
                layout.push(Slot::Marker);
                layout.push(Slot::CellEnd { row, column });
            }
        }
        layout.push(Slot::Marker);
        self.slots.splice(end..end, layout);
        self.shape = Some((rows, columns));
        Ok(())
    }

    fn insert_text(&mut self, text: &str, offset: usize) -> Result<()> {
        if self.shape.is_none() {
            return Err(Error::OffsetViolation {
                offset,
                reason: "text inserted before the table exists".into(),
            });
        }

        let (row, column) = match self.slots.get(offset) {
            Some(Slot::CellEnd { row, column }) => (*row, *column),
            Some(Slot::Text { row, column, .. }) => {
                return Err(Error::OffsetViolation {
                    offset,
                    reason: format!("lands inside the text of cell ({}, {})", row, column),
                })
            }
            Some(Slot::Marker) => {
                return Err(Error::OffsetViolation {
                    offset,
                    reason: "not a cell insertion point".into(),
                })
            }
            None => {
                return Err(Error::OffsetViolation {
                    offset,
                    reason: format!("out of range (document length {})", self.slots.len()),
                })
            }
        };

        let filled = offset > 0
            && matches!(
                self.slots[offset - 1],
                Slot::Text { row: r, column: c, .. } if r == row && c == column
            );
        if filled {
            return Err(Error::OffsetViolation {
                offset,
                reason: format!("cell ({}, {}) was already written", row, column),
            });
        }

        let units = text
            .encode_utf16()
            .map(|unit| Slot::Text { unit, row, column });
        self.slots.splice(offset..offset, units);
        Ok(())
    }
}

impl Default for DocumentSimulator {
    fn default() -> Self {
        Self::new()
    }
}

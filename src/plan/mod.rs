//! Edit plan module.
//!
//! Turns a [`Table`](crate::model::Table) into the ordered operations that
//! rebuild it inside an empty document, and checks such plans against the
//! document's shift-on-insert semantics.

mod builder;
mod simulator;

pub use builder::{build_plan, cell_offset, EditPlanBuilder, COLUMN_COUNT};
pub use simulator::DocumentSimulator;

use crate::error::{Error, Result};
use crate::model::{EditOperation, EditPlan};

/// Where `offset` ends up after inserting `len` units at `insert_at`.
///
/// Positions at or after the insertion point move forward; earlier ones stay.
pub fn shift(offset: usize, insert_at: usize, len: usize) -> usize {
    if offset >= insert_at {
        offset + len
    } else {
        offset
    }
}

/// Check that no text insertion shifts the offset of any later insertion.
///
/// Walks the plan backwards keeping the highest offset still to come; an
/// insertion is safe only if shifting that offset leaves it in place.
pub fn check_shifts(plan: &EditPlan) -> Result<()> {
    let mut highest_later: Option<usize> = None;
    for op in plan.operations().iter().rev() {
        if let EditOperation::InsertText { text, offset } = op {
            let len = text.encode_utf16().count();
            if let Some(later) = highest_later {
                if len > 0 && shift(later, *offset, len) != later {
                    return Err(Error::OffsetViolation {
                        offset: later,
                        reason: format!(
                            "shifted by {} units inserted earlier at {}",
                            len, offset
                        ),
                    });
                }
            }
            highest_later = Some(highest_later.map_or(*offset, |h| h.max(*offset)));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Row, Table};

    #[test]
    fn test_shift() {
        assert_eq!(shift(4, 5, 3), 4);
        assert_eq!(shift(5, 5, 3), 8);
        assert_eq!(shift(9, 5, 3), 12);
        assert_eq!(shift(9, 5, 0), 9);
    }

    #[test]
    fn test_built_plans_survive_their_own_shifts() {
        for n in 0..25 {
            let mut table = Table::new("Code", "Description");
            for i in 0..n {
                table.add_row(Row::text(format!("X{}", i), "d".repeat(i + 1)));
            }
            let plan = build_plan(&table).unwrap();
            check_shifts(&plan).unwrap();
        }
    }

    #[test]
    fn test_ascending_plan_is_caught() {
        let plan = EditPlan::new(vec![
            EditOperation::insert_table(2, 2),
            EditOperation::insert_text("Code", 5),
            EditOperation::insert_text("Description", 7),
            EditOperation::insert_text("X1", 10),
        ]);
        let err = check_shifts(&plan).unwrap_err();
        assert!(matches!(err, Error::OffsetViolation { offset: 10, .. }));
    }

    #[test]
    fn test_empty_text_shifts_nothing() {
        let plan = EditPlan::new(vec![
            EditOperation::insert_table(2, 2),
            EditOperation::insert_text("", 5),
            EditOperation::insert_text("x", 7),
        ]);
        assert!(check_shifts(&plan).is_ok());
    }
}

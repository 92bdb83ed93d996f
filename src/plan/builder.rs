//! Edit plan construction.

use crate::error::{Error, Result};
use crate::model::{EditOperation, EditPlan, Row, Table};

/// Columns of every mirrored table.
pub const COLUMN_COUNT: usize = 2;

/// Offset of the first cell's insertion point right after table creation.
const FIRST_CELL_OFFSET: usize = 5;

/// Distance between the insertion points of two consecutive rows.
const ROW_STRIDE: usize = 5;

/// Distance between the insertion points of two cells in one row.
const CELL_STRIDE: usize = 2;

/// Insertion point of cell (`row`, `column`) in a freshly inserted table.
///
/// Row 0 is the header. Measured before any text has been inserted, so this
/// is `5 + 5 * row` for the code column and `7 + 5 * row` for the
/// description column.
pub fn cell_offset(row: usize, column: usize) -> usize {
    FIRST_CELL_OFFSET + ROW_STRIDE * row + CELL_STRIDE * column
}

/// Builds the ordered operation sequence that reconstructs a table inside an
/// empty document.
///
/// Text is written bottom-up and right-to-left: every insertion shifts only
/// the positions after it, so writing the highest offset first keeps every
/// remaining target offset untouched.
#[derive(Debug, Default, Clone, Copy)]
pub struct EditPlanBuilder;

impl EditPlanBuilder {
    /// Create a new builder.
    pub fn new() -> Self {
        Self
    }

    /// Build the plan for a table.
    pub fn build(&self, table: &Table) -> Result<EditPlan> {
        let titles = table.titles();
        self.build_from_parts(&titles, &table.rows)
    }

    /// Build the plan from titles and rows.
    ///
    /// Fails unless exactly two titles are given.
    pub fn build_from_parts<S: AsRef<str>>(&self, titles: &[S], rows: &[Row]) -> Result<EditPlan> {
        let (code_title, description_title) = match titles {
            [code, description] => (code.as_ref(), description.as_ref()),
            _ => {
                return Err(Error::InvalidPlanState(format!(
                    "expected {} column titles, got {}",
                    COLUMN_COUNT,
                    titles.len()
                )))
            }
        };

        let n = rows.len();
        let mut operations = Vec::with_capacity(1 + COLUMN_COUNT * (n + 1));
        operations.push(EditOperation::insert_table(n + 1, COLUMN_COUNT));

        for (index, row) in rows.iter().enumerate().rev() {
            let r = index + 1;
            operations.push(EditOperation::insert_text(
                row.description.render_text(),
                cell_offset(r, 1),
            ));
            operations.push(EditOperation::insert_text(
                row.code.clone(),
                cell_offset(r, 0),
            ));
        }

        operations.push(EditOperation::insert_text(
            description_title,
            cell_offset(0, 1),
        ));
        operations.push(EditOperation::insert_text(code_title, cell_offset(0, 0)));

        log::debug!(
            "Built edit plan with {} operations for {} rows",
            operations.len(),
            n
        );
        Ok(EditPlan::new(operations))
    }

    /// Build the plan from parallel code and description columns.
    ///
    /// Fails when the columns have different lengths.
    pub fn build_from_columns<S: AsRef<str>>(
        &self,
        titles: &[S],
        codes: &[String],
        descriptions: &[String],
    ) -> Result<EditPlan> {
        if codes.len() != descriptions.len() {
            return Err(Error::InvalidPlanState(format!(
                "{} codes but {} descriptions",
                codes.len(),
                descriptions.len()
            )));
        }

        let rows: Vec<Row> = codes
            .iter()
            .zip(descriptions)
            .map(|(code, description)| Row::text(code.as_str(), description.as_str()))
            .collect();
        self.build_from_parts(titles, &rows)
    }
}

/// Build the plan for a table with the default builder.
pub fn build_plan(table: &Table) -> Result<EditPlan> {
    EditPlanBuilder::new().build(table)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::CellContent;

    fn sample() -> Table {
        Table::new("Code", "Description")
            .with_row(Row::text("X1", "d1"))
            .with_row(Row::text("X2", "d2"))
    }

    #[test]
    fn test_cell_offsets() {
        assert_eq!(cell_offset(0, 0), 5);
        assert_eq!(cell_offset(0, 1), 7);
        assert_eq!(cell_offset(1, 0), 10);
        assert_eq!(cell_offset(1, 1), 12);
        assert_eq!(cell_offset(3, 1), 22);
    }

    #[test]
    fn test_two_row_plan() {
        let plan = build_plan(&sample()).unwrap();
        assert_eq!(
            plan.operations(),
            &[
                EditOperation::insert_table(3, 2),
                EditOperation::insert_text("d2", 17),
                EditOperation::insert_text("X2", 15),
                EditOperation::insert_text("d1", 12),
                EditOperation::insert_text("X1", 10),
                EditOperation::insert_text("Description", 7),
                EditOperation::insert_text("Code", 5),
            ]
        );
        assert!(plan.check_ordering().is_ok());
    }

    #[test]
    fn test_empty_table_plan() {
        let plan = build_plan(&Table::new("Code", "Description")).unwrap();
        assert_eq!(
            plan.operations(),
            &[
                EditOperation::insert_table(1, 2),
                EditOperation::insert_text("Description", 7),
                EditOperation::insert_text("Code", 5),
            ]
        );
    }

    #[test]
    fn test_operation_count() {
        for n in 0..20 {
            let mut table = Table::new("A", "B");
            for i in 0..n {
                table.add_row(Row::text(format!("c{}", i), format!("d{}", i)));
            }
            let plan = build_plan(&table).unwrap();
            assert_eq!(plan.len(), 1 + 2 * n + 2);
        }
    }

    #[test]
    fn test_bullet_description_is_flattened() {
        let table = Table::new("Code", "Description")
            .with_row(Row::new("E1", CellContent::bullets("Lorem", ["a", "b"])));
        let plan = build_plan(&table).unwrap();
        assert_eq!(
            plan.operations()[1],
            EditOperation::insert_text("Lorem\n- a\n- b\n", 12)
        );
    }

    #[test]
    fn test_wrong_title_count() {
        let builder = EditPlanBuilder::new();
        let err = builder.build_from_parts::<&str>(&[], &[]).unwrap_err();
        assert!(matches!(err, Error::InvalidPlanState(_)));
        assert!(builder.build_from_parts(&["only"], &[]).is_err());
        assert!(builder.build_from_parts(&["a", "b", "c"], &[]).is_err());
    }

    #[test]
    fn test_mismatched_columns() {
        let builder = EditPlanBuilder::new();
        let codes = vec!["X1".to_string(), "X2".to_string()];
        let descriptions = vec!["d1".to_string()];
        let err = builder
            .build_from_columns(&["Code", "Description"], &codes, &descriptions)
            .unwrap_err();
        assert!(matches!(err, Error::InvalidPlanState(_)));
    }

    #[test]
    fn test_build_from_columns_matches_table() {
        let builder = EditPlanBuilder::new();
        let codes = vec!["X1".to_string(), "X2".to_string()];
        let descriptions = vec!["d1".to_string(), "d2".to_string()];
        let plan = builder
            .build_from_columns(&["Code", "Description"], &codes, &descriptions)
            .unwrap();
        assert_eq!(plan, build_plan(&sample()).unwrap());
    }
}

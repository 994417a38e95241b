//! Per-cell planning: bound value or `DEFAULT`.

use crate::columns::ColumnSet;
use crate::row::{Cell, Row};

/// What a single `VALUES` cell renders as.
#[derive(Debug, PartialEq)]
pub enum CellPlan<'a, V> {
    /// The literal keyword `DEFAULT`; binds nothing.
    Default,
    /// A positional parameter bound to the row's value.
    Value(&'a V),
}

// Manual impls: `V` itself need not be `Clone`/`Copy`.
impl<V> Clone for CellPlan<'_, V> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<V> Copy for CellPlan<'_, V> {}

/// Plan one row: one entry per column, in column-set order.
///
/// Absent keys and use-default cells both plan as [`CellPlan::Default`].
pub fn plan_row<'a, V>(row: &'a Row<V>, columns: &ColumnSet) -> Vec<CellPlan<'a, V>> {
    columns
        .iter()
        .map(|col| match row.get(col) {
            None | Some(Cell::UseDefault) => CellPlan::Default,
            Some(Cell::Value(v)) => CellPlan::Value(v),
        })
        .collect()
}

/// Plan every row, in input order.
pub fn plan_rows<'a, V>(rows: &'a [Row<V>], columns: &ColumnSet) -> Vec<Vec<CellPlan<'a, V>>> {
    rows.iter().map(|row| plan_row(row, columns)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::columns::column_set;

    #[test]
    fn absent_and_use_default_plan_the_same() {
        let omitted = vec![
            Row::new().set("id", 1),
            Row::new().set("id", 2).set("other", 7),
        ];
        let marked = vec![
            Row::new().set("id", 1).use_default("other"),
            Row::new().set("id", 2).set("other", 7),
        ];

        let cols = column_set(&omitted);
        assert_eq!(cols, column_set(&marked));
        assert_eq!(plan_rows(&omitted, &cols), plan_rows(&marked, &cols));
        assert_eq!(
            plan_row(&omitted[0], &cols),
            [CellPlan::Value(&1), CellPlan::Default]
        );
    }

    #[test]
    fn plan_follows_column_order_not_row_order() {
        let rows = vec![Row::new().set("a", 1).set("b", 2), Row::new().set("b", 3).set("a", 4)];
        let cols = column_set(&rows);
        assert_eq!(
            plan_row(&rows[1], &cols),
            [CellPlan::Value(&4), CellPlan::Value(&3)]
        );
    }

    #[test]
    fn null_value_is_bound() {
        let rows = vec![Row::new().set("id", Some(1)).set("note", None::<i32>)];
        let cols = column_set(&rows);
        assert_eq!(
            plan_row(&rows[0], &cols),
            [CellPlan::Value(&Some(1)), CellPlan::Value(&None)]
        );
    }
}

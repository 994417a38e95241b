//! Missing-key policy: how rows with differing key sets are handled.

use crate::columns::ColumnSet;
use crate::error::{UpsertError, UpsertResult};
use crate::row::Row;
use serde::{Deserialize, Serialize};

/// How to treat a row that lacks some column present elsewhere in the batch.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MissingKeyPolicy {
    /// Absent columns render as `DEFAULT` for that row.
    #[default]
    DefaultFill,
    /// Every row must carry every column key.
    ///
    /// Only key presence is checked: a key set to
    /// [`Cell::UseDefault`](crate::Cell::UseDefault) satisfies the check.
    Throw,
}

impl MissingKeyPolicy {
    /// Validate row shapes against `columns`.
    ///
    /// `columns` must be the union of the rows' keys, so a row is consistent
    /// exactly when its key count equals the set's size.
    pub fn check<V>(self, rows: &[Row<V>], columns: &ColumnSet) -> UpsertResult<()> {
        match self {
            Self::DefaultFill => Ok(()),
            Self::Throw => {
                let missing: ColumnSet = rows
                    .iter()
                    .filter(|row| row.len() != columns.len())
                    .flat_map(|row| columns.iter().filter(move |col| !row.contains(col)))
                    .collect();
                if missing.is_empty() {
                    Ok(())
                } else {
                    Err(UpsertError::inconsistent_keys(sorted_by(&missing, columns)))
                }
            }
        }
    }
}

// Missing columns are gathered row by row; report them in column-set order.
fn sorted_by<'a>(missing: &'a ColumnSet, columns: &'a ColumnSet) -> Vec<&'a str> {
    columns.iter().filter(|col| missing.contains(col)).collect()
}

//! Error types for pgupsert

use thiserror::Error;

/// Result type alias for pgupsert operations
pub type UpsertResult<T> = Result<T, UpsertError>;

/// Reasons an upsert statement could not be built.
///
/// Every variant is raised before any SQL text is produced.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UpsertError {
    /// Table name missing or blank
    #[error("Table name cannot be empty")]
    EmptyTable,

    /// No rows to upsert
    #[error("Upsert requires at least one row")]
    EmptyRows,

    /// No conflict target columns
    #[error("Upsert requires at least one constraint column")]
    EmptyConstraintColumns,

    /// Rows do not all carry the same keys (`MissingKeyPolicy::Throw` only)
    #[error("Inconsistent keys: rows are missing column(s) {}", quote_list(.missing))]
    InconsistentKeys { missing: Vec<String> },

    /// Name that cannot be rendered as a quoted identifier
    #[error("Invalid identifier: {0}")]
    InvalidIdent(String),

    /// Input that cannot be read as a row
    #[error("Invalid row: {0}")]
    InvalidRow(String),
}

impl UpsertError {
    /// Create an inconsistent keys error for the given missing columns
    pub fn inconsistent_keys(missing: impl IntoIterator<Item = impl Into<String>>) -> Self {
        Self::InconsistentKeys {
            missing: missing.into_iter().map(Into::into).collect(),
        }
    }

    /// Create an invalid identifier error
    pub fn invalid_ident(message: impl Into<String>) -> Self {
        Self::InvalidIdent(message.into())
    }

    /// Check if this is an inconsistent keys error
    pub fn is_inconsistent_keys(&self) -> bool {
        matches!(self, Self::InconsistentKeys { .. })
    }

    /// Columns reported missing, if this is an inconsistent keys error.
    pub fn missing_columns(&self) -> Option<&[String]> {
        match self {
            Self::InconsistentKeys { missing } => Some(missing),
            _ => None,
        }
    }
}

fn quote_list(cols: &[String]) -> String {
    cols.iter()
        .map(|c| format!("\"{c}\""))
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn inconsistent_keys_message_lists_columns() {
        let err = UpsertError::inconsistent_keys(["other", "name"]);
        assert_eq!(
            err.to_string(),
            r#"Inconsistent keys: rows are missing column(s) "other", "name""#
        );
        assert!(err.is_inconsistent_keys());
        assert_eq!(
            err.missing_columns(),
            Some(&["other".to_string(), "name".to_string()][..])
        );
    }

    #[test]
    fn other_errors_report_no_missing_columns() {
        assert_eq!(UpsertError::EmptyRows.missing_columns(), None);
        assert!(!UpsertError::EmptyTable.is_inconsistent_keys());
    }
}

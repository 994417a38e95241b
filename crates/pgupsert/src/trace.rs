//! `tracing` events for statement builds (feature `tracing`).

use std::borrow::Cow;

use crate::error::UpsertError;

const MAX_SQL_LENGTH: usize = 200;

/// Truncate to at most `max_bytes`, backing off to a char boundary.
fn truncate_sql_bytes(sql: &str, max_bytes: usize) -> &str {
    if sql.len() <= max_bytes {
        return sql;
    }
    let mut end = max_bytes;
    while end > 0 && !sql.is_char_boundary(end) {
        end -= 1;
    }
    &sql[..end]
}

fn display_sql(sql: &str) -> Cow<'_, str> {
    if sql.len() > MAX_SQL_LENGTH {
        Cow::Owned(format!("{}...", truncate_sql_bytes(sql, MAX_SQL_LENGTH)))
    } else {
        Cow::Borrowed(sql)
    }
}

pub(crate) fn built(table: &str, rows: usize, columns: usize, param_count: usize, sql: &str) {
    let sql = display_sql(sql);
    tracing::debug!(
        target: "pgupsert.sql",
        table,
        rows,
        columns,
        param_count,
        sql = %sql,
        "built upsert"
    );
}

pub(crate) fn rejected(table: &str, error: &UpsertError) {
    tracing::debug!(target: "pgupsert.sql", table, error = %error, "rejected upsert");
}

//! Safe SQL identifier handling.
//!
//! Every table, schema and column name in an upsert is emitted as a quoted
//! identifier, so any character is allowed except NUL; an embedded `"` is
//! escaped as `""`.

use crate::error::{UpsertError, UpsertResult};

/// Check that `name` can be rendered as a quoted identifier.
pub(crate) fn validate(name: &str) -> UpsertResult<()> {
    if name.is_empty() {
        return Err(UpsertError::invalid_ident("Identifier cannot be empty"));
    }
    if name.contains('\0') {
        return Err(UpsertError::invalid_ident(format!(
            "Identifier cannot contain NUL character: {name:?}"
        )));
    }
    Ok(())
}

/// Append `"name"` to `out`, doubling embedded quotes.
pub(crate) fn write_quoted(out: &mut String, name: &str) {
    out.push('"');
    for ch in name.chars() {
        if ch == '"' {
            out.push('"');
            out.push('"');
        } else {
            out.push(ch);
        }
    }
    out.push('"');
}

//! SQL dialects: how identifiers and positional parameters are spelled.
//!
//! Dialects are stateless unit values. Pass one to
//! [`UpsertRequest::build_with`](crate::UpsertRequest::build_with) to render for
//! something other than PostgreSQL.

use crate::ident::write_quoted;
use std::fmt::Write;

/// Rendering rules for the two kinds of template tokens.
pub trait Dialect {
    /// Append a quoted identifier. The default doubles embedded `"`.
    fn write_ident(&self, out: &mut String, name: &str) {
        write_quoted(out, name);
    }

    /// Append the marker for the `index`-th bound value (1-based).
    fn write_param(&self, out: &mut String, index: usize);
}

/// PostgreSQL: `"ident"` and `$1, $2, ...`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Postgres;

impl Dialect for Postgres {
    fn write_param(&self, out: &mut String, index: usize) {
        // Writing into a String cannot fail.
        let _ = write!(out, "${index}");
    }
}

/// Dialect-agnostic form: `"ident"` and a bare `?` for every value.
///
/// Used for [`UpsertStatement::template`](crate::UpsertStatement::template),
/// a cache/debug key independent of parameter numbering.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Generic;

impl Dialect for Generic {
    fn write_param(&self, out: &mut String, _index: usize) {
        out.push('?');
    }
}

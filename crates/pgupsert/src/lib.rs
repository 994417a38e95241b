//! # pgupsert
//!
//! Build one parameterized PostgreSQL `INSERT ... ON CONFLICT` statement from a
//! batch of rows that need not share the same columns. Nothing is executed:
//! the output is SQL text plus an ordered binding list for any client.
//!
//! ## Features
//!
//! - **Ragged rows**: the column list is the union of all row keys, in first-seen order
//! - **DEFAULT vs NULL**: absent keys and [`Cell::UseDefault`] render `DEFAULT`; NULL is a bound value
//! - **Strict mode**: [`MissingKeyPolicy::Throw`] rejects rows that lack a key
//! - **Correct numbering**: fragments are token streams, numbered once at render time
//! - **Always quoted**: every identifier is double-quoted, every value is a parameter
//!
//! ## Example
//!
//! ```
//! use pgupsert::{Row, upsert};
//!
//! let stmt = upsert("x")
//!     .on_conflict(["id"])
//!     .row(Row::new().set("id", 1))
//!     .row(Row::new().set("id", 2).set("other", 3))
//!     .build()?;
//!
//! assert!(stmt.sql().contains("VALUES ($1,DEFAULT),($2,$3)"));
//! assert_eq!(stmt.bindings(), [1, 2, 3]);
//! # Ok::<(), pgupsert::UpsertError>(())
//! ```
//!
//! With `tokio-postgres`, use [`Param`] for mixed column types and pass
//! [`UpsertStatement::params_ref`] to the client:
//!
//! ```ignore
//! let stmt = pgupsert::upsert("tags")
//!     .on_conflict(["name"])
//!     .row(Row::new().set("name", Param::new("rust")).set("color", Param::new("orange")))
//!     .build()?;
//! let rows = client.query(stmt.sql(), &stmt.params_ref()).await?;
//! ```

pub mod builder;
pub mod columns;
pub mod dialect;
pub mod error;
mod ident;
pub mod options;
pub mod param;
pub mod plan;
pub mod policy;
pub mod row;
pub mod statement;
pub mod template;

#[cfg(feature = "tracing")]
mod trace;

pub use builder::UpsertRequest;
pub use columns::{ColumnSet, column_set, update_columns};
pub use dialect::{Dialect, Generic, Postgres};
pub use error::{UpsertError, UpsertResult};
pub use options::UpsertOptions;
pub use param::Param;
pub use plan::{CellPlan, plan_row, plan_rows};
pub use policy::MissingKeyPolicy;
pub use row::{Cell, Row};
pub use statement::UpsertStatement;
pub use template::Template;

/// Start an upsert request for the given table.
///
/// # Example
/// ```
/// let req = pgupsert::upsert::<i32>("users").schema("app").on_conflict(["id"]);
/// assert_eq!(req.table(), "users");
/// ```
pub fn upsert<V>(table: impl Into<String>) -> UpsertRequest<V> {
    UpsertRequest::new(table)
}

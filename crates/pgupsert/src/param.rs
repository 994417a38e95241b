//! Type-erased binding values for rows with mixed column types.

use bytes::BytesMut;
use std::error::Error;
use std::sync::Arc;
use tokio_postgres::types::{IsNull, ToSql, Type};

/// A clone-friendly parameter wrapper using Arc.
///
/// Lets one `Row<Param>` hold an `i64` in one column and a `String` in the
/// next, and lets a request be built more than once without copying values.
///
/// ```
/// use pgupsert::{Param, Row};
///
/// let row = Row::new()
///     .set("id", Param::new(1_i64))
///     .set("name", Param::new("alice"))
///     .set("note", Param::null::<String>());
/// assert_eq!(row.len(), 3);
/// ```
#[derive(Clone)]
pub struct Param(Arc<dyn ToSql + Send + Sync>);

impl Param {
    /// Create a new parameter from any ToSql value.
    pub fn new<T: ToSql + Send + Sync + 'static>(value: T) -> Self {
        Param(Arc::new(value))
    }

    /// A typed SQL NULL. This is a bound value, not `DEFAULT`.
    pub fn null<T: ToSql + Send + Sync + 'static>() -> Self {
        Param::new(None::<T>)
    }
}

impl std::fmt::Debug for Param {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // `dyn ToSql` requires `Debug`, so show the wrapped value.
        f.debug_tuple("Param").field(&self.0).finish()
    }
}

impl ToSql for Param {
    fn to_sql(
        &self,
        ty: &Type,
        out: &mut BytesMut,
    ) -> Result<IsNull, Box<dyn Error + Sync + Send>> {
        // The wrapped type decides which Postgres types it accepts.
        self.0.to_sql_checked(ty, out)
    }

    fn accepts(_ty: &Type) -> bool {
        true
    }

    tokio_postgres::types::to_sql_checked!();
}

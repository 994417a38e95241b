use tokio_postgres::types::ToSql;

/// A rendered upsert: SQL text plus the values for its `$1, $2, ...` markers.
///
/// Hand [`sql`](Self::sql) and [`params_ref`](Self::params_ref) to the client
/// that executes it:
///
/// ```ignore
/// let stmt = request.build()?;
/// let rows = client.query(stmt.sql(), &stmt.params_ref()).await?;
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct UpsertStatement<V> {
    sql: String,
    bindings: Vec<V>,
    template: Option<String>,
}

impl<V> UpsertStatement<V> {
    pub(crate) fn new(sql: String, bindings: Vec<V>, template: Option<String>) -> Self {
        Self {
            sql,
            bindings,
            template,
        }
    }

    /// The SQL text.
    pub fn sql(&self) -> &str {
        &self.sql
    }

    /// Bound values; `bindings()[i]` belongs to `$i+1`.
    pub fn bindings(&self) -> &[V] {
        &self.bindings
    }

    /// The dialect-agnostic template, if it was requested via
    /// [`UpsertOptions::with_template`](crate::UpsertOptions::with_template).
    pub fn template(&self) -> Option<&str> {
        self.template.as_deref()
    }

    pub fn into_parts(self) -> (String, Vec<V>) {
        (self.sql, self.bindings)
    }
}

impl<V: ToSql + Sync> UpsertStatement<V> {
    /// Parameter refs compatible with `tokio-postgres`.
    pub fn params_ref(&self) -> Vec<&(dyn ToSql + Sync)> {
        self.bindings
            .iter()
            .map(|p| p as &(dyn ToSql + Sync))
            .collect()
    }
}

//! Upsert statement assembly.
//!
//! A request is turned into one [`Template`] made of three fragments:
//!
//! 1. the target, `"schema"."table"` or `"table"`
//! 2. `INSERT INTO <target> (<columns>) VALUES (<cells>),...`
//! 3. `ON CONFLICT (<constraint columns>) DO NOTHING` or
//!    `DO UPDATE SET "c" = EXCLUDED."c", ... WHERE "table"."k" = EXCLUDED."k" AND ...`
//!
//! followed by `RETURNING *`. Numbering of `$n` happens once, when the
//! assembled template is rendered.

use crate::columns::{ColumnSet, column_set, update_columns};
use crate::dialect::{Dialect, Generic, Postgres};
use crate::error::{UpsertError, UpsertResult};
use crate::ident;
use crate::options::UpsertOptions;
use crate::plan::{CellPlan, plan_rows};
use crate::policy::MissingKeyPolicy;
use crate::row::Row;
use crate::statement::UpsertStatement;
use crate::template::Template;

/// A batch upsert to build: target table, conflict target, rows, options.
///
/// # Example
/// ```
/// use pgupsert::{Row, UpsertRequest};
///
/// let stmt = UpsertRequest::new("x")
///     .on_conflict(["id"])
///     .row(Row::new().set("id", 1).set("other", 2))
///     .build()?;
///
/// assert_eq!(
///     stmt.sql(),
///     r#"INSERT INTO "x" ("id","other") VALUES ($1,$2) ON CONFLICT ("id") DO UPDATE SET "other" = EXCLUDED."other" WHERE "x"."id" = EXCLUDED."id" RETURNING *"#
/// );
/// assert_eq!(stmt.bindings(), [1, 2]);
/// # Ok::<(), pgupsert::UpsertError>(())
/// ```
#[derive(Debug, Clone)]
pub struct UpsertRequest<V> {
    table: String,
    schema: Option<String>,
    constraint_columns: Vec<String>,
    rows: Vec<Row<V>>,
    excluded: Option<Vec<String>>,
    options: UpsertOptions,
}

/// Everything resolved from a request before text is produced.
struct Resolved<'a, V> {
    columns: ColumnSet,
    constraint: ColumnSet,
    update: ColumnSet,
    cells: Vec<Vec<CellPlan<'a, V>>>,
}

impl<V> UpsertRequest<V> {
    /// Create a request for `table`.
    pub fn new(table: impl Into<String>) -> Self {
        Self {
            table: table.into(),
            schema: None,
            constraint_columns: Vec::new(),
            rows: Vec::new(),
            excluded: None,
            options: UpsertOptions::default(),
        }
    }

    /// Qualify the target table with a schema.
    pub fn schema(mut self, schema: impl Into<String>) -> Self {
        self.schema = Some(schema.into());
        self
    }

    /// Set the conflict target columns. Duplicates are dropped.
    pub fn on_conflict<I, S>(mut self, columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.constraint_columns = columns.into_iter().map(Into::into).collect();
        self
    }

    /// Append a row.
    pub fn row(mut self, row: Row<V>) -> Self {
        self.rows.push(row);
        self
    }

    /// Append rows, in order.
    pub fn rows(mut self, rows: impl IntoIterator<Item = Row<V>>) -> Self {
        self.rows.extend(rows);
        self
    }

    /// Columns never assigned in `DO UPDATE SET`.
    ///
    /// Defaults to the conflict target columns. Passing an empty list updates
    /// every column, conflict target included.
    pub fn exclude_from_update<I, S>(mut self, columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.excluded = Some(columns.into_iter().map(Into::into).collect());
        self
    }

    /// Set the missing-key policy.
    pub fn missing_keys(mut self, policy: MissingKeyPolicy) -> Self {
        self.options.missing_keys = policy;
        self
    }

    /// Replace all build options.
    pub fn options(mut self, options: UpsertOptions) -> Self {
        self.options = options;
        self
    }

    pub fn table(&self) -> &str {
        &self.table
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    fn validate(&self) -> UpsertResult<()> {
        if self.table.trim().is_empty() {
            return Err(UpsertError::EmptyTable);
        }
        if self.rows.is_empty() {
            return Err(UpsertError::EmptyRows);
        }
        if self.constraint_columns.is_empty() {
            return Err(UpsertError::EmptyConstraintColumns);
        }
        ident::validate(&self.table)?;
        if let Some(schema) = &self.schema {
            ident::validate(schema)?;
        }
        for col in &self.constraint_columns {
            ident::validate(col)?;
        }
        Ok(())
    }

    fn resolve(&self) -> UpsertResult<Resolved<'_, V>> {
        self.validate()?;

        let columns = column_set(&self.rows);
        for col in columns.iter() {
            ident::validate(col)?;
        }
        self.options.missing_keys.check(&self.rows, &columns)?;

        let constraint: ColumnSet = self.constraint_columns.iter().map(String::as_str).collect();
        let update = match &self.excluded {
            Some(excluded) => update_columns(&columns, excluded.as_slice()),
            None => update_columns(&columns, constraint.as_slice()),
        };
        let cells = plan_rows(&self.rows, &columns);

        Ok(Resolved {
            columns,
            constraint,
            update,
            cells,
        })
    }

    fn target(&self) -> Template<V> {
        let mut t = Template::empty();
        if let Some(schema) = &self.schema {
            t.push_ident(schema).push(".");
        }
        t.push_ident(&self.table);
        t
    }

    fn conflict_clause(&self, resolved: &Resolved<'_, V>) -> Template<V> {
        let mut t = Template::new(" ON CONFLICT (");
        t.push_separated(resolved.constraint.iter(), ",", |t, col| {
            t.push_ident(col);
        });
        t.push(")");

        if resolved.update.is_empty() {
            t.push(" DO NOTHING");
            return t;
        }

        t.push(" DO UPDATE SET ");
        t.push_separated(resolved.update.iter(), ", ", |t, col| {
            t.push_ident(col).push(" = EXCLUDED.").push_ident(col);
        });

        if self.options.restate_conflict_target {
            // Bare table name, never schema-qualified.
            t.push(" WHERE ");
            t.push_separated(resolved.constraint.iter(), " AND ", |t, col| {
                t.push_ident(&self.table)
                    .push(".")
                    .push_ident(col)
                    .push(" = EXCLUDED.")
                    .push_ident(col);
            });
        }
        t
    }
}

impl<V: Clone> UpsertRequest<V> {
    fn insert_clause(&self, resolved: &Resolved<'_, V>) -> Template<V> {
        let mut t = Template::new("INSERT INTO ");
        t.push_template(self.target());
        t.push(" (");
        t.push_separated(resolved.columns.iter(), ",", |t, col| {
            t.push_ident(col);
        });
        t.push(") VALUES ");
        t.push_separated(&resolved.cells, ",", |t, row| {
            t.push("(");
            t.push_separated(row, ",", |t, cell| match cell {
                CellPlan::Default => {
                    t.push("DEFAULT");
                }
                CellPlan::Value(v) => {
                    t.push_value((*v).clone());
                }
            });
            t.push(")");
        });
        t
    }

    fn assemble(&self, resolved: &Resolved<'_, V>) -> Template<V> {
        let mut t = self.insert_clause(resolved);
        t.push_template(self.conflict_clause(resolved));
        if self.options.returning {
            t.push(" RETURNING *");
        }
        t
    }

    /// The unrendered statement: identifier and value tokens still unresolved.
    pub fn to_template(&self) -> UpsertResult<Template<V>> {
        let resolved = self.resolve()?;
        Ok(self.assemble(&resolved))
    }

    /// Build for PostgreSQL (`"ident"`, `$1, $2, ...`).
    ///
    /// Errors and the keyless-rows case are described on
    /// [`build_with`](Self::build_with).
    pub fn build(&self) -> UpsertResult<UpsertStatement<V>> {
        self.build_with(&Postgres)
    }

    /// Build for the given dialect.
    ///
    /// Fails before producing any text if the table name, rows, or conflict
    /// target are empty, if a name is not a valid identifier, or if the
    /// missing-key policy rejects the rows.
    ///
    /// Rows without any keys are not an error. If no row carries a key the
    /// column list is empty and the result is
    /// `INSERT INTO "x" () VALUES (),() ON CONFLICT ("id") DO NOTHING RETURNING *`,
    /// which PostgreSQL rejects at execution time. Callers that may receive
    /// such batches should check [`column_set`](crate::column_set) first.
    pub fn build_with<D: Dialect + ?Sized>(&self, dialect: &D) -> UpsertResult<UpsertStatement<V>> {
        let resolved = match self.resolve() {
            Ok(resolved) => resolved,
            Err(err) => {
                #[cfg(feature = "tracing")]
                crate::trace::rejected(&self.table, &err);
                return Err(err);
            }
        };
        let template = self.assemble(&resolved);

        let generic = self
            .options
            .include_template
            .then(|| template.to_sql(&Generic));
        let (sql, bindings) = template.render(dialect);

        #[cfg(feature = "tracing")]
        crate::trace::built(
            &self.table,
            self.rows.len(),
            resolved.columns.len(),
            bindings.len(),
            &sql,
        );

        Ok(UpsertStatement::new(sql, bindings, generic))
    }
}

#[cfg(test)]
mod tests;

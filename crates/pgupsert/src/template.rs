//! Templated SQL: raw text interleaved with identifier and value tokens.
//!
//! Fragments are composed as token streams and only numbered when the final,
//! flattened statement is rendered, so `$n` indices never drift when one
//! fragment is appended to another.
//!
//! # Example
//!
//! ```
//! use pgupsert::{Postgres, Template};
//!
//! let mut set = Template::empty();
//! set.push(" WHERE ").push_ident("id").push(" = ").push_value(7);
//!
//! let mut q = Template::new("UPDATE ");
//! q.push_ident("t").push(" SET ").push_ident("n").push(" = ").push_value(1);
//! q.push_template(set);
//!
//! let (sql, bindings) = q.render(&Postgres);
//! assert_eq!(sql, r#"UPDATE "t" SET "n" = $1 WHERE "id" = $2"#);
//! assert_eq!(bindings, [1, 7]);
//! ```

use crate::dialect::Dialect;

#[derive(Debug, Clone, PartialEq)]
enum Part<V> {
    Raw(String),
    Ident(String),
    Value(V),
}

/// An unrendered SQL statement or fragment carrying its own values.
#[must_use]
#[derive(Debug, Clone, PartialEq)]
pub struct Template<V> {
    parts: Vec<Part<V>>,
    value_count: usize,
}

impl<V> Default for Template<V> {
    fn default() -> Self {
        Self::empty()
    }
}

impl<V> Template<V> {
    /// Create a template starting with raw SQL.
    pub fn new(initial_sql: &str) -> Self {
        let mut t = Self::empty();
        t.push(initial_sql);
        t
    }

    /// Create an empty template.
    pub fn empty() -> Self {
        Self {
            parts: Vec::new(),
            value_count: 0,
        }
    }

    /// Append raw SQL (no identifiers, no values).
    pub fn push(&mut self, sql: &str) -> &mut Self {
        if sql.is_empty() {
            return self;
        }

        match self.parts.last_mut() {
            Some(Part::Raw(last)) => last.push_str(sql),
            _ => self.parts.push(Part::Raw(sql.to_string())),
        }
        self
    }

    /// Append an identifier token, quoted at render time.
    pub fn push_ident(&mut self, name: &str) -> &mut Self {
        self.parts.push(Part::Ident(name.to_string()));
        self
    }

    /// Append a value token, rendered as the next positional parameter.
    pub fn push_value(&mut self, value: V) -> &mut Self {
        self.parts.push(Part::Value(value));
        self.value_count += 1;
        self
    }

    /// Append `items` separated by `sep`, each written by `f`.
    pub fn push_separated<I, F>(&mut self, items: I, sep: &str, mut f: F) -> &mut Self
    where
        I: IntoIterator,
        F: FnMut(&mut Self, I::Item),
    {
        for (i, item) in items.into_iter().enumerate() {
            if i > 0 {
                self.push(sep);
            }
            f(self, item);
        }
        self
    }

    /// Append another template, consuming it.
    pub fn push_template(&mut self, other: Template<V>) -> &mut Self {
        for part in other.parts {
            match part {
                Part::Raw(s) => {
                    self.push(&s);
                }
                part => self.parts.push(part),
            }
        }
        self.value_count += other.value_count;
        self
    }

    /// Number of value tokens.
    pub fn value_count(&self) -> usize {
        self.value_count
    }

    fn raw_len(&self) -> usize {
        self.parts
            .iter()
            .map(|part| match part {
                Part::Raw(s) => s.len(),
                Part::Ident(s) => s.len() + 2,
                Part::Value(_) => 3,
            })
            .sum()
    }

    /// Render the text only; values stay in the template.
    pub fn to_sql<D: Dialect + ?Sized>(&self, dialect: &D) -> String {
        let mut out = String::with_capacity(self.raw_len());
        let mut idx = 0;
        for part in &self.parts {
            match part {
                Part::Raw(s) => out.push_str(s),
                Part::Ident(name) => dialect.write_ident(&mut out, name),
                Part::Value(_) => {
                    idx += 1;
                    dialect.write_param(&mut out, idx);
                }
            }
        }
        out
    }

    /// Render in one left-to-right pass, moving each value into the binding
    /// list in the order its parameter marker is emitted.
    pub fn render<D: Dialect + ?Sized>(self, dialect: &D) -> (String, Vec<V>) {
        let mut out = String::with_capacity(self.raw_len());
        let mut bindings = Vec::with_capacity(self.value_count);
        for part in self.parts {
            match part {
                Part::Raw(s) => out.push_str(&s),
                Part::Ident(name) => dialect.write_ident(&mut out, &name),
                Part::Value(v) => {
                    bindings.push(v);
                    dialect.write_param(&mut out, bindings.len());
                }
            }
        }
        (out, bindings)
    }
}

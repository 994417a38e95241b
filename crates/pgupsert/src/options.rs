use crate::policy::MissingKeyPolicy;
use serde::{Deserialize, Serialize};

/// Per-request build options.
///
/// Deserializable so the knobs can live in application config:
///
/// ```
/// use pgupsert::{MissingKeyPolicy, UpsertOptions};
///
/// let opts: UpsertOptions = serde_json::from_str(r#"{"missing_keys": "throw"}"#)?;
/// assert_eq!(opts.missing_keys, MissingKeyPolicy::Throw);
/// assert!(opts.returning);
/// # Ok::<(), serde_json::Error>(())
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct UpsertOptions {
    /// How rows lacking some batch column are handled.
    pub missing_keys: MissingKeyPolicy,
    /// Emit `WHERE <table>.<c> = EXCLUDED.<c>` after `DO UPDATE SET`.
    ///
    /// The clause repeats the conflict target and changes nothing in
    /// PostgreSQL; it is on by default because callers may match on the
    /// exact statement text.
    pub restate_conflict_target: bool,
    /// Append `RETURNING *`.
    pub returning: bool,
    /// Also render the dialect-agnostic template (`?` for values).
    pub include_template: bool,
}

impl Default for UpsertOptions {
    fn default() -> Self {
        Self {
            missing_keys: MissingKeyPolicy::DefaultFill,
            restate_conflict_target: true,
            returning: true,
            include_template: false,
        }
    }
}

impl UpsertOptions {
    /// Create options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the missing-key policy.
    pub fn missing_keys(mut self, policy: MissingKeyPolicy) -> Self {
        self.missing_keys = policy;
        self
    }

    /// Reject rows that lack any batch column (`MissingKeyPolicy::Throw`).
    pub fn strict(mut self) -> Self {
        self.missing_keys = MissingKeyPolicy::Throw;
        self
    }

    /// Toggle the `WHERE` clause restating the conflict target.
    pub fn restate_conflict_target(mut self, enabled: bool) -> Self {
        self.restate_conflict_target = enabled;
        self
    }

    /// Toggle `RETURNING *`.
    pub fn returning(mut self, enabled: bool) -> Self {
        self.returning = enabled;
        self
    }

    /// Render the dialect-agnostic template alongside the SQL.
    pub fn with_template(mut self) -> Self {
        self.include_template = true;
        self
    }
}

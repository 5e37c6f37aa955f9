//! Environment and its variable map

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::id::Id;
use crate::request::OrderedMap;

/// A named set of variables.
///
/// Whether an environment is active is not stored here: the single active
/// pointer lives in [`super::EnvironmentSet`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Environment {
    /// Unique identifier
    pub id: Id,
    /// Environment name (e.g., "Development", "Production")
    pub name: String,
    /// Variables in this environment.
    #[serde(default)]
    pub variables: OrderedMap,
    /// Creation time
    pub created_at: DateTime<Utc>,
    /// Last modification time
    pub updated_at: DateTime<Utc>,
}

impl Environment {
    /// Creates a new environment.
    #[must_use]
    pub fn new(id: Id, name: impl Into<String>, variables: OrderedMap, now: DateTime<Utc>) -> Self {
        Self {
            id,
            name: name.into(),
            variables,
            created_at: now,
            updated_at: now,
        }
    }

    /// Sets a variable, replacing any previous value.
    pub fn set_variable(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.variables.insert(name.into(), value.into());
    }

    /// Returns a variable value by name.
    #[must_use]
    pub fn variable(&self, name: &str) -> Option<&str> {
        self.variables.get(name).map(String::as_str)
    }

    /// Merges the fields present in `patch` and touches `updated_at`.
    ///
    /// A supplied variable map replaces the previous one entirely.
    pub fn apply(&mut self, patch: EnvironmentPatch, now: DateTime<Utc>) {
        if let Some(name) = patch.name {
            self.name = name;
        }
        if let Some(variables) = patch.variables {
            self.variables = variables;
        }
        self.updated_at = now;
    }
}

/// Partial update of an environment.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnvironmentPatch {
    /// New name
    #[serde(default)]
    pub name: Option<String>,
    /// Replacement variable map
    #[serde(default)]
    pub variables: Option<OrderedMap>,
}

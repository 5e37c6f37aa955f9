//! The set of environments and its single active pointer.

use chrono::{DateTime, Utc};

use super::{Environment, EnvironmentPatch};
use crate::id::Id;

/// All environments plus the id of the active one.
///
/// The active environment is a single reference cell rather than a flag on
/// every record, so "at most one active" holds by construction. The set
/// also keeps the stronger invariant that a non-empty set always has an
/// active environment:
/// - inserting into an empty set activates the new environment,
/// - removing the active environment promotes the first remaining one,
/// - activating an unknown id changes nothing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EnvironmentSet {
    environments: Vec<Environment>,
    active_id: Option<Id>,
}

impl EnvironmentSet {
    /// Creates an empty set.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            environments: Vec::new(),
            active_id: None,
        }
    }

    /// Rebuilds a set from persisted parts.
    ///
    /// Environments are ordered by creation time. A pointer to an unknown
    /// environment is dropped, and a non-empty set without a valid pointer
    /// activates its first environment.
    #[must_use]
    pub fn from_parts(mut environments: Vec<Environment>, active_id: Option<Id>) -> Self {
        environments.sort_by(|a, b| a.created_at.cmp(&b.created_at).then_with(|| a.id.cmp(&b.id)));
        let active_id = active_id
            .filter(|id| environments.iter().any(|e| &e.id == id))
            .or_else(|| environments.first().map(|e| e.id.clone()));
        Self {
            environments,
            active_id,
        }
    }

    /// Returns all environments in creation order.
    #[must_use]
    pub fn environments(&self) -> &[Environment] {
        &self.environments
    }

    /// Returns the id of the active environment.
    #[must_use]
    pub fn active_id(&self) -> Option<&str> {
        self.active_id.as_deref()
    }

    /// Returns the active environment.
    #[must_use]
    pub fn active(&self) -> Option<&Environment> {
        self.active_id.as_deref().and_then(|id| self.get(id))
    }

    /// Returns true if `id` is the active environment.
    #[must_use]
    pub fn is_active(&self, id: &str) -> bool {
        self.active_id.as_deref() == Some(id)
    }

    /// Returns the environment with the given id.
    #[must_use]
    pub fn get(&self, id: &str) -> Option<&Environment> {
        self.environments.iter().find(|e| e.id == id)
    }

    /// Returns the number of environments.
    #[must_use]
    pub fn len(&self) -> usize {
        self.environments.len()
    }

    /// Returns true if there are no environments.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.environments.is_empty()
    }

    /// Adds an environment. Returns true if it became the active one,
    /// which happens only when the set was empty.
    pub fn insert(&mut self, environment: Environment) -> bool {
        let activate = self.environments.is_empty();
        if activate {
            self.active_id = Some(environment.id.clone());
        }
        self.environments.push(environment);
        activate
    }

    /// Applies a partial update. `None` if the id is unknown.
    pub fn update(
        &mut self,
        id: &str,
        patch: EnvironmentPatch,
        now: DateTime<Utc>,
    ) -> Option<&Environment> {
        let environment = self.environments.iter_mut().find(|e| e.id == id)?;
        environment.apply(patch, now);
        Some(environment)
    }

    /// Removes an environment. `None` if the id is unknown.
    ///
    /// When the active environment is removed and others remain, the first
    /// remaining environment becomes active.
    pub fn remove(&mut self, id: &str) -> Option<Environment> {
        let index = self.environments.iter().position(|e| e.id == id)?;
        let removed = self.environments.remove(index);
        if self.is_active(id) {
            self.active_id = self.environments.first().map(|e| e.id.clone());
        }
        Some(removed)
    }

    /// Makes `id` the only active environment. Returns false, leaving the
    /// current pointer untouched, if the id is unknown.
    pub fn activate(&mut self, id: &str) -> bool {
        if self.get(id).is_none() {
            return false;
        }
        self.active_id = Some(id.to_string());
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::request::OrderedMap;
    use chrono::Duration;
    use pretty_assertions::assert_eq;

    fn env(id: &str, offset_secs: i64) -> Environment {
        let base = DateTime::<Utc>::from_timestamp(1_700_000_000, 0).unwrap_or_default();
        Environment::new(
            id.into(),
            id.to_uppercase(),
            OrderedMap::new(),
            base + Duration::seconds(offset_secs),
        )
    }

    fn active_count(set: &EnvironmentSet) -> usize {
        set.environments()
            .iter()
            .filter(|e| set.is_active(&e.id))
            .count()
    }

    #[test]
    fn test_first_insert_activates() {
        let mut set = EnvironmentSet::new();
        assert!(set.insert(env("dev", 0)));
        assert!(!set.insert(env("prod", 1)));
        assert_eq!(set.active_id(), Some("dev"));
    }

    #[test]
    fn test_removing_active_promotes_first_remaining() {
        let mut set = EnvironmentSet::new();
        set.insert(env("dev", 0));
        set.insert(env("stage", 1));
        set.insert(env("prod", 2));
        assert!(set.activate("stage"));

        set.remove("stage");
        assert_eq!(set.active_id(), Some("dev"));

        set.remove("dev");
        assert_eq!(set.active_id(), Some("prod"));

        set.remove("prod");
        assert_eq!(set.active_id(), None);
    }

    #[test]
    fn test_removing_inactive_keeps_pointer() {
        let mut set = EnvironmentSet::new();
        set.insert(env("dev", 0));
        set.insert(env("prod", 1));
        assert!(set.remove("prod").is_some());
        assert_eq!(set.active_id(), Some("dev"));
        assert!(set.remove("prod").is_none());
    }

    #[test]
    fn test_activate_unknown_changes_nothing() {
        let mut set = EnvironmentSet::new();
        set.insert(env("dev", 0));
        set.insert(env("prod", 1));
        assert!(set.activate("prod"));
        assert!(!set.activate("missing"));
        assert_eq!(set.active_id(), Some("prod"));
    }

    #[test]
    fn test_single_active_after_any_sequence() {
        let mut set = EnvironmentSet::new();
        let ids = ["a", "b", "c", "d"];
        for (i, id) in ids.iter().enumerate() {
            set.insert(env(id, i64::try_from(i).unwrap_or_default()));
            assert_eq!(active_count(&set), 1);
        }
        for id in ["c", "zz", "a", "d"] {
            set.activate(id);
            assert_eq!(active_count(&set), 1);
        }
        for id in ["d", "a", "zz", "b", "c"] {
            set.remove(id);
            let expected = usize::from(!set.is_empty());
            assert_eq!(active_count(&set), expected);
        }
    }

    #[test]
    fn test_from_parts_repairs_pointer_and_orders() {
        let set = EnvironmentSet::from_parts(vec![env("late", 10), env("early", 0)], Some("gone".into()));
        let names: Vec<_> = set.environments().iter().map(|e| e.id.as_str()).collect();
        assert_eq!(names, vec!["early", "late"]);
        assert_eq!(set.active_id(), Some("early"));

        let kept = EnvironmentSet::from_parts(vec![env("a", 0), env("b", 1)], Some("b".into()));
        assert_eq!(kept.active_id(), Some("b"));

        let empty = EnvironmentSet::from_parts(Vec::new(), Some("x".into()));
        assert_eq!(empty.active_id(), None);
    }
}

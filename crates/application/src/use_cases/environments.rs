//! Environment use cases

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tokio::sync::Mutex;
use tracing::debug;

use courier_domain::{
    DomainError, Environment, EnvironmentPatch, EnvironmentSet, OrderedMap, generate_id,
};

use crate::ApplicationResult;
use crate::ports::{Clock, EnvironmentRepository};

/// An environment as presented to callers, with its active flag.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EnvironmentRecord {
    /// The stored environment
    #[serde(flatten)]
    pub environment: Environment,
    /// Whether this is the active environment
    pub is_active: bool,
}

impl EnvironmentRecord {
    fn from_set(set: &EnvironmentSet, environment: Environment) -> Self {
        let is_active = set.is_active(&environment.id);
        Self {
            environment,
            is_active,
        }
    }
}

/// Input for creating an environment.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct NewEnvironment {
    /// Environment name
    #[serde(default)]
    pub name: String,
    /// Initial variables
    #[serde(default)]
    pub variables: OrderedMap,
}

/// Manages environments and the active pointer.
pub struct EnvironmentService<R> {
    repository: R,
    clock: Arc<dyn Clock>,
    write_lock: Mutex<()>,
}

impl<R: EnvironmentRepository> EnvironmentService<R> {
    /// Creates a new service over `repository`.
    pub fn new(repository: R, clock: Arc<dyn Clock>) -> Self {
        Self {
            repository,
            clock,
            write_lock: Mutex::new(()),
        }
    }

    /// Lists all environments in creation order.
    ///
    /// # Errors
    /// Returns an error if the repository cannot be read.
    pub async fn list(&self) -> ApplicationResult<Vec<EnvironmentRecord>> {
        let set = self.repository.load_set().await?;
        Ok(set
            .environments()
            .iter()
            .map(|e| EnvironmentRecord::from_set(&set, e.clone()))
            .collect())
    }

    /// Returns one environment.
    ///
    /// # Errors
    /// Returns an error if the repository cannot be read.
    pub async fn get(&self, id: &str) -> ApplicationResult<Option<EnvironmentRecord>> {
        let set = self.repository.load_set().await?;
        Ok(set
            .get(id)
            .cloned()
            .map(|e| EnvironmentRecord::from_set(&set, e)))
    }

    /// Returns the active environment, if any.
    ///
    /// # Errors
    /// Returns an error if the repository cannot be read.
    pub async fn get_active(&self) -> ApplicationResult<Option<EnvironmentRecord>> {
        let set = self.repository.load_set().await?;
        Ok(set.active().cloned().map(|environment| EnvironmentRecord {
            environment,
            is_active: true,
        }))
    }

    /// Returns the variables of the active environment, or an empty map
    /// when none is active.
    ///
    /// # Errors
    /// Returns an error if the repository cannot be read.
    pub async fn active_variables(&self) -> ApplicationResult<OrderedMap> {
        let set = self.repository.load_set().await?;
        Ok(set
            .active()
            .map(|e| e.variables.clone())
            .unwrap_or_default())
    }

    /// Creates an environment. The first environment becomes active.
    ///
    /// # Errors
    /// Returns a validation error if the name is blank.
    pub async fn create(&self, input: NewEnvironment) -> ApplicationResult<EnvironmentRecord> {
        if input.name.trim().is_empty() {
            return Err(DomainError::MissingField("name").into());
        }

        let _guard = self.write_lock.lock().await;
        let mut set = self.repository.load_set().await?;
        let environment = Environment::new(generate_id(), input.name, input.variables, self.clock.now());

        self.repository.save(&environment).await?;
        let activated = set.insert(environment.clone());
        if activated {
            self.repository.save_active_id(Some(&environment.id)).await?;
        }
        debug!(id = %environment.id, activated, "environment created");

        Ok(EnvironmentRecord {
            environment,
            is_active: activated,
        })
    }

    /// Updates an environment's name and/or variables.
    ///
    /// # Errors
    /// Returns a validation error if a supplied name is blank.
    pub async fn update(
        &self,
        id: &str,
        patch: EnvironmentPatch,
    ) -> ApplicationResult<Option<EnvironmentRecord>> {
        if patch.name.as_deref().is_some_and(|n| n.trim().is_empty()) {
            return Err(DomainError::MissingField("name").into());
        }

        let _guard = self.write_lock.lock().await;
        let mut set = self.repository.load_set().await?;
        let Some(updated) = set.update(id, patch, self.clock.now()).cloned() else {
            return Ok(None);
        };
        self.repository.save(&updated).await?;
        Ok(Some(EnvironmentRecord::from_set(&set, updated)))
    }

    /// Deletes an environment. If it was active, the first remaining
    /// environment becomes active.
    ///
    /// # Errors
    /// Returns an error if the repository cannot be read or written.
    pub async fn delete(&self, id: &str) -> ApplicationResult<Option<EnvironmentRecord>> {
        let _guard = self.write_lock.lock().await;
        let mut set = self.repository.load_set().await?;
        let was_active = set.is_active(id);
        let Some(removed) = set.remove(id) else {
            return Ok(None);
        };

        self.repository.delete(id).await?;
        if was_active {
            self.repository.save_active_id(set.active_id()).await?;
            debug!(id, promoted = ?set.active_id(), "active environment deleted");
        }

        Ok(Some(EnvironmentRecord {
            environment: removed,
            is_active: false,
        }))
    }

    /// Makes `id` the active environment. `None` if the id is unknown, in
    /// which case the current active environment is unchanged.
    ///
    /// # Errors
    /// Returns an error if the repository cannot be read or written.
    pub async fn set_active(&self, id: &str) -> ApplicationResult<Option<EnvironmentRecord>> {
        let _guard = self.write_lock.lock().await;
        let mut set = self.repository.load_set().await?;
        if !set.activate(id) {
            return Ok(None);
        }
        self.repository.save_active_id(Some(id)).await?;

        Ok(set.active().cloned().map(|environment| EnvironmentRecord {
            environment,
            is_active: true,
        }))
    }
}

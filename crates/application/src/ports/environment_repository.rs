//! Environment repository port
//!
//! Defines the interface for environment persistence.

use async_trait::async_trait;

use courier_domain::{Environment, EnvironmentSet, Id};

use super::StoreError;

/// Repository trait for environment persistence.
///
/// Environments are stored one document per environment; the active
/// pointer is stored on its own so that switching touches one record.
#[async_trait]
pub trait EnvironmentRepository: Send + Sync {
    /// Lists all stored environments.
    ///
    /// # Errors
    /// Returns an error if the environment documents cannot be read.
    async fn list(&self) -> Result<Vec<Environment>, StoreError>;

    /// Creates or replaces an environment.
    ///
    /// # Errors
    /// Returns an error if the document cannot be written.
    async fn save(&self, environment: &Environment) -> Result<(), StoreError>;

    /// Deletes an environment. Deleting an unknown id is not an error.
    ///
    /// # Errors
    /// Returns an error if the document exists but cannot be removed.
    async fn delete(&self, id: &str) -> Result<(), StoreError>;

    /// Loads the id of the active environment.
    ///
    /// # Errors
    /// Returns an error if the pointer exists but cannot be read.
    async fn load_active_id(&self) -> Result<Option<Id>, StoreError>;

    /// Stores the id of the active environment, or clears it.
    ///
    /// # Errors
    /// Returns an error if the pointer cannot be written.
    async fn save_active_id(&self, id: Option<&str>) -> Result<(), StoreError>;

    /// Loads every environment together with the active pointer.
    ///
    /// # Errors
    /// Returns an error if either part cannot be read.
    async fn load_set(&self) -> Result<EnvironmentSet, StoreError> {
        let environments = self.list().await?;
        let active_id = self.load_active_id().await?;
        Ok(EnvironmentSet::from_parts(environments, active_id))
    }
}

//! File-based environment repository implementation.
//!
//! Layout inside the data directory:
//! ```text
//! environments/
//!   <id>.json      one document per environment
//!   active.json    {"activeEnvironmentId": "<id>" | null}
//! ```

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tokio::fs;
use tracing::warn;

use courier_application::ports::{EnvironmentRepository, StoreError};
use courier_domain::{Environment, Id};

use super::JsonDocument;
use crate::serialization::from_json_bytes;

const ACTIVE_FILE: &str = "active.json";

#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ActivePointer {
    #[serde(default)]
    active_environment_id: Option<Id>,
}

/// File-based environment repository.
#[derive(Debug, Clone)]
pub struct FileEnvironmentRepository {
    dir: PathBuf,
    active: JsonDocument,
}

impl FileEnvironmentRepository {
    /// Directory name inside the data directory.
    pub const DIR_NAME: &'static str = "environments";

    /// Creates a repository rooted at `data_dir`.
    #[must_use]
    pub fn new(data_dir: &Path) -> Self {
        let dir = data_dir.join(Self::DIR_NAME);
        let active = JsonDocument::new(dir.join(ACTIVE_FILE));
        Self { dir, active }
    }

    fn environment_document(&self, id: &str) -> JsonDocument {
        JsonDocument::new(self.dir.join(format!("{id}.json")))
    }
}

#[async_trait]
impl EnvironmentRepository for FileEnvironmentRepository {
    async fn list(&self) -> Result<Vec<Environment>, StoreError> {
        fs::create_dir_all(&self.dir).await?;
        let mut entries = fs::read_dir(&self.dir).await?;

        let mut environments = Vec::new();
        while let Some(entry) = entries.next_entry().await? {
            let path = entry.path();
            let is_document = path.extension().is_some_and(|ext| ext == "json")
                && path.file_name().is_some_and(|name| name != ACTIVE_FILE);
            if !is_document {
                continue;
            }

            let bytes = match fs::read(&path).await {
                Ok(bytes) => bytes,
                Err(e) if e.kind() == ErrorKind::NotFound => continue,
                Err(e) => return Err(e.into()),
            };
            match from_json_bytes::<Environment>(&bytes) {
                Ok(environment) => environments.push(environment),
                Err(error) => {
                    warn!(path = %path.display(), %error, "skipping unreadable environment");
                }
            }
        }

        Ok(environments)
    }

    async fn save(&self, environment: &Environment) -> Result<(), StoreError> {
        self.environment_document(&environment.id)
            .write(environment)
            .await
    }

    async fn delete(&self, id: &str) -> Result<(), StoreError> {
        self.environment_document(id).remove().await
    }

    async fn load_active_id(&self) -> Result<Option<Id>, StoreError> {
        let pointer: ActivePointer = self.active.read_or_init().await?;
        Ok(pointer.active_environment_id)
    }

    async fn save_active_id(&self, id: Option<&str>) -> Result<(), StoreError> {
        self.active
            .write(&ActivePointer {
                active_environment_id: id.map(str::to_string),
            })
            .await
    }
}

//! A single JSON document on disk.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use serde::Serialize;
use serde::de::DeserializeOwned;
use tokio::fs;
use uuid::Uuid;

use courier_application::ports::StoreError;

use crate::serialization::{from_json_bytes, to_json_stable_bytes};

/// A JSON document at a fixed path.
///
/// Writes go to a sibling temporary file that is then renamed over the
/// target, so readers never observe a partially written document.
#[derive(Debug, Clone)]
pub struct JsonDocument {
    path: PathBuf,
}

impl JsonDocument {
    /// Creates a handle for the document at `path`. Nothing is touched on disk.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Returns the document path.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Reads the document, or `None` if it does not exist.
    ///
    /// # Errors
    /// Returns an error if the file exists but cannot be read or parsed.
    pub async fn read<T: DeserializeOwned>(&self) -> Result<Option<T>, StoreError> {
        match fs::read(&self.path).await {
            Ok(bytes) => Ok(Some(from_json_bytes(&bytes)?)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    /// Reads the document, first writing `T::default()` if it does not exist.
    ///
    /// # Errors
    /// Returns an error if the file cannot be read, parsed or created.
    pub async fn read_or_init<T>(&self) -> Result<T, StoreError>
    where
        T: DeserializeOwned + Serialize + Default,
    {
        if let Some(value) = self.read().await? {
            return Ok(value);
        }
        let value = T::default();
        self.write(&value).await?;
        tracing::debug!(path = %self.path.display(), "initialized empty document");
        Ok(value)
    }

    /// Atomically replaces the document.
    ///
    /// # Errors
    /// Returns an error if the document cannot be serialized or written.
    pub async fn write<T: Serialize + ?Sized>(&self, value: &T) -> Result<(), StoreError> {
        let bytes = to_json_stable_bytes(value)?;
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).await?;
        }

        let temp = self.temp_path();
        if let Err(e) = fs::write(&temp, &bytes).await {
            let _ = fs::remove_file(&temp).await;
            return Err(e.into());
        }
        if let Err(e) = fs::rename(&temp, &self.path).await {
            let _ = fs::remove_file(&temp).await;
            return Err(e.into());
        }
        Ok(())
    }

    /// Deletes the document. A missing document is not an error.
    ///
    /// # Errors
    /// Returns an error if the file exists but cannot be removed.
    pub async fn remove(&self) -> Result<(), StoreError> {
        match fs::remove_file(&self.path).await {
            Err(e) if e.kind() != ErrorKind::NotFound => Err(e.into()),
            _ => Ok(()),
        }
    }

    fn temp_path(&self) -> PathBuf {
        let name = self
            .path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        self.path
            .with_file_name(format!(".{name}.{}.tmp", Uuid::now_v7().simple()))
    }
}

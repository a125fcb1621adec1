//! Filesystem-backed storage; files are served back by the HTTP layer.

use std::path::{Component, Path, PathBuf};

use async_trait::async_trait;
use tracing::{debug, info};

use super::FileStorage;
use crate::core::config::LocalStorageConfig;
use crate::core::error::{AppError, Result};

pub struct LocalStorage {
    root: PathBuf,
    public_path: String,
}

impl LocalStorage {
    pub async fn new(config: &LocalStorageConfig) -> Result<Self> {
        let root = PathBuf::from(&config.upload_dir);
        tokio::fs::create_dir_all(&root).await.map_err(|e| {
            AppError::Internal(format!(
                "Failed to create upload directory '{}': {}",
                root.display(),
                e
            ))
        })?;

        info!(
            "Local storage initialized at '{}', served under '{}'",
            root.display(),
            config.public_path
        );

        Ok(Self {
            root,
            public_path: config.public_path.clone(),
        })
    }

    #[cfg(test)]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Resolve a key below the upload root, refusing anything that escapes it
    fn resolve(&self, key: &str) -> Result<PathBuf> {
        let relative = Path::new(key);
        let safe = relative
            .components()
            .all(|c| matches!(c, Component::Normal(_)));

        if key.is_empty() || !safe {
            return Err(AppError::BadRequest(format!("Invalid file key '{}'", key)));
        }

        Ok(self.root.join(relative))
    }

    fn key_from_path<'a>(&self, path: &'a str) -> Option<&'a str> {
        path.strip_prefix(&self.public_path)
            .and_then(|rest| rest.strip_prefix('/'))
    }
}

#[async_trait]
impl FileStorage for LocalStorage {
    async fn upload(&self, key: &str, data: Vec<u8>, _content_type: &str) -> Result<String> {
        let target = self.resolve(key)?;

        if let Some(parent) = target.parent() {
            tokio::fs::create_dir_all(parent).await.map_err(|e| {
                AppError::Internal(format!("Failed to create directory for '{}': {}", key, e))
            })?;
        }

        tokio::fs::write(&target, data)
            .await
            .map_err(|e| AppError::Internal(format!("Failed to upload file '{}': {}", key, e)))?;

        debug!("Stored file '{}' at '{}'", key, target.display());
        Ok(format!("{}/{}", self.public_path, key))
    }

    async fn delete(&self, path: &str) -> Result<()> {
        let key = self
            .key_from_path(path)
            .ok_or_else(|| AppError::BadRequest(format!("Unknown file path '{}'", path)))?;
        let target = self.resolve(key)?;

        match tokio::fs::remove_file(&target).await {
            Ok(()) => {
                debug!("Deleted file '{}'", target.display());
                Ok(())
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(AppError::Internal(format!(
                "Failed to delete file '{}': {}",
                path, e
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    async fn temp_storage() -> LocalStorage {
        let dir = std::env::temp_dir().join(format!("aduan-test-{}", Uuid::new_v4()));
        LocalStorage::new(&LocalStorageConfig {
            upload_dir: dir.to_string_lossy().to_string(),
            public_path: "/uploads".to_string(),
        })
        .await
        .unwrap()
    }

    #[tokio::test]
    async fn test_upload_then_delete() {
        let storage = temp_storage().await;

        let path = storage
            .upload("complaints/a.png", b"png".to_vec(), "image/png")
            .await
            .unwrap();
        assert_eq!(path, "/uploads/complaints/a.png");
        assert!(storage.root().join("complaints/a.png").exists());

        storage.delete(&path).await.unwrap();
        assert!(!storage.root().join("complaints/a.png").exists());

        // Deleting twice is not an error
        storage.delete(&path).await.unwrap();

        let _ = tokio::fs::remove_dir_all(storage.root()).await;
    }

    #[tokio::test]
    async fn test_rejects_path_traversal() {
        let storage = temp_storage().await;

        let result = storage.upload("../escape.png", vec![1], "image/png").await;
        assert!(matches!(result, Err(AppError::BadRequest(_))));

        let result = storage.delete("/elsewhere/file.png").await;
        assert!(matches!(result, Err(AppError::BadRequest(_))));

        let _ = tokio::fs::remove_dir_all(storage.root()).await;
    }
}

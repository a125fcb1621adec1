//! Storage for uploaded files
//!
//! Complaint attachments, news files, proofs and profile photos all go
//! through [`FileStorage`], backed by either a local directory or a
//! MinIO/S3-compatible bucket.

mod local;
mod minio_client;

use std::sync::Arc;

use async_trait::async_trait;
use uuid::Uuid;

use crate::core::config::{StorageConfig, StorageDriver};
use crate::core::error::{AppError, Result};

pub use local::LocalStorage;
pub use minio_client::MinIOClient;

/// Maximum size of a single uploaded file (10MB)
pub const MAX_FILE_SIZE: usize = 10 * 1024 * 1024;

pub const ALLOWED_MIME_TYPES: &[&str] = &[
    "image/jpeg",
    "image/png",
    "image/gif",
    "image/webp",
    "application/pdf",
];

pub const IMAGE_MIME_TYPES: &[&str] = &["image/jpeg", "image/png", "image/gif", "image/webp"];

/// A file read from a multipart request
#[derive(Debug, Clone)]
pub struct UploadedFile {
    pub file_name: String,
    pub content_type: String,
    pub data: Vec<u8>,
}

#[async_trait]
pub trait FileStorage: Send + Sync {
    /// Store `data` under `key` and return the path clients use to fetch it
    async fn upload(&self, key: &str, data: Vec<u8>, content_type: &str) -> Result<String>;

    /// Remove a file previously returned by [`upload`](FileStorage::upload)
    async fn delete(&self, path: &str) -> Result<()>;
}

/// Build the configured storage backend
pub async fn build_storage(config: &StorageConfig) -> Result<Arc<dyn FileStorage>> {
    match config.driver {
        StorageDriver::Local => Ok(Arc::new(LocalStorage::new(&config.local).await?)),
        StorageDriver::MinIO => Ok(Arc::new(MinIOClient::new(config.minio.clone()).await?)),
    }
}

pub fn get_extension_from_content_type(content_type: &str) -> Option<&'static str> {
    match content_type {
        "image/jpeg" => Some("jpg"),
        "image/png" => Some("png"),
        "image/gif" => Some("gif"),
        "image/webp" => Some("webp"),
        "application/pdf" => Some("pdf"),
        _ => None,
    }
}

/// Check size and MIME type against `allowed`, returning the file extension
pub fn validate_upload(file: &UploadedFile, allowed: &[&str]) -> Result<&'static str> {
    if file.data.len() > MAX_FILE_SIZE {
        return Err(AppError::Validation(format!(
            "File '{}' exceeds maximum size of {}MB",
            file.file_name,
            MAX_FILE_SIZE / 1024 / 1024
        )));
    }

    if !allowed.contains(&file.content_type.as_str()) {
        return Err(AppError::Validation(format!(
            "File type '{}' is not allowed. Allowed types: {}",
            file.content_type,
            allowed.join(", ")
        )));
    }

    get_extension_from_content_type(&file.content_type).ok_or_else(|| {
        AppError::Validation(format!("Unsupported file type '{}'", file.content_type))
    })
}

/// Object key of the form `{folder}/{uuid}.{ext}`
pub fn generate_key(folder: &str, extension: &str) -> String {
    format!("{}/{}.{}", folder, Uuid::now_v7(), extension)
}

/// Validate every file first, then upload them in order. Files already
/// uploaded are removed again when a later upload fails.
pub async fn store_files(
    storage: &dyn FileStorage,
    folder: &str,
    files: Vec<UploadedFile>,
    allowed: &[&str],
) -> Result<Vec<String>> {
    let extensions = files
        .iter()
        .map(|f| validate_upload(f, allowed))
        .collect::<Result<Vec<_>>>()?;

    let mut paths = Vec::with_capacity(files.len());
    for (file, ext) in files.into_iter().zip(extensions) {
        let key = generate_key(folder, ext);
        match storage.upload(&key, file.data, &file.content_type).await {
            Ok(path) => paths.push(path),
            Err(e) => {
                remove_files(storage, &paths).await;
                return Err(e);
            }
        }
    }

    Ok(paths)
}

/// Best-effort removal; failures are logged and otherwise ignored
pub async fn remove_files(storage: &dyn FileStorage, paths: &[String]) {
    for path in paths {
        if let Err(e) = storage.delete(path).await {
            tracing::warn!("Failed to delete stored file '{}': {}", path, e);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn file(content_type: &str, size: usize) -> UploadedFile {
        UploadedFile {
            file_name: "evidence".to_string(),
            content_type: content_type.to_string(),
            data: vec![0u8; size],
        }
    }

    #[test]
    fn test_validate_upload_accepts_allowed_types() {
        assert_eq!(
            validate_upload(&file("image/png", 10), ALLOWED_MIME_TYPES).unwrap(),
            "png"
        );
        assert_eq!(
            validate_upload(&file("application/pdf", 10), ALLOWED_MIME_TYPES).unwrap(),
            "pdf"
        );
    }

    #[test]
    fn test_validate_upload_rejects_unknown_type() {
        let result = validate_upload(&file("text/plain", 10), ALLOWED_MIME_TYPES);
        assert!(matches!(result, Err(AppError::Validation(_))));

        let result = validate_upload(&file("application/pdf", 10), IMAGE_MIME_TYPES);
        assert!(matches!(result, Err(AppError::Validation(_))));
    }

    #[test]
    fn test_validate_upload_rejects_large_file() {
        let result = validate_upload(&file("image/jpeg", MAX_FILE_SIZE + 1), ALLOWED_MIME_TYPES);
        assert!(matches!(result, Err(AppError::Validation(msg)) if msg.contains("10MB")));
    }

    #[test]
    fn test_generate_key() {
        let key = generate_key("complaints", "jpg");
        assert!(key.starts_with("complaints/"));
        assert!(key.ends_with(".jpg"));
    }
}

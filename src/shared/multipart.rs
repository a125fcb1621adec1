//! Collects a `multipart/form-data` body into text fields and uploaded files.

use std::collections::HashMap;

use axum::extract::{DefaultBodyLimit, Multipart};
use tracing::debug;

use crate::core::error::{AppError, Result};
use crate::modules::storage::{UploadedFile, MAX_FILE_SIZE};

/// Upper bound on files accepted in a single request
pub const MAX_FILES_PER_REQUEST: usize = 5;

/// Body limit for an upload route taking up to `max_files` files, with room
/// for multipart overhead and text fields
pub fn upload_body_limit(max_files: usize) -> DefaultBodyLimit {
    DefaultBodyLimit::max(MAX_FILE_SIZE * max_files + 1024 * 1024)
}

/// Parsed multipart form
#[derive(Debug, Default)]
pub struct MultipartForm {
    fields: HashMap<String, String>,
    files: Vec<UploadedFile>,
}

impl MultipartForm {
    /// Read every field of the request. Parts named `file_field` (or carrying a
    /// filename) are treated as uploads; all other parts are read as text.
    pub async fn read(mut multipart: Multipart, file_field: &str) -> Result<Self> {
        let mut form = Self::default();

        while let Some(field) = multipart.next_field().await.map_err(|e| {
            debug!("Failed to read multipart field: {}", e);
            AppError::BadRequest(format!("Failed to read multipart data: {}", e))
        })? {
            let name = field.name().unwrap_or("").to_string();

            if name == file_field || field.file_name().is_some() {
                let content_type = field
                    .content_type()
                    .map(|s| s.to_string())
                    .unwrap_or_else(|| "application/octet-stream".to_string());
                let file_name = field
                    .file_name()
                    .map(|s| s.to_string())
                    .unwrap_or_else(|| "unnamed".to_string());

                let data = field.bytes().await.map_err(|e| {
                    AppError::BadRequest(format!("Failed to read file data: {}", e))
                })?;

                // Browsers send an empty part when no file was chosen
                if data.is_empty() {
                    continue;
                }

                form.files.push(UploadedFile {
                    file_name,
                    content_type,
                    data: data.to_vec(),
                });
            } else {
                let text = field.text().await.map_err(|e| {
                    AppError::BadRequest(format!("Failed to read field '{}': {}", name, e))
                })?;
                form.fields.insert(name, text);
            }
        }

        Ok(form)
    }

    /// Trimmed, non-empty value of a text field
    pub fn text(&self, name: &str) -> Option<&str> {
        self.fields
            .get(name)
            .map(|v| v.trim())
            .filter(|v| !v.is_empty())
    }

    /// Like [`text`](Self::text) but fails when the field is missing or blank
    pub fn required(&self, name: &str) -> Result<&str> {
        self.text(name)
            .ok_or_else(|| AppError::Validation(format!("{} is required", name)))
    }

    /// Parse a required field into any `FromStr` type
    pub fn parse<T: std::str::FromStr>(&self, name: &str) -> Result<T> {
        self.required(name)?
            .parse::<T>()
            .map_err(|_| AppError::Validation(format!("{} is invalid", name)))
    }

    /// Parse a field when present; blank counts as absent
    pub fn parse_optional<T: std::str::FromStr>(&self, name: &str) -> Result<Option<T>> {
        self.text(name)
            .map(|v| {
                v.parse::<T>()
                    .map_err(|_| AppError::Validation(format!("{} is invalid", name)))
            })
            .transpose()
    }

    /// Take the uploaded files, enforcing [`MAX_FILES_PER_REQUEST`]
    pub fn take_files(&mut self) -> Result<Vec<UploadedFile>> {
        if self.files.len() > MAX_FILES_PER_REQUEST {
            return Err(AppError::Validation(format!(
                "At most {} files may be uploaded at once",
                MAX_FILES_PER_REQUEST
            )));
        }
        Ok(std::mem::take(&mut self.files))
    }

    /// Take exactly one uploaded file
    pub fn take_single_file(&mut self) -> Result<UploadedFile> {
        match self.files.len() {
            0 => Err(AppError::Validation("file is required".to_string())),
            1 => Ok(self.files.remove(0)),
            _ => Err(AppError::Validation("Only one file may be uploaded".to_string())),
        }
    }

    #[cfg(test)]
    pub fn from_parts(fields: &[(&str, &str)], files: Vec<UploadedFile>) -> Self {
        Self {
            fields: fields
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
            files,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_text_trims_and_skips_blank() {
        let form = MultipartForm::from_parts(&[("name", "  Budi "), ("empty", "   ")], vec![]);
        assert_eq!(form.text("name"), Some("Budi"));
        assert_eq!(form.text("empty"), None);
        assert_eq!(form.text("missing"), None);
    }

    #[test]
    fn test_take_files_limits() {
        let file = || UploadedFile {
            file_name: "a.png".to_string(),
            content_type: "image/png".to_string(),
            data: vec![1],
        };

        let mut form = MultipartForm::from_parts(&[], vec![]);
        assert!(matches!(form.take_single_file(), Err(AppError::Validation(_))));

        let mut form = MultipartForm::from_parts(&[], vec![file()]);
        assert!(form.take_single_file().is_ok());

        let mut form =
            MultipartForm::from_parts(&[], (0..MAX_FILES_PER_REQUEST + 1).map(|_| file()).collect());
        assert!(matches!(form.take_files(), Err(AppError::Validation(_))));

        let mut form = MultipartForm::from_parts(&[], vec![file(), file()]);
        assert_eq!(form.take_files().unwrap().len(), 2);
        assert!(form.take_files().unwrap().is_empty());
    }

    #[test]
    fn test_required_and_parse() {
        let form = MultipartForm::from_parts(&[("category_id", "1"), ("bad", "x")], vec![]);
        assert_eq!(form.parse::<i64>("category_id").unwrap(), 1);
        assert!(matches!(form.parse::<i64>("bad"), Err(AppError::Validation(_))));
        assert!(matches!(
            form.required("description"),
            Err(AppError::Validation(msg)) if msg == "description is required"
        ));
    }

    #[test]
    fn test_parse_optional() {
        let form = MultipartForm::from_parts(&[("category_id", "2"), ("title", " ")], vec![]);
        assert_eq!(form.parse_optional::<i64>("category_id").unwrap(), Some(2));
        assert_eq!(form.parse_optional::<i64>("title").unwrap(), None);
        assert_eq!(form.parse_optional::<i64>("missing").unwrap(), None);
    }
}

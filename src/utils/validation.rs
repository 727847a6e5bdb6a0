// file: src/utils/validation.rs
// description: data validation utilities and helpers
// reference: input validation patterns

use crate::error::{QaError, Result};
use std::fs;
use std::path::Path;

pub struct Validator;

impl Validator {
    pub fn validate_file_path(path: &Path) -> Result<()> {
        let canonical = fs::canonicalize(path).map_err(|e| {
            QaError::Validation(format!(
                "Cannot canonicalize path {}: {}",
                path.display(),
                e
            ))
        })?;

        if !canonical.is_file() {
            return Err(QaError::Validation(format!(
                "Path is not a file: {}",
                canonical.display()
            )));
        }

        Ok(())
    }

    pub fn validate_directory(path: &Path) -> Result<()> {
        if !path.exists() {
            return Err(QaError::Validation(format!(
                "Directory does not exist: {}",
                path.display()
            )));
        }

        if !path.is_dir() {
            return Err(QaError::Validation(format!(
                "Path is not a directory: {}",
                path.display()
            )));
        }

        Ok(())
    }

    pub fn validate_file_size(path: &Path, max_size_mb: usize) -> Result<u64> {
        let metadata = fs::metadata(path).map_err(|source| QaError::FileOperation {
            path: path.to_path_buf(),
            source,
        })?;

        let size = metadata.len();
        let max_size = (max_size_mb as u64).saturating_mul(1024 * 1024);

        if size > max_size {
            return Err(QaError::Validation(format!(
                "File too large ({} MB, max {} MB): {}",
                size / 1024 / 1024,
                max_size_mb,
                path.display()
            )));
        }

        Ok(size)
    }

    pub fn validate_extension(extension: &str, allowed: &[String]) -> Result<()> {
        if allowed.iter().any(|ext| ext.eq_ignore_ascii_case(extension)) {
            Ok(())
        } else {
            Err(QaError::UnsupportedFormat(format!(
                ".{} (allowed: {})",
                extension,
                allowed.join(", ")
            )))
        }
    }

    pub fn validate_url(url: &str) -> Result<()> {
        if !url.starts_with("http://") && !url.starts_with("https://") {
            return Err(QaError::Validation(format!(
                "Invalid URL format: {}",
                url
            )));
        }
        Ok(())
    }

    /// Truncates on a char boundary, appending an ellipsis when anything was cut.
    pub fn truncate_text(text: &str, max_chars: usize) -> String {
        match text.char_indices().nth(max_chars) {
            Some((idx, _)) => format!("{}...", &text[..idx]),
            None => text.to_string(),
        }
    }
}

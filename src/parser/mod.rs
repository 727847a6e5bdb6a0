// file: src/parser/mod.rs
// description: upload validation and format dispatch for document parsing
// reference: internal module structure

pub mod extract;
pub mod format;

pub use format::DocumentFormat;

use crate::config::UploadConfig;
use crate::error::{QaError, Result};
use crate::utils::Validator;
use std::path::Path;
use tracing::{debug, warn};

pub struct DocumentParser {
    config: UploadConfig,
}

impl DocumentParser {
    pub fn new(config: UploadConfig) -> Self {
        Self { config }
    }

    /// Parses `path`, dispatching on its own extension.
    pub fn parse(&self, path: &Path) -> Result<String> {
        self.parse_as(path, &DocumentFormat::from_path(path))
    }

    /// Parses `path` as `format`, for uploads whose temporary file lost the original name.
    pub fn parse_as(&self, path: &Path, format: &DocumentFormat) -> Result<String> {
        if !format.is_supported() {
            return Err(QaError::UnsupportedFormat(path.display().to_string()));
        }
        Validator::validate_extension(format.extension(), &self.config.allowed_extensions)?;
        Validator::validate_file_path(path)?;
        let size = Validator::validate_file_size(path, self.config.max_file_size_mb)?;

        debug!("Parsing {} ({} bytes) as {}", path.display(), size, format);
        let text = extract::extract_text(path, format)?;

        if text.trim().is_empty() {
            warn!("No text extracted from {}", path.display());
        }

        Ok(text)
    }

    pub fn allows(&self, path: &Path) -> bool {
        let format = DocumentFormat::from_path(path);
        format.is_supported()
            && Validator::validate_extension(format.extension(), &self.config.allowed_extensions)
                .is_ok()
    }
}

impl Default for DocumentParser {
    fn default() -> Self {
        Self::new(UploadConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_parse_dispatches_on_extension() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("inventory.CSV");
        fs::write(&path, "item,qty\nwidget,4\n").unwrap();

        let parser = DocumentParser::default();
        assert_eq!(parser.parse(&path).unwrap(), "item,qty\nwidget,4\n");
    }

    #[test]
    fn test_parse_as_ignores_temp_name() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("upload-7f3a");
        fs::write(&path, "a,b\n").unwrap();

        let parser = DocumentParser::default();
        assert!(parser.parse(&path).is_err());
        assert_eq!(parser.parse_as(&path, &DocumentFormat::Csv).unwrap(), "a,b\n");
    }

    #[test]
    fn test_unsupported_extension() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("notes.txt");
        fs::write(&path, "plain").unwrap();

        let parser = DocumentParser::default();
        let err = parser.parse(&path).unwrap_err();
        assert!(matches!(err, QaError::UnsupportedFormat(_)));
        assert!(err.to_string().starts_with("Unsupported file type:"));
    }

    #[test]
    fn test_config_restricts_extensions() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("data.csv");
        fs::write(&path, "x\n").unwrap();

        let parser = DocumentParser::new(UploadConfig {
            max_file_size_mb: 1,
            allowed_extensions: vec!["pdf".to_string()],
        });
        assert!(!parser.allows(&path));
        assert!(matches!(
            parser.parse(&path),
            Err(QaError::UnsupportedFormat(_))
        ));
    }

    #[test]
    fn test_missing_file() {
        let parser = DocumentParser::default();
        assert!(matches!(
            parser.parse(Path::new("/nonexistent/report.pdf")),
            Err(QaError::Validation(_))
        ));
    }
}

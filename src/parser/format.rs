// file: src/parser/format.rs
// description: closed set of document formats accepted for upload
// reference: extension based dispatch

use std::fmt;
use std::path::Path;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DocumentFormat {
    Pdf,
    Docx,
    Pptx,
    Xlsx,
    Csv,
    /// Anything else, carrying the lower-cased extension (empty when there is none).
    Unsupported(String),
}

impl DocumentFormat {
    pub const SUPPORTED: [DocumentFormat; 5] = [
        DocumentFormat::Pdf,
        DocumentFormat::Docx,
        DocumentFormat::Pptx,
        DocumentFormat::Xlsx,
        DocumentFormat::Csv,
    ];

    pub fn from_extension(extension: &str) -> Self {
        match extension.to_lowercase().as_str() {
            "pdf" => Self::Pdf,
            "docx" => Self::Docx,
            "pptx" => Self::Pptx,
            "xlsx" => Self::Xlsx,
            "csv" => Self::Csv,
            other => Self::Unsupported(other.to_string()),
        }
    }

    pub fn from_path(path: &Path) -> Self {
        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or_default();
        Self::from_extension(extension)
    }

    pub fn is_supported(&self) -> bool {
        !matches!(self, Self::Unsupported(_))
    }

    pub fn extension(&self) -> &str {
        match self {
            Self::Pdf => "pdf",
            Self::Docx => "docx",
            Self::Pptx => "pptx",
            Self::Xlsx => "xlsx",
            Self::Csv => "csv",
            Self::Unsupported(ext) => ext,
        }
    }
}

impl fmt::Display for DocumentFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unsupported(ext) if ext.is_empty() => write!(f, "(no extension)"),
            other => write!(f, ".{}", other.extension()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_path() {
        assert_eq!(DocumentFormat::from_path(Path::new("a/Report.PDF")), DocumentFormat::Pdf);
        assert_eq!(DocumentFormat::from_path(Path::new("deck.pptx")), DocumentFormat::Pptx);
        assert_eq!(
            DocumentFormat::from_path(Path::new("notes.txt")),
            DocumentFormat::Unsupported("txt".to_string())
        );
        assert_eq!(
            DocumentFormat::from_path(Path::new("Makefile")),
            DocumentFormat::Unsupported(String::new())
        );
    }

    #[test]
    fn test_supported_set() {
        assert!(DocumentFormat::SUPPORTED.iter().all(|f| f.is_supported()));
        assert!(!DocumentFormat::from_extension("doc").is_supported());
        assert_eq!(DocumentFormat::Xlsx.to_string(), ".xlsx");
        assert_eq!(DocumentFormat::Unsupported(String::new()).to_string(), "(no extension)");
    }
}

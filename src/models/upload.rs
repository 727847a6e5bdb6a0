// file: src/models/upload.rs
// description: upload batch input and per-file outcome reporting
// reference: internal data structures

use std::fmt;
use std::path::{Path, PathBuf};
use uuid::Uuid;

/// One file of an upload batch: the name the user gave it and where its bytes live.
#[derive(Debug, Clone)]
pub struct UploadedFile {
    pub original_name: String,
    pub path: PathBuf,
}

impl UploadedFile {
    pub fn new(original_name: impl Into<String>, path: impl Into<PathBuf>) -> Self {
        Self {
            original_name: original_name.into(),
            path: path.into(),
        }
    }

    /// Uses the file's own name as the original name.
    pub fn from_path(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let original_name = path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_else(|| path.display().to_string());

        Self {
            original_name,
            path,
        }
    }

    /// Base name of the original name, as shown in upload messages.
    pub fn display_name(&self) -> String {
        Path::new(&self.original_name)
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_else(|| self.original_name.clone())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum FileOutcome {
    Stored { name: String, id: String },
    Failed { name: String, error: String },
}

impl FileOutcome {
    pub fn is_stored(&self) -> bool {
        matches!(self, Self::Stored { .. })
    }
}

impl fmt::Display for FileOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Stored { name, .. } => {
                write!(f, "File '{}' uploaded and parsed successfully!", name)
            }
            Self::Failed { name, error } => write!(f, "Error uploading '{}': {}", name, error),
        }
    }
}

#[derive(Debug, Clone)]
pub struct UploadReport {
    pub batch_id: Option<Uuid>,
    pub outcomes: Vec<FileOutcome>,
}

impl UploadReport {
    /// Report for a batch with no files; the store is left untouched.
    pub fn empty() -> Self {
        Self {
            batch_id: None,
            outcomes: Vec::new(),
        }
    }

    pub fn stored_count(&self) -> usize {
        self.outcomes.iter().filter(|o| o.is_stored()).count()
    }

    pub fn failed_count(&self) -> usize {
        self.outcomes.len() - self.stored_count()
    }
}

impl fmt::Display for UploadReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.batch_id.is_none() {
            return write!(f, "No files were uploaded.");
        }

        let lines: Vec<String> = self.outcomes.iter().map(|o| o.to_string()).collect();
        write!(f, "{}", lines.join("\n"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_report_rendering() {
        let report = UploadReport {
            batch_id: Some(Uuid::new_v4()),
            outcomes: vec![
                FileOutcome::Stored {
                    name: "Budget.xlsx".to_string(),
                    id: "budget.xlsx".to_string(),
                },
                FileOutcome::Failed {
                    name: "notes.txt".to_string(),
                    error: "Unsupported file type: notes.txt".to_string(),
                },
            ],
        };

        assert_eq!(
            report.to_string(),
            "File 'Budget.xlsx' uploaded and parsed successfully!\n\
             Error uploading 'notes.txt': Unsupported file type: notes.txt"
        );
        assert_eq!(report.stored_count(), 1);
        assert_eq!(report.failed_count(), 1);
    }

    #[test]
    fn test_empty_report() {
        assert_eq!(UploadReport::empty().to_string(), "No files were uploaded.");
    }

    #[test]
    fn test_uploaded_file_from_path() {
        let file = UploadedFile::from_path("/tmp/batch/Deck.pptx");
        assert_eq!(file.original_name, "Deck.pptx");
    }

    #[test]
    fn test_display_name_drops_directories() {
        let file = UploadedFile::new("reports/Q3.PDF", "/tmp/gradio-tmp-7");
        assert_eq!(file.display_name(), "Q3.PDF");
        assert_eq!(UploadedFile::new("Budget.xlsx", "/tmp/x").display_name(), "Budget.xlsx");
    }
}

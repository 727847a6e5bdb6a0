// file: src/pipeline/upload.rs
// description: upload batch handling that parses files and replaces the store contents
// reference: per-file error isolation within a batch

use super::progress::UploadProgress;
use crate::models::{FileOutcome, StoredDocument, UploadReport, UploadedFile};
use crate::parser::{DocumentFormat, DocumentParser};
use crate::store::DocumentStore;
use std::path::Path;
use tracing::{error, info};
use uuid::Uuid;

pub struct UploadHandler {
    parser: DocumentParser,
    show_progress: bool,
}

impl UploadHandler {
    pub fn new(parser: DocumentParser) -> Self {
        Self {
            parser,
            show_progress: false,
        }
    }

    pub fn with_progress(mut self, show_progress: bool) -> Self {
        self.show_progress = show_progress;
        self
    }

    pub fn parser(&self) -> &DocumentParser {
        &self.parser
    }

    /// Parses every file of `batch`, then swaps the store contents for the parsed documents.
    ///
    /// An empty batch leaves the store untouched. A file that fails to parse is
    /// reported and skipped; the rest of the batch is still stored.
    pub async fn upload(&self, store: &DocumentStore, batch: Vec<UploadedFile>) -> UploadReport {
        if batch.is_empty() {
            return UploadReport::empty();
        }

        let batch_id = Uuid::new_v4();
        info!("Upload batch {} with {} file(s)", batch_id, batch.len());

        let progress = UploadProgress::new(batch.len(), self.show_progress);
        let mut documents = Vec::with_capacity(batch.len());
        let mut outcomes = Vec::with_capacity(batch.len());

        for file in batch {
            let name = file.display_name();
            progress.start_file(&name);
            let format = DocumentFormat::from_path(Path::new(&file.original_name));

            match self.parser.parse_as(&file.path, &format) {
                Ok(text) => {
                    let document = StoredDocument::new(&file.original_name, text);
                    progress.inc_parsed(document.size() as u64);
                    outcomes.push(FileOutcome::Stored {
                        name,
                        id: document.id.clone(),
                    });
                    documents.push(document);
                }
                Err(e) => {
                    error!("Failed to parse {}: {}", name, e);
                    progress.inc_failed();
                    outcomes.push(FileOutcome::Failed {
                        name,
                        error: e.to_string(),
                    });
                }
            }
        }

        progress.finish();
        let stored = store.replace_all(documents).await;
        let stats = progress.get_stats();
        info!(
            "Batch {} complete: {} stored, {} failed ({:.1}% parsed), {} bytes of text in {} ms",
            batch_id,
            stored,
            stats.files_failed,
            stats.success_rate(),
            stats.total_bytes_extracted,
            stats.duration_ms
        );

        UploadReport {
            batch_id: Some(batch_id),
            outcomes,
        }
    }
}

impl Default for UploadHandler {
    fn default() -> Self {
        Self::new(DocumentParser::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::fs;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_upload_stores_by_lowercased_original_name() {
        let temp = TempDir::new().unwrap();
        let tmp_path = temp.path().join("gradio-tmp-1");
        fs::write(&tmp_path, "region,total\nnorth,10\n").unwrap();

        let store = DocumentStore::new();
        let report = UploadHandler::default()
            .upload(&store, vec![UploadedFile::new("Sales.CSV", &tmp_path)])
            .await;

        assert_eq!(
            report.to_string(),
            "File 'Sales.CSV' uploaded and parsed successfully!"
        );
        assert_eq!(store.ids().await, vec!["sales.csv"]);
    }

    #[tokio::test]
    async fn test_report_names_files_by_base_name() {
        let temp = TempDir::new().unwrap();
        let tmp_path = temp.path().join("gradio-tmp-2");
        fs::write(&tmp_path, "quarter,revenue
q3,12
").unwrap();

        let store = DocumentStore::new();
        let report = UploadHandler::default()
            .upload(&store, vec![UploadedFile::new("reports/Q3.CSV", &tmp_path)])
            .await;

        assert_eq!(
            report.to_string(),
            "File 'Q3.CSV' uploaded and parsed successfully!"
        );
        assert_eq!(store.ids().await, vec!["q3.csv"]);
    }

    #[tokio::test]
    async fn test_failed_file_does_not_block_batch() {
        let temp = TempDir::new().unwrap();
        let good = temp.path().join("good.csv");
        let bad = temp.path().join("notes.txt");
        fs::write(&good, "a,b\n").unwrap();
        fs::write(&bad, "plain").unwrap();

        let store = DocumentStore::new();
        let report = UploadHandler::default()
            .upload(
                &store,
                vec![UploadedFile::from_path(&bad), UploadedFile::from_path(&good)],
            )
            .await;

        assert_eq!(report.stored_count(), 1);
        assert_eq!(report.failed_count(), 1);
        assert!(report.outcomes[0]
            .to_string()
            .starts_with("Error uploading 'notes.txt': Unsupported file type:"));
        assert_eq!(store.ids().await, vec!["good.csv"]);
    }

    #[tokio::test]
    async fn test_new_batch_replaces_previous() {
        let temp = TempDir::new().unwrap();
        let first = temp.path().join("first.csv");
        let second = temp.path().join("second.csv");
        fs::write(&first, "old\n").unwrap();
        fs::write(&second, "new\n").unwrap();

        let store = DocumentStore::new();
        let handler = UploadHandler::default();
        handler
            .upload(&store, vec![UploadedFile::from_path(&first)])
            .await;
        handler
            .upload(&store, vec![UploadedFile::from_path(&second)])
            .await;

        assert_eq!(store.ids().await, vec!["second.csv"]);
    }

    #[tokio::test]
    async fn test_all_failures_still_clear_store() {
        let temp = TempDir::new().unwrap();
        let first = temp.path().join("first.csv");
        fs::write(&first, "old\n").unwrap();

        let store = DocumentStore::new();
        let handler = UploadHandler::default();
        handler
            .upload(&store, vec![UploadedFile::from_path(&first)])
            .await;
        let report = handler
            .upload(&store, vec![UploadedFile::new("missing.pdf", "/nonexistent/missing.pdf")])
            .await;

        assert_eq!(report.failed_count(), 1);
        assert!(store.is_empty().await);
    }

    #[tokio::test]
    async fn test_empty_batch_keeps_store() {
        let temp = TempDir::new().unwrap();
        let first = temp.path().join("first.csv");
        fs::write(&first, "old\n").unwrap();

        let store = DocumentStore::new();
        let handler = UploadHandler::default();
        handler
            .upload(&store, vec![UploadedFile::from_path(&first)])
            .await;
        let report = handler.upload(&store, Vec::new()).await;

        assert_eq!(report.to_string(), "No files were uploaded.");
        assert_eq!(store.ids().await, vec!["first.csv"]);
    }
}

// file: src/pipeline/service.rs
// description: upload and query boundaries over an owned document store
// reference: request routing and dispatch

use super::composer::Composer;
use super::upload::UploadHandler;
use crate::llm::Generator;
use crate::models::{Response, UploadReport, UploadedFile};
use crate::retrieval::{QueryKind, classify, extract_keywords, find_most_relevant, rank_documents};
use crate::store::DocumentStore;
use std::sync::Arc;
use tracing::info;

/// Per-document scores for a query, without generating anything.
#[derive(Debug, Clone, PartialEq)]
pub struct Ranking {
    pub keywords: Vec<String>,
    pub scores: Vec<(String, usize)>,
    pub selected: Option<String>,
}

pub struct QaService {
    store: Arc<DocumentStore>,
    generator: Arc<dyn Generator>,
    uploader: UploadHandler,
}

impl QaService {
    pub fn new(
        store: Arc<DocumentStore>,
        generator: Arc<dyn Generator>,
        uploader: UploadHandler,
    ) -> Self {
        Self {
            store,
            generator,
            uploader,
        }
    }

    pub fn store(&self) -> &Arc<DocumentStore> {
        &self.store
    }

    pub async fn upload(&self, batch: Vec<UploadedFile>) -> UploadReport {
        self.uploader.upload(&self.store, batch).await
    }

    /// Routes and evaluates `query` against one snapshot of the store.
    pub async fn respond(&self, query: &str) -> Response {
        let documents = self.store.read().await;
        let composer = Composer::new(self.generator.as_ref());

        match classify(query) {
            QueryKind::SummarizeAll => {
                info!("Summarizing {} document(s)", documents.len());
                Response::Summaries(composer.summarize_all(&documents).await)
            }
            QueryKind::TargetedQuestion => {
                Response::Answer(composer.answer(query, &documents).await)
            }
        }
    }

    pub async fn ask(&self, query: &str) -> String {
        self.respond(query).await.to_string()
    }

    pub async fn rank(&self, query: &str) -> Ranking {
        let documents = self.store.read().await;
        let keywords = extract_keywords(query);

        Ranking {
            scores: rank_documents(&keywords, &documents),
            selected: find_most_relevant(query, &documents),
            keywords,
        }
    }
}

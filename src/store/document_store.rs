// file: src/store/document_store.rs
// description: in-memory document store replaced wholesale per upload batch
// reference: https://docs.rs/indexmap, https://docs.rs/tokio/latest/tokio/sync/struct.RwLock.html

use crate::models::StoredDocument;
use indexmap::IndexMap;
use tokio::sync::{RwLock, RwLockReadGuard};
use tracing::{debug, info};

/// Documents keyed by normalized filename, in insertion order.
pub type Documents = IndexMap<String, StoredDocument>;

/// Owned store for the current upload batch.
///
/// Writers hold the write lock across clear and repopulate; a query holds one
/// read guard for its whole evaluation, so it never sees a half-replaced batch.
#[derive(Debug, Default)]
pub struct DocumentStore {
    documents: RwLock<Documents>,
}

impl DocumentStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Consistent snapshot for one query evaluation.
    pub async fn read(&self) -> RwLockReadGuard<'_, Documents> {
        self.documents.read().await
    }

    /// Drops every stored document and inserts `batch` in order.
    ///
    /// A repeated id keeps its first position and takes the later text.
    pub async fn replace_all(&self, batch: Vec<StoredDocument>) -> usize {
        let mut documents = self.documents.write().await;
        let previous = documents.len();
        documents.clear();

        for document in batch {
            debug!("Storing {} ({} bytes)", document.id, document.size());
            documents.insert(document.id.clone(), document);
        }

        info!(
            "Document store replaced: {} previous, {} current",
            previous,
            documents.len()
        );
        documents.len()
    }

    pub async fn len(&self) -> usize {
        self.documents.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.documents.read().await.is_empty()
    }

    pub async fn ids(&self) -> Vec<String> {
        self.documents.read().await.keys().cloned().collect()
    }
}

// file: src/lib.rs
// description: library entry point and public api exports
// reference: rust library patterns
#![doc = include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/readme.md"))]

pub mod config;
pub mod error;
pub mod llm;
pub mod models;
pub mod parser;
pub mod pipeline;
pub mod retrieval;
pub mod store;
pub mod utils;

pub use config::{Config, GenerationConfig, UploadConfig};
pub use error::{QaError, Result};
pub use llm::{Generator, GroqChatClient};
pub use models::{Answer, FileOutcome, Response, StoredDocument, SummarySection, UploadReport, UploadedFile};
pub use parser::{DocumentFormat, DocumentParser};
pub use pipeline::{Composer, QaService, Ranking, UploadHandler};
pub use retrieval::{QueryKind, classify, extract_keywords, find_most_relevant};
pub use store::{DocumentStore, Documents};
pub use utils::Validator;

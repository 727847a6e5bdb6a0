// file: src/pipeline/mod.rs
// description: pipeline module exports and public api
// reference: upload and query orchestration

pub mod composer;
pub mod progress;
pub mod service;
pub mod upload;

pub use composer::{Composer, answer_prompt, summary_prompt};
pub use progress::{UploadProgress, UploadStats};
pub use service::{QaService, Ranking};
pub use upload::UploadHandler;

// file: src/store/mod.rs
// description: document store module exports
// reference: internal module structure

pub mod document_store;

pub use document_store::{DocumentStore, Documents};

//! Storage module for persisted documents
//!
//! Provides whole-document JSON storage on the local filesystem.

mod json_document;

pub use json_document::{JsonDocument, StoreError};

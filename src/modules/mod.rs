//! Modules layer - Infrastructure components for external integrations
//!
//! Contains adapters for infrastructure such as on-disk storage.

pub mod storage;

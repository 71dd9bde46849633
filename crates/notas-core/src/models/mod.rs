//! Data models: documents, output records and configuration.

pub mod config;
pub mod document;
pub mod record;

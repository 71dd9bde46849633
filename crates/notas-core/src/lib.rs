//! Core library for NFe/CTe fiscal document extraction.
//!
//! This crate provides:
//! - Namespace-tolerant navigation of NFe and CTe XML documents
//! - ICMS regime resolution, PIS/COFINS and item charge extraction
//! - Per-CFOP aggregation of line items
//! - Fixed-column output records with comma-decimal display values

pub mod aggregate;
pub mod assembler;
pub mod engine;
pub mod error;
pub mod fiscal;
pub mod models;
pub mod numeric;
pub mod patterns;
pub mod tax;
pub mod xml;

#[cfg(test)]
mod fixtures;

pub use aggregate::{CfopGroups, TaxGroup};
pub use assembler::RecordAssembler;
pub use engine::{BatchResult, DocumentFailure, Engine, SourceDocument};
pub use error::{DocumentError, NotasError, Result};
pub use fiscal::{CteReader, DocumentReader, ExtractedDocument, NfeReader};
pub use models::config::{ExtractionConfig, KindSelection, NotasConfig, OutputConfig, TableFormat};
pub use models::document::{Document, DocumentKind, LineItem, Party, TaxSnapshot};
pub use models::record::{Column, OutputMode, OutputRecord};
pub use numeric::{format_decimal, parse_decimal};
pub use tax::IcmsPolicy;

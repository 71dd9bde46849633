//! Batch driver: parse, locate, read, assemble.

use serde::{Serialize, Serializer};
use tracing::{debug, info, warn};

use crate::assembler::RecordAssembler;
use crate::error::DocumentError;
use crate::fiscal::{CteReader, DocumentReader, ExtractedDocument, NfeReader};
use crate::models::config::{ExtractionConfig, KindSelection};
use crate::models::document::DocumentKind;
use crate::models::record::{OutputMode, OutputRecord};
use crate::xml::SchemaNavigator;

const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

/// One input document as handed over by the caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceDocument {
    /// Name used when reporting failures (file name, archive entry, ...).
    pub name: String,
    pub bytes: Vec<u8>,
}

impl SourceDocument {
    pub fn new(name: impl Into<String>, bytes: impl Into<Vec<u8>>) -> Self {
        Self {
            name: name.into(),
            bytes: bytes.into(),
        }
    }
}

/// A skipped document and the reason it was skipped.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DocumentFailure {
    pub name: String,
    #[serde(rename = "reason", serialize_with = "serialize_display")]
    pub error: DocumentError,
}

fn serialize_display<S: Serializer>(error: &DocumentError, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.collect_str(error)
}

/// Best-effort outcome of a batch.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct BatchResult {
    /// Records of every document that succeeded, in input order.
    pub records: Vec<OutputRecord>,

    /// Skipped documents, in input order.
    pub failures: Vec<DocumentFailure>,

    /// Number of documents handed in.
    pub documents: usize,
}

impl BatchResult {
    /// Number of documents that produced records.
    pub fn processed(&self) -> usize {
        self.documents.saturating_sub(self.failures.len())
    }

    pub fn is_complete(&self) -> bool {
        self.failures.is_empty()
    }

    /// Append the outcome of a later batch.
    pub fn extend(&mut self, other: BatchResult) {
        self.records.extend(other.records);
        self.failures.extend(other.failures);
        self.documents += other.documents;
    }
}

/// The extraction-and-aggregation engine.
///
/// Holds no per-document state; one engine can process any number of
/// documents, from any number of threads.
#[derive(Debug, Clone)]
pub struct Engine {
    navigator: SchemaNavigator,
    nfe: NfeReader,
    cte: CteReader,
    kind: KindSelection,
    assembler: RecordAssembler,
    #[cfg_attr(not(feature = "parallel"), allow(dead_code))]
    parallel: bool,
}

impl Engine {
    /// Create an engine from extraction settings.
    pub fn new(config: &ExtractionConfig) -> Self {
        let navigator = SchemaNavigator::from_config(config);
        let nfe = NfeReader::new(navigator.reader(DocumentKind::Nfe).clone(), config.icms_policy);
        let cte = CteReader::new(navigator.reader(DocumentKind::Cte).clone(), config.icms_policy);

        Self {
            navigator,
            nfe,
            cte,
            kind: config.kind,
            assembler: RecordAssembler::new(config.mode),
            parallel: config.parallel,
        }
    }

    /// Set the output mode.
    pub fn with_mode(mut self, mode: OutputMode) -> Self {
        self.assembler = RecordAssembler::new(mode);
        self
    }

    /// Set the schema family selection.
    pub fn with_kind(mut self, kind: KindSelection) -> Self {
        self.kind = kind;
        self
    }

    /// Enable or disable per-document parallelism.
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    pub fn mode(&self) -> OutputMode {
        self.assembler.mode()
    }

    fn reader(&self, kind: DocumentKind) -> &dyn DocumentReader {
        match kind {
            DocumentKind::Nfe => &self.nfe,
            DocumentKind::Cte => &self.cte,
        }
    }

    /// Parse one document and read its header and items.
    pub fn extract(&self, bytes: &[u8]) -> Result<ExtractedDocument, DocumentError> {
        let bytes = bytes.strip_prefix(UTF8_BOM).unwrap_or(bytes);
        let text = std::str::from_utf8(bytes)?;
        let tree = roxmltree::Document::parse(text)?;

        let (kind, info) = match self.kind {
            KindSelection::Auto => self.navigator.detect(&tree).ok_or(DocumentError::UnknownKind)?,
            KindSelection::Nfe => self.locate(&tree, DocumentKind::Nfe)?,
            KindSelection::Cte => self.locate(&tree, DocumentKind::Cte)?,
        };

        let reader = self.reader(kind);
        let extracted = reader.read(info);
        let document = &extracted.document;
        if !document.issue_date.is_empty() && document.issued_on().is_none() {
            debug!(
                "{} {}: issue date {:?} is not a calendar date",
                reader.kind(),
                document.access_key,
                document.issue_date
            );
        }
        debug!(
            "read {} {} with {} item(s)",
            reader.kind(),
            document.access_key,
            extracted.items.len()
        );
        Ok(extracted)
    }

    fn locate<'a, 'input>(
        &self,
        tree: &'a roxmltree::Document<'input>,
        kind: DocumentKind,
    ) -> Result<(DocumentKind, roxmltree::Node<'a, 'input>), DocumentError> {
        self.navigator
            .locate(tree, kind)
            .map(|info| (kind, info))
            .ok_or(DocumentError::MissingCore { kind })
    }

    /// Records of an extracted document in the configured mode.
    pub fn assemble(&self, extracted: &ExtractedDocument) -> Vec<OutputRecord> {
        self.assembler.assemble(extracted)
    }

    /// Extract and assemble one document.
    pub fn process_document(&self, bytes: &[u8]) -> Result<Vec<OutputRecord>, DocumentError> {
        let extracted = self.extract(bytes)?;
        Ok(self.assemble(&extracted))
    }

    /// Process a batch. Failures are isolated per document and reported
    /// alongside the records of the documents that succeeded.
    pub fn process_batch(&self, sources: &[SourceDocument]) -> BatchResult {
        info!("Processing {} document(s) in {:?} mode", sources.len(), self.mode());

        let mut result = BatchResult {
            documents: sources.len(),
            ..BatchResult::default()
        };

        for (source, outcome) in sources.iter().zip(self.run(sources)) {
            match outcome {
                Ok(records) => result.records.extend(records),
                Err(error) => {
                    warn!("Skipping {}: {}", source.name, error);
                    result.failures.push(DocumentFailure {
                        name: source.name.clone(),
                        error,
                    });
                }
            }
        }

        info!(
            "Batch finished: {} processed, {} skipped, {} record(s)",
            result.processed(),
            result.failures.len(),
            result.records.len()
        );
        result
    }

    #[cfg(feature = "parallel")]
    fn run(&self, sources: &[SourceDocument]) -> Vec<Result<Vec<OutputRecord>, DocumentError>> {
        use rayon::prelude::*;

        if self.parallel {
            sources.par_iter().map(|s| self.process_document(&s.bytes)).collect()
        } else {
            sources.iter().map(|s| self.process_document(&s.bytes)).collect()
        }
    }

    #[cfg(not(feature = "parallel"))]
    fn run(&self, sources: &[SourceDocument]) -> Vec<Result<Vec<OutputRecord>, DocumentError>> {
        sources.iter().map(|s| self.process_document(&s.bytes)).collect()
    }
}

impl Default for Engine {
    fn default() -> Self {
        Self::new(&ExtractionConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures;
    use crate::models::record::Column;
    use pretty_assertions::assert_eq;

    fn group_engine() -> Engine {
        Engine::default().with_mode(OutputMode::Group)
    }

    fn batch(documents: &[&str]) -> Vec<SourceDocument> {
        documents
            .iter()
            .enumerate()
            .map(|(i, xml)| SourceDocument::new(format!("doc{}.xml", i + 1), xml.as_bytes()))
            .collect()
    }

    #[test]
    fn test_group_mode_sums_same_cfop() {
        let records = group_engine().process_document(fixtures::NFE_TWO_ITEMS.as_bytes()).unwrap();

        assert_eq!(records.len(), 2);
        let first = &records[0];
        assert_eq!(first.get(Column::Cfop), "5102");
        assert_eq!(first.get(Column::LineTotal), "150,00");
        assert_eq!(first.get(Column::IcmsBase), "140,00");
        assert_eq!(first.get(Column::IcmsValue), "25,20");
        assert_eq!(first.get(Column::IcmsExempted), "1,80");
        assert_eq!(first.get(Column::PisValue), "2,48");
        assert_eq!(first.get(Column::Freight), "30,00");
        assert_eq!(first.get(Column::ProductCode), "");

        let second = &records[1];
        assert_eq!(second.get(Column::Cfop), "6102");
        assert_eq!(second.get(Column::LineTotal), "200,00");
        assert_eq!(second.get(Column::IcmsStValue), "26,40");
    }

    #[test]
    fn test_item_mode_one_record_per_item() {
        let records = Engine::default().process_document(fixtures::NFE_TWO_ITEMS.as_bytes()).unwrap();

        assert_eq!(records.len(), 3);
        assert_eq!(records[0].get(Column::IssueDate), "2020-08-10");
        assert_eq!(records[0].get(Column::ItemNote), "Lote 42");
        assert_eq!(records[1].get(Column::LineTotal), "50,00");
        assert_eq!(records[2].get(Column::Unit), "CX");
    }

    #[test]
    fn test_mixed_batch_skips_malformed_document() {
        let sources = batch(&[fixtures::NFE_TWO_ITEMS, fixtures::MALFORMED, fixtures::CTE_BASIC]);
        let result = group_engine().process_batch(&sources);

        assert_eq!(result.documents, 3);
        assert_eq!(result.processed(), 2);
        assert_eq!(result.failures.len(), 1);
        assert_eq!(result.failures[0].name, "doc2.xml");
        assert!(matches!(result.failures[0].error, DocumentError::Malformed(_)));

        let numbers: Vec<_> = result.records.iter().map(|r| r.get(Column::Number)).collect();
        assert_eq!(numbers, ["1", "1", "321"]);
    }

    #[test]
    fn test_missing_recipient_is_empty() {
        let records = Engine::default().process_document(fixtures::NFE_NO_NAMESPACE.as_bytes()).unwrap();

        assert_eq!(records[0].get(Column::RecipientTaxId), "");
        assert_eq!(records[0].get(Column::IcmsBase), "0,00");
        assert_eq!(records[0].get(Column::IcmsRate), "0,00");
        assert_eq!(records[0].get(Column::IcmsValue), "0,00");
    }

    #[test]
    fn test_rerun_is_identical() {
        let sources = batch(&[fixtures::NFE_TWO_ITEMS, fixtures::CTE_BASIC, fixtures::NFE_MIXED_STYLES]);
        let engine = group_engine();

        assert_eq!(engine.process_batch(&sources), engine.process_batch(&sources));
    }

    #[test]
    fn test_parallel_and_sequential_agree() {
        let sources = batch(&[
            fixtures::NFE_TWO_ITEMS,
            fixtures::MALFORMED,
            fixtures::NFE_NO_NAMESPACE,
            fixtures::CTE_BASIC,
        ]);

        let parallel = Engine::default().with_parallel(true).process_batch(&sources);
        let sequential = Engine::default().with_parallel(false).process_batch(&sources);
        assert_eq!(parallel, sequential);
    }

    #[test]
    fn test_kind_selection() {
        let cte_only = Engine::default().with_kind(KindSelection::Cte);
        assert_eq!(
            cte_only.extract(fixtures::NFE_TWO_ITEMS.as_bytes()).unwrap_err(),
            DocumentError::MissingCore { kind: DocumentKind::Cte }
        );
        assert!(cte_only.extract(fixtures::CTE_BASIC.as_bytes()).is_ok());

        let auto = Engine::default();
        assert_eq!(
            auto.extract(b"<resNFe><chNFe>1</chNFe></resNFe>").unwrap_err(),
            DocumentError::UnknownKind
        );
    }

    #[test]
    fn test_cte_listing_carried_invoices_is_not_an_nfe() {
        let extracted = Engine::default().extract(fixtures::CTE_WITH_NFE_REFS.as_bytes()).unwrap();
        assert_eq!(extracted.document.kind, DocumentKind::Cte);
        assert_eq!(extracted.document.number, "456");

        let records = Engine::default().process_document(fixtures::CTE_WITH_NFE_REFS.as_bytes()).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].get(Column::Cfop), "6353");
        assert_eq!(records[0].get(Column::LineTotal), "820,00");

        let nfe_only = Engine::default().with_kind(KindSelection::Nfe);
        assert_eq!(
            nfe_only.extract(fixtures::CTE_WITH_NFE_REFS.as_bytes()).unwrap_err(),
            DocumentError::MissingCore { kind: DocumentKind::Nfe }
        );
    }

    #[test]
    fn test_processed_never_underflows() {
        let result = BatchResult {
            failures: vec![DocumentFailure {
                name: "a.xml".to_string(),
                error: DocumentError::UnknownKind,
            }],
            ..BatchResult::default()
        };
        assert_eq!(result.processed(), 0);
        assert!(!result.is_complete());
    }

    #[test]
    fn test_byte_order_mark_and_invalid_utf8() {
        let mut bytes = UTF8_BOM.to_vec();
        bytes.extend_from_slice(fixtures::CTE_BASIC.as_bytes());
        assert_eq!(Engine::default().process_document(&bytes).unwrap().len(), 1);

        let error = Engine::default().extract(&[0x3C, 0xFF, 0xFE]).unwrap_err();
        assert!(matches!(error, DocumentError::Malformed(_)));
    }

    #[test]
    fn test_chunked_batches_match_whole_batch() {
        let sources = batch(&[fixtures::NFE_TWO_ITEMS, fixtures::MALFORMED, fixtures::CTE_BASIC]);
        let engine = Engine::default();

        let mut chunked = BatchResult::default();
        for chunk in sources.chunks(2) {
            chunked.extend(engine.process_batch(chunk));
        }
        assert_eq!(chunked, engine.process_batch(&sources));
    }

    #[test]
    fn test_failure_serializes_reason() {
        let failure = DocumentFailure {
            name: "a.xml".to_string(),
            error: DocumentError::UnknownKind,
        };
        let json = serde_json::to_value(&failure).unwrap();
        assert_eq!(json["name"], "a.xml");
        assert_eq!(json["reason"], "document is neither NFe nor CTe");
    }
}

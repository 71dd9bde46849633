//! Locating the information block of a fiscal document.

use roxmltree::{Document, Node};
use tracing::trace;

use super::fields::FieldReader;
use super::strategy::StrategyChain;
use crate::models::config::ExtractionConfig;
use crate::models::document::DocumentKind;

/// Finds `infNFe` / `infCte` regardless of namespace style.
#[derive(Debug, Clone)]
pub struct SchemaNavigator {
    nfe: FieldReader,
    cte: FieldReader,
}

impl SchemaNavigator {
    pub fn new(nfe_namespace: &str, cte_namespace: &str) -> Self {
        Self {
            nfe: FieldReader::new(StrategyChain::for_namespace(nfe_namespace)),
            cte: FieldReader::new(StrategyChain::for_namespace(cte_namespace)),
        }
    }

    pub fn from_config(config: &ExtractionConfig) -> Self {
        Self::new(&config.nfe_namespace, &config.cte_namespace)
    }

    /// Field reader bound to the namespace of a schema family.
    pub fn reader(&self, kind: DocumentKind) -> &FieldReader {
        match kind {
            DocumentKind::Nfe => &self.nfe,
            DocumentKind::Cte => &self.cte,
        }
    }

    /// The information block of `kind`, or `None` when no addressing style finds it.
    ///
    /// The block is only accepted directly under its envelope (`NFe/infNFe`,
    /// `CTe/infCte`); a CTe lists the NF-e it carries as `infDoc/infNFe`,
    /// which must never be taken for an invoice.
    pub fn locate<'a, 'input>(
        &self,
        doc: &'a Document<'input>,
        kind: DocumentKind,
    ) -> Option<Node<'a, 'input>> {
        let path = format!(".//{}/{}", kind.envelope_tag(), kind.info_tag());
        let found = self.reader(kind).node(doc.root_element(), &path);
        trace!("locate {}: {}", kind, if found.is_some() { "found" } else { "missing" });
        found
    }

    /// Try NFe first, then CTe.
    pub fn detect<'a, 'input>(
        &self,
        doc: &'a Document<'input>,
    ) -> Option<(DocumentKind, Node<'a, 'input>)> {
        [DocumentKind::Nfe, DocumentKind::Cte]
            .into_iter()
            .find_map(|kind| self.locate(doc, kind).map(|node| (kind, node)))
    }
}

impl Default for SchemaNavigator {
    fn default() -> Self {
        Self::from_config(&ExtractionConfig::default())
    }
}

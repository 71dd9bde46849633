//! Readers for the supported fiscal document families.

mod cte;
mod nfe;

pub use cte::CteReader;
pub use nfe::NfeReader;

use roxmltree::Node;
use serde::Serialize;

use crate::models::document::{Document, DocumentKind, LineItem};
use crate::xml::FieldReader;

/// Header and line items read from one information block.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExtractedDocument {
    pub document: Document,
    pub items: Vec<LineItem>,
}

/// Trait for readers of one schema family.
pub trait DocumentReader {
    /// Family this reader understands.
    fn kind(&self) -> DocumentKind;

    /// Read header and items from a located information block.
    ///
    /// Missing fields take their defaults; reading never fails once the
    /// block itself has been found.
    fn read(&self, info: Node<'_, '_>) -> ExtractedDocument;
}

/// Authorization status (`"<cStat> - <xMotivo>"`) from the protocol
/// element, which sits outside the information block.
fn protocol_status(fields: &FieldReader, info: Node<'_, '_>, kind: DocumentKind) -> String {
    let root = info.document().root_element();
    let Some(protocol) = fields.node(root, &format!(".//{}", kind.protocol_tag())) else {
        return String::new();
    };

    let code = fields.get(protocol, "infProt/cStat", "");
    let reason = fields.get(protocol, "infProt/xMotivo", "");
    if code.is_empty() || reason.is_empty() {
        String::new()
    } else {
        format!("{code} - {reason}")
    }
}

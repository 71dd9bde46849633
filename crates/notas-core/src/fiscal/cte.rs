//! CTe (transport service) reader.

use roxmltree::Node;
use tracing::debug;

use super::{protocol_status, DocumentReader, ExtractedDocument};
use crate::models::document::{Document, DocumentKind, LineItem, Party, TaxSnapshot};
use crate::patterns::access_key_from_id;
use crate::tax::{IcmsPolicy, TaxResolver};
use crate::xml::FieldReader;

/// Reads an `infCte` block as a single synthetic line item.
///
/// The item carries the document CFOP, the total service value and the
/// resolved ICMS; product columns stay empty.
#[derive(Debug, Clone)]
pub struct CteReader {
    fields: FieldReader,
    policy: IcmsPolicy,
}

impl CteReader {
    pub fn new(fields: FieldReader, policy: IcmsPolicy) -> Self {
        Self { fields, policy }
    }
}

impl DocumentReader for CteReader {
    fn kind(&self) -> DocumentKind {
        DocumentKind::Cte
    }

    fn read(&self, info: Node<'_, '_>) -> ExtractedDocument {
        let f = &self.fields;
        let mut document = Document::new(DocumentKind::Cte);

        document.access_key = access_key_from_id(info.attribute("Id").unwrap_or_default());
        if document.access_key.is_empty() {
            debug!("CTe identifier attribute is missing or malformed");
        }
        document.number = f.get(info, "ide/nCT", "");
        document.series = f.get(info, "ide/serie", "");
        document.issue_date = f.date(info, &["ide/dhEmi", "ide/dEmi"]);
        document.issuer = Party {
            tax_id: f.get_first(info, &["emit/CNPJ", "emit/CPF"], ""),
            name: f.get(info, "emit/xNome", ""),
            state: f.get(info, "emit/enderEmit/UF", ""),
        };
        document.recipient = Party {
            tax_id: f.get_first(info, &["dest/CNPJ", "dest/CPF"], ""),
            name: f.get(info, "dest/xNome", ""),
            state: f.get(info, "dest/enderDest/UF", ""),
        };
        document.sender = Party {
            tax_id: f.get_first(info, &["rem/CNPJ", "rem/CPF"], ""),
            name: f.get(info, "rem/xNome", ""),
            state: f.get(info, "rem/enderReme/UF", ""),
        };
        document.service_type = f.get(info, "ide/tpServ", "");
        document.note = f.get(info, "compl/xObs", "");
        document.status = protocol_status(f, info, DocumentKind::Cte);

        let resolver = TaxResolver::new(f, self.policy);
        let service = LineItem {
            ordinal: 1,
            cfop: f.get(info, "ide/CFOP", ""),
            total: f.decimal(info, "vPrest/vTPrest"),
            taxes: TaxSnapshot {
                icms: resolver.icms(f.node(info, "imp/ICMS")),
                ..TaxSnapshot::default()
            },
            ..LineItem::default()
        };

        ExtractedDocument {
            document,
            items: vec![service],
        }
    }
}

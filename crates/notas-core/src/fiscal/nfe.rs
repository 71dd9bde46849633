//! NFe (goods invoice) reader.

use roxmltree::Node;
use tracing::debug;

use super::{protocol_status, DocumentReader, ExtractedDocument};
use crate::models::document::{Document, DocumentKind, LineItem, Party, TaxSnapshot};
use crate::patterns::{access_key_from_id, CFOP_CODE};
use crate::tax::{Contribution, DocumentCharges, IcmsPolicy, TaxResolver};
use crate::xml::FieldReader;

/// Reads the header and every `det` line of an `infNFe` block.
#[derive(Debug, Clone)]
pub struct NfeReader {
    fields: FieldReader,
    policy: IcmsPolicy,
}

impl NfeReader {
    pub fn new(fields: FieldReader, policy: IcmsPolicy) -> Self {
        Self { fields, policy }
    }

    fn header(&self, info: Node<'_, '_>) -> Document {
        let f = &self.fields;
        let mut document = Document::new(DocumentKind::Nfe);

        document.access_key = access_key_from_id(info.attribute("Id").unwrap_or_default());
        if document.access_key.is_empty() {
            debug!("NFe identifier attribute is missing or malformed");
        }
        document.number = f.get(info, "ide/nNF", "");
        document.series = f.get(info, "ide/serie", "");
        document.issue_date = f.date(info, &["ide/dhEmi", "ide/dEmi"]);
        document.issuer = Party {
            tax_id: f.get_first(info, &["emit/CNPJ", "emit/CPF"], ""),
            name: f.get(info, "emit/xNome", ""),
            state: f.get(info, "emit/enderEmit/UF", ""),
        };
        document.recipient = Party {
            tax_id: f.get_first(info, &["dest/CNPJ", "dest/CPF", "dest/idEstrangeiro"], ""),
            name: f.get(info, "dest/xNome", ""),
            state: f.get(info, "dest/enderDest/UF", ""),
        };
        document.note = f.get(info, "infAdic/infCpl", "");
        document.ipi_total = f.decimal(info, "total/ICMSTot/vIPI");
        document.status = protocol_status(f, info, DocumentKind::Nfe);

        document
    }

    fn item(&self, det: Node<'_, '_>, position: usize, totals: &DocumentCharges) -> LineItem {
        let f = &self.fields;
        let resolver = TaxResolver::new(f, self.policy);

        let ordinal = det
            .attribute("nItem")
            .and_then(|n| n.trim().parse().ok())
            .unwrap_or(position as u32 + 1);

        let prod = f.node(det, "prod");
        let text = |tag: &str| prod.map(|p| f.get(p, tag, "")).unwrap_or_default();
        let number = |tag: &str| prod.map(|p| f.decimal(p, tag)).unwrap_or_default();

        let cfop = text("CFOP");
        if !cfop.is_empty() && !CFOP_CODE.is_match(&cfop) {
            debug!("item {} has an unusual CFOP {:?}", ordinal, cfop);
        }

        let imposto = f.node(det, "imposto");
        let tax_block = |tag: &str| imposto.and_then(|i| f.node(i, tag));
        let (freight, insurance, discount) = resolver.charges(prod, totals);

        LineItem {
            ordinal,
            code: text("cProd"),
            description: text("xProd"),
            ncm: text("NCM"),
            unit: text("uCom"),
            quantity: number("qCom"),
            unit_value: number("vUnCom"),
            total: number("vProd"),
            cfop,
            benefit_code: text("cBenef"),
            note: f.get(det, "infAdProd", ""),
            taxes: TaxSnapshot {
                icms: resolver.icms(tax_block("ICMS")),
                pis: resolver.contribution(tax_block("PIS"), Contribution::Pis),
                cofins: resolver.contribution(tax_block("COFINS"), Contribution::Cofins),
                freight,
                insurance,
                discount,
            },
        }
    }
}

impl DocumentReader for NfeReader {
    fn kind(&self) -> DocumentKind {
        DocumentKind::Nfe
    }

    fn read(&self, info: Node<'_, '_>) -> ExtractedDocument {
        let document = self.header(info);

        let resolver = TaxResolver::new(&self.fields, self.policy);
        let totals = resolver.document_charges(self.fields.node(info, "total/ICMSTot"));

        let items = self
            .fields
            .nodes(info, "det")
            .into_iter()
            .enumerate()
            .map(|(position, det)| self.item(det, position, &totals))
            .collect();

        ExtractedDocument { document, items }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures;
    use crate::models::document::{Charge, IcmsValues};
    use crate::xml::SchemaNavigator;
    use pretty_assertions::assert_eq;
    use rust_decimal::Decimal;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn read(xml: &str) -> ExtractedDocument {
        let doc = roxmltree::Document::parse(xml).unwrap();
        let navigator = SchemaNavigator::default();
        let info = navigator.locate(&doc, DocumentKind::Nfe).unwrap();
        NfeReader::new(navigator.reader(DocumentKind::Nfe).clone(), IcmsPolicy::default()).read(info)
    }

    #[test]
    fn test_header_fields() {
        let extracted = read(fixtures::NFE_TWO_ITEMS);
        let document = &extracted.document;

        assert_eq!(document.access_key, "35200812345678000190550010000000011234567890");
        assert_eq!(document.number, "1");
        assert_eq!(document.series, "1");
        assert_eq!(document.issue_date, "2020-08-10");
        assert_eq!(document.issuer.tax_id, "12345678000190");
        assert_eq!(document.issuer.name, "Comercial Exemplo Ltda");
        assert_eq!(document.issuer.state, "SP");
        assert_eq!(document.recipient.tax_id, "98765432000110");
        assert_eq!(document.note, "Pedido 123");
        assert_eq!(document.ipi_total, dec("12.35"));
        assert!(document.sender.is_empty());
        assert_eq!(document.status, "100 - Autorizado o uso da NF-e");
    }

    #[test]
    fn test_items_in_document_order() {
        let extracted = read(fixtures::NFE_TWO_ITEMS);
        let items = &extracted.items;

        assert_eq!(items.len(), 3);
        assert_eq!(items.iter().map(|i| i.ordinal).collect::<Vec<_>>(), [1, 2, 3]);
        assert_eq!(items.iter().map(|i| i.cfop.as_str()).collect::<Vec<_>>(), ["5102", "5102", "6102"]);

        let first = &items[0];
        assert_eq!(first.code, "001");
        assert_eq!(first.description, "Parafuso sextavado");
        assert_eq!(first.ncm, "73181500");
        assert_eq!(first.unit, "UN");
        assert_eq!(first.quantity, dec("10"));
        assert_eq!(first.total, dec("100.00"));
        assert_eq!(first.benefit_code, "SP000202");
        assert_eq!(first.note, "Lote 42");
    }

    #[test]
    fn test_item_taxes() {
        let extracted = read(fixtures::NFE_TWO_ITEMS);
        let items = &extracted.items;

        assert_eq!(items[0].taxes.icms.value, dec("18.00"));
        assert_eq!(items[0].taxes.pis, dec("1.65"));
        assert_eq!(items[0].taxes.cofins, dec("7.60"));

        assert_eq!(items[1].taxes.icms.exempted, dec("1.80"));
        assert_eq!(items[1].taxes.pis, dec("0.83"));

        assert_eq!(items[2].taxes.icms.st_value, dec("26.40"));
        assert_eq!(items[2].taxes.pis, Decimal::ZERO);

        // No item carries freight, so every item falls back to the total.
        for item in items {
            assert_eq!(item.taxes.freight, Charge::document(dec("30.00")));
            assert_eq!(item.taxes.insurance, Charge::item(Decimal::ZERO));
        }
    }

    #[test]
    fn test_legacy_layout_without_recipient() {
        let extracted = read(fixtures::NFE_NO_NAMESPACE);
        let document = &extracted.document;

        assert_eq!(document.issue_date, "2009-11-02");
        assert_eq!(document.recipient, Party::default());
        assert_eq!(document.ipi_total, Decimal::ZERO);
        assert_eq!(document.status, "");

        let item = &extracted.items[0];
        assert_eq!(item.cfop, "");
        assert_eq!(item.unit_value, Decimal::ZERO);
        assert_eq!(item.taxes.icms, IcmsValues::default());
        assert_eq!(item.taxes.pis, dec("1.32"));
    }

    #[test]
    fn test_mixed_addressing_styles() {
        let extracted = read(fixtures::NFE_MIXED_STYLES);

        assert_eq!(extracted.document.number, "3");
        assert_eq!(extracted.document.issuer.tax_id, "12345678000190");
        assert_eq!(extracted.items[0].cfop, "5405");
        assert_eq!(extracted.items[0].total, dec("12.50"));
    }
}

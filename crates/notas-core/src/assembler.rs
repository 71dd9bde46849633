//! Projection of documents, items and CFOP groups onto output records.
//!
//! This is the only place where decimals are turned into display text.

use crate::aggregate::{CfopGroups, TaxGroup};
use crate::fiscal::ExtractedDocument;
use crate::models::document::{Document, IcmsValues, LineItem};
use crate::models::record::{Column, OutputMode, OutputRecord};
use crate::numeric::format_decimal;

/// Builds fixed-column records for one output mode.
#[derive(Debug, Clone, Copy, Default)]
pub struct RecordAssembler {
    mode: OutputMode,
}

impl RecordAssembler {
    pub fn new(mode: OutputMode) -> Self {
        Self { mode }
    }

    pub fn mode(&self) -> OutputMode {
        self.mode
    }

    /// Records of one extracted document: one per item, or one per CFOP.
    pub fn assemble(&self, extracted: &ExtractedDocument) -> Vec<OutputRecord> {
        let document = &extracted.document;
        match self.mode {
            OutputMode::Item => extracted
                .items
                .iter()
                .map(|item| self.item_record(document, item))
                .collect(),
            OutputMode::Group => CfopGroups::from_items(document, &extracted.items)
                .iter()
                .map(|group| self.group_record(group))
                .collect(),
        }
    }

    /// Record of a single line item.
    pub fn item_record(&self, document: &Document, item: &LineItem) -> OutputRecord {
        let taxes = &item.taxes;
        let mut fields = header_fields(document);
        fields.extend([
            (Column::Cfop, item.cfop.clone()),
            (Column::ProductCode, item.code.clone()),
            (Column::Description, item.description.clone()),
            (Column::Ncm, item.ncm.clone()),
            (Column::ItemNote, item.note.clone()),
            (Column::Quantity, format_decimal(item.quantity)),
            (Column::Unit, item.unit.clone()),
            (Column::UnitValue, format_decimal(item.unit_value)),
            (Column::LineTotal, format_decimal(item.total)),
            (Column::PisValue, format_decimal(taxes.pis)),
            (Column::CofinsValue, format_decimal(taxes.cofins)),
            (Column::Freight, format_decimal(taxes.freight.amount)),
            (Column::Insurance, format_decimal(taxes.insurance.amount)),
            (Column::Discount, format_decimal(taxes.discount.amount)),
            (Column::BenefitCode, item.benefit_code.clone()),
        ]);
        fields.extend(icms_fields(&taxes.icms));

        OutputRecord::project(document.kind, self.mode, fields)
    }

    /// Record of one CFOP group, holding its sums.
    pub fn group_record(&self, group: &TaxGroup) -> OutputRecord {
        let mut fields = header_fields(&group.document);
        fields.extend([
            (Column::Cfop, group.cfop.clone()),
            (Column::LineTotal, format_decimal(group.total)),
            (Column::PisValue, format_decimal(group.pis)),
            (Column::CofinsValue, format_decimal(group.cofins)),
            (Column::Freight, format_decimal(group.freight.total())),
            (Column::Insurance, format_decimal(group.insurance.total())),
            (Column::Discount, format_decimal(group.discount.total())),
        ]);
        fields.extend(icms_fields(&group.icms));

        OutputRecord::project(group.document.kind, self.mode, fields)
    }
}

fn header_fields(document: &Document) -> Vec<(Column, String)> {
    vec![
        (Column::AccessKey, document.access_key.clone()),
        (Column::Number, document.number.clone()),
        (Column::Series, document.series.clone()),
        (Column::IssueDate, document.issue_date.clone()),
        (Column::IssuerName, document.issuer.name.clone()),
        (Column::IssuerTaxId, document.issuer.tax_id.clone()),
        (Column::RecipientTaxId, document.recipient.tax_id.clone()),
        (Column::DocumentNote, document.note.clone()),
    ]
}

fn icms_fields(icms: &IcmsValues) -> [(Column, String); 6] {
    [
        (Column::IcmsBase, format_decimal(icms.base)),
        (Column::IcmsRate, format_decimal(icms.rate)),
        (Column::IcmsValue, format_decimal(icms.value)),
        (Column::IcmsStBase, format_decimal(icms.st_base)),
        (Column::IcmsStValue, format_decimal(icms.st_value)),
        (Column::IcmsExempted, format_decimal(icms.exempted)),
    ]
}

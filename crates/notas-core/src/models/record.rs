//! Fixed-column output records.

use serde::ser::{Serialize, SerializeMap, Serializer};
use serde::Deserialize;

use super::document::DocumentKind;

/// Output granularity.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, serde::Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OutputMode {
    /// One record per line item.
    #[default]
    Item,
    /// One record per CFOP within each document.
    Group,
}

/// Columns of the output table, in output order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Column {
    AccessKey,
    Number,
    Series,
    IssueDate,
    IssuerName,
    IssuerTaxId,
    RecipientTaxId,
    Cfop,
    ProductCode,
    Description,
    Ncm,
    ItemNote,
    Quantity,
    Unit,
    UnitValue,
    LineTotal,
    IcmsBase,
    IcmsRate,
    IcmsValue,
    IcmsStBase,
    IcmsStValue,
    PisValue,
    CofinsValue,
    Freight,
    Insurance,
    Discount,
    BenefitCode,
    IcmsExempted,
    DocumentNote,
}

impl Column {
    /// Every column in output order.
    pub const ALL: [Column; 29] = [
        Column::AccessKey,
        Column::Number,
        Column::Series,
        Column::IssueDate,
        Column::IssuerName,
        Column::IssuerTaxId,
        Column::RecipientTaxId,
        Column::Cfop,
        Column::ProductCode,
        Column::Description,
        Column::Ncm,
        Column::ItemNote,
        Column::Quantity,
        Column::Unit,
        Column::UnitValue,
        Column::LineTotal,
        Column::IcmsBase,
        Column::IcmsRate,
        Column::IcmsValue,
        Column::IcmsStBase,
        Column::IcmsStValue,
        Column::PisValue,
        Column::CofinsValue,
        Column::Freight,
        Column::Insurance,
        Column::Discount,
        Column::BenefitCode,
        Column::IcmsExempted,
        Column::DocumentNote,
    ];

    /// Header label used in spreadsheets.
    pub fn label(&self) -> &'static str {
        match self {
            Column::AccessKey => "Chave de acesso",
            Column::Number => "Numero",
            Column::Series => "Serie",
            Column::IssueDate => "Data Emissão",
            Column::IssuerName => "Emitente",
            Column::IssuerTaxId => "CNPJ Emitente",
            Column::RecipientTaxId => "CNPJ Destinatário",
            Column::Cfop => "CFOP",
            Column::ProductCode => "Código Produto",
            Column::Description => "Descrição",
            Column::Ncm => "NCM",
            Column::ItemNote => "Inf. Adicional Item",
            Column::Quantity => "Quantidade",
            Column::Unit => "Unidade",
            Column::UnitValue => "Vlr Unitário",
            Column::LineTotal => "Vlr total",
            Column::IcmsBase => "BC ICMS",
            Column::IcmsRate => "Aliquota ICMS",
            Column::IcmsValue => "Vlr ICMS",
            Column::IcmsStBase => "BC ICMS ST",
            Column::IcmsStValue => "Vlr ICMS ST",
            Column::PisValue => "Vlr PIS",
            Column::CofinsValue => "Vlr COFINS",
            Column::Freight => "Vlr Frete",
            Column::Insurance => "Vlr Seguro",
            Column::Discount => "Vlr Desconto",
            Column::BenefitCode => "Cód. Benefício",
            Column::IcmsExempted => "Vlr ICMS Desonerado",
            Column::DocumentNote => "Inf. Complementar",
        }
    }

    /// Position of this column in [`Column::ALL`].
    pub fn index(&self) -> usize {
        *self as usize
    }

    /// Columns describing a single product line.
    pub fn is_product_specific(&self) -> bool {
        matches!(
            self,
            Column::ProductCode
                | Column::Description
                | Column::Ncm
                | Column::ItemNote
                | Column::Quantity
                | Column::Unit
                | Column::UnitValue
                | Column::BenefitCode
        )
    }

    /// Whether the column carries data for a (document kind, mode) pair.
    ///
    /// Unsupported columns are still emitted, as empty strings.
    pub fn is_supported(&self, kind: DocumentKind, mode: OutputMode) -> bool {
        if !self.is_product_specific() {
            return true;
        }
        kind == DocumentKind::Nfe && mode == OutputMode::Item
    }

    /// Header row labels.
    pub fn labels() -> Vec<&'static str> {
        Self::ALL.iter().map(Column::label).collect()
    }
}

/// One row of the output table, always holding every column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputRecord {
    values: Vec<String>,
}

impl OutputRecord {
    /// Project display-ready fields onto the full column schema.
    ///
    /// Columns missing from `fields` or unsupported for `(kind, mode)` are
    /// padded with empty strings.
    pub fn project(
        kind: DocumentKind,
        mode: OutputMode,
        fields: impl IntoIterator<Item = (Column, String)>,
    ) -> Self {
        let mut values = vec![String::new(); Column::ALL.len()];
        for (column, value) in fields {
            if column.is_supported(kind, mode) {
                values[column.index()] = value;
            }
        }
        Self { values }
    }

    /// Value of a column.
    pub fn get(&self, column: Column) -> &str {
        &self.values[column.index()]
    }

    /// Values in column order.
    pub fn values(&self) -> &[String] {
        &self.values
    }

    pub fn into_values(self) -> Vec<String> {
        self.values
    }
}

impl Serialize for OutputRecord {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.values.len()))?;
        for (column, value) in Column::ALL.iter().zip(&self.values) {
            map.serialize_entry(column.label(), value)?;
        }
        map.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_column_index_matches_position() {
        for (position, column) in Column::ALL.iter().enumerate() {
            assert_eq!(column.index(), position);
        }
    }

    #[test]
    fn test_project_pads_unsupported_columns() {
        let record = OutputRecord::project(
            DocumentKind::Nfe,
            OutputMode::Group,
            [
                (Column::Cfop, "5102".to_string()),
                (Column::Description, "Parafuso".to_string()),
            ],
        );

        assert_eq!(record.values().len(), Column::ALL.len());
        assert_eq!(record.get(Column::Cfop), "5102");
        assert_eq!(record.get(Column::Description), "");
        assert_eq!(record.get(Column::AccessKey), "");
    }

    #[test]
    fn test_cte_never_fills_product_columns() {
        assert!(!Column::Quantity.is_supported(DocumentKind::Cte, OutputMode::Item));
        assert!(Column::LineTotal.is_supported(DocumentKind::Cte, OutputMode::Item));
        assert!(Column::ProductCode.is_supported(DocumentKind::Nfe, OutputMode::Item));
    }

    #[test]
    fn test_serializes_as_labelled_map() {
        let record = OutputRecord::project(
            DocumentKind::Nfe,
            OutputMode::Item,
            [(Column::LineTotal, "150,00".to_string())],
        );
        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["Vlr total"], "150,00");
        assert_eq!(json["CFOP"], "");
    }
}

//! Fiscal document data models shared by the NFe and CTe readers.

use std::fmt;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// The two supported schema families.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DocumentKind {
    /// Electronic goods invoice.
    #[serde(rename = "NFe")]
    Nfe,
    /// Electronic transport-service document.
    #[serde(rename = "CTe")]
    Cte,
}

impl DocumentKind {
    /// Local name of the signed envelope that holds the information block.
    pub fn envelope_tag(&self) -> &'static str {
        match self {
            DocumentKind::Nfe => "NFe",
            DocumentKind::Cte => "CTe",
        }
    }

    /// Local name of the information block for this family.
    pub fn info_tag(&self) -> &'static str {
        match self {
            DocumentKind::Nfe => "infNFe",
            DocumentKind::Cte => "infCte",
        }
    }

    /// Local name of the authorization protocol element.
    pub fn protocol_tag(&self) -> &'static str {
        match self {
            DocumentKind::Nfe => "protNFe",
            DocumentKind::Cte => "protCTe",
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            DocumentKind::Nfe => "NFe",
            DocumentKind::Cte => "CTe",
        }
    }
}

impl fmt::Display for DocumentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Issuer or recipient of a document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Party {
    /// CNPJ, or CPF/foreign id when no CNPJ is declared.
    pub tax_id: String,

    /// Legal name.
    pub name: String,

    /// State (UF) from the party address.
    pub state: String,
}

impl Party {
    /// Whether the document carried no block for this party.
    pub fn is_empty(&self) -> bool {
        self.tax_id.is_empty() && self.name.is_empty() && self.state.is_empty()
    }
}

/// Header fields of one fiscal document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Document {
    /// Schema family.
    pub kind: DocumentKind,

    /// 44-digit access key (identifier attribute without its prefix).
    pub access_key: String,

    /// Document number (nNF / nCT).
    pub number: String,

    /// Series.
    pub series: String,

    /// Issue date, always the first 10 characters of the source value.
    pub issue_date: String,

    /// Issuing party.
    pub issuer: Party,

    /// Receiving party; empty fields when the document has no recipient block.
    pub recipient: Party,

    /// Free-text complementary note.
    pub note: String,

    /// IPI total of an NFe (`ICMSTot/vIPI`).
    #[serde(default)]
    pub ipi_total: Decimal,

    /// CTe service type code (`tpServ`: 0 normal, 1 subcontracting, ...).
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub service_type: String,

    /// Sender of the carried goods (CTe `rem`).
    #[serde(default, skip_serializing_if = "Party::is_empty")]
    pub sender: Party,

    /// Authorization status as `"<cStat> - <xMotivo>"`, empty when absent.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub status: String,
}

impl Document {
    /// Create an empty document of the given kind.
    pub fn new(kind: DocumentKind) -> Self {
        Self {
            kind,
            access_key: String::new(),
            number: String::new(),
            series: String::new(),
            issue_date: String::new(),
            issuer: Party::default(),
            recipient: Party::default(),
            note: String::new(),
            ipi_total: Decimal::ZERO,
            service_type: String::new(),
            sender: Party::default(),
            status: String::new(),
        }
    }

    /// Issue date as a calendar date, if the truncated text is ISO formatted.
    pub fn issued_on(&self) -> Option<NaiveDate> {
        NaiveDate::parse_from_str(&self.issue_date, "%Y-%m-%d").ok()
    }
}

/// Resolved ICMS figures for one line item (or a group of them).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IcmsValues {
    pub base: Decimal,
    pub rate: Decimal,
    pub value: Decimal,
    pub st_base: Decimal,
    pub st_rate: Decimal,
    pub st_value: Decimal,
    /// Exempted (desonerado) amount.
    pub exempted: Decimal,
}

/// Where a freight/insurance/discount figure was read from.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChargeOrigin {
    /// The line item carried its own non-zero figure.
    #[default]
    Item,
    /// The item figure was zero; the document-level total was used.
    Document,
}

/// An item-level charge with its origin.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Charge {
    pub amount: Decimal,
    pub origin: ChargeOrigin,
}

impl Charge {
    pub fn item(amount: Decimal) -> Self {
        Self {
            amount,
            origin: ChargeOrigin::Item,
        }
    }

    pub fn document(amount: Decimal) -> Self {
        Self {
            amount,
            origin: ChargeOrigin::Document,
        }
    }
}

/// Per-item resolved tax values.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxSnapshot {
    pub icms: IcmsValues,
    pub pis: Decimal,
    pub cofins: Decimal,
    pub freight: Charge,
    pub insurance: Charge,
    pub discount: Charge,
}

/// A single line item of a document.
///
/// A CTe has no product lines; its reader emits one synthetic item carrying
/// the document CFOP and the total service value.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineItem {
    /// Item number (nItem attribute); 1 for the synthetic CTe item.
    pub ordinal: u32,

    /// Product code (cProd).
    pub code: String,

    /// Product description.
    pub description: String,

    /// NCM classification code.
    pub ncm: String,

    /// Commercial unit.
    pub unit: String,

    pub quantity: Decimal,

    pub unit_value: Decimal,

    /// Line total (vProd, or vTPrest for a CTe).
    pub total: Decimal,

    /// Operation-nature code; empty when absent.
    pub cfop: String,

    /// Tax-benefit code (cBenef).
    pub benefit_code: String,

    /// Additional item information (infAdProd).
    pub note: String,

    pub taxes: TaxSnapshot,
}

//! Per-document aggregation of line items by CFOP.

use indexmap::map::Entry;
use indexmap::IndexMap;
use rust_decimal::Decimal;
use serde::Serialize;

use crate::models::document::{Charge, ChargeOrigin, Document, IcmsValues, LineItem};

/// Running total of one charge across a group.
///
/// Item-level figures add up; a document-level fallback is counted once per
/// group no matter how many items fell back to it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ChargeTotal {
    pub item_sum: Decimal,
    pub document: Option<Decimal>,
}

impl ChargeTotal {
    pub fn add(&mut self, charge: Charge) {
        match charge.origin {
            ChargeOrigin::Item => self.item_sum += charge.amount,
            ChargeOrigin::Document => {
                self.document.get_or_insert(charge.amount);
            }
        }
    }

    pub fn total(&self) -> Decimal {
        self.item_sum + self.document.unwrap_or(Decimal::ZERO)
    }
}

/// Items of one document sharing a CFOP, with their monetary sums.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TaxGroup {
    /// Header of the owning document.
    pub document: Document,

    /// Grouping key; empty when the items carry no CFOP.
    pub cfop: String,

    /// Sum of line totals.
    pub total: Decimal,

    /// Sums of the monetary ICMS figures. Rates are not summed: each holds
    /// the rate of the first contributing item with a non-zero rate.
    pub icms: IcmsValues,

    pub pis: Decimal,
    pub cofins: Decimal,
    pub freight: ChargeTotal,
    pub insurance: ChargeTotal,
    pub discount: ChargeTotal,

    /// Number of items merged into the group.
    pub items: usize,
}

impl TaxGroup {
    /// Empty group for `cfop`, carrying a copy of the document header.
    pub fn new(document: &Document, cfop: impl Into<String>) -> Self {
        Self {
            document: document.clone(),
            cfop: cfop.into(),
            total: Decimal::ZERO,
            icms: IcmsValues::default(),
            pis: Decimal::ZERO,
            cofins: Decimal::ZERO,
            freight: ChargeTotal::default(),
            insurance: ChargeTotal::default(),
            discount: ChargeTotal::default(),
            items: 0,
        }
    }

    /// Group seeded from its first item.
    pub fn seed(document: &Document, item: &LineItem) -> Self {
        Self::new(document, item.cfop.as_str()).merge(item)
    }

    /// Fold one item into the group.
    pub fn merge(mut self, item: &LineItem) -> Self {
        self.absorb(item);
        self
    }

    fn absorb(&mut self, item: &LineItem) {
        let taxes = &item.taxes;

        if self.icms.rate.is_zero() {
            self.icms.rate = taxes.icms.rate;
        }
        if self.icms.st_rate.is_zero() {
            self.icms.st_rate = taxes.icms.st_rate;
        }

        self.total += item.total;
        self.icms.base += taxes.icms.base;
        self.icms.value += taxes.icms.value;
        self.icms.st_base += taxes.icms.st_base;
        self.icms.st_value += taxes.icms.st_value;
        self.icms.exempted += taxes.icms.exempted;
        self.pis += taxes.pis;
        self.cofins += taxes.cofins;
        self.freight.add(taxes.freight);
        self.insurance.add(taxes.insurance);
        self.discount.add(taxes.discount);
        self.items += 1;
    }
}

/// CFOP groups of one document, iterated in first-encounter order.
#[derive(Debug, Clone, Default)]
pub struct CfopGroups {
    groups: IndexMap<String, TaxGroup>,
}

impl CfopGroups {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an item to the group of its CFOP, creating the group on first sight.
    pub fn accumulate(&mut self, document: &Document, item: &LineItem) {
        match self.groups.entry(item.cfop.clone()) {
            Entry::Occupied(mut entry) => entry.get_mut().absorb(item),
            Entry::Vacant(entry) => {
                entry.insert(TaxGroup::seed(document, item));
            }
        }
    }

    /// Group every item of a document.
    pub fn from_items<'i>(document: &Document, items: impl IntoIterator<Item = &'i LineItem>) -> Self {
        let mut groups = Self::new();
        for item in items {
            groups.accumulate(document, item);
        }
        groups
    }

    pub fn get(&self, cfop: &str) -> Option<&TaxGroup> {
        self.groups.get(cfop)
    }

    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &TaxGroup> {
        self.groups.values()
    }
}

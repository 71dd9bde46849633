//! Resolution of per-item tax figures.

use roxmltree::Node;
use rust_decimal::Decimal;
use tracing::debug;

use super::regime::{Contribution, ContributionVariant, IcmsFieldTable, IcmsRegime};
use super::IcmsPolicy;
use crate::models::document::{Charge, IcmsValues};
use crate::xml::FieldReader;

/// Document-level totals used when an item carries no charge of its own.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DocumentCharges {
    pub freight: Decimal,
    pub insurance: Decimal,
    pub discount: Decimal,
}

/// Reads ICMS, PIS/COFINS and item charges through a [`FieldReader`].
#[derive(Debug, Clone, Copy)]
pub struct TaxResolver<'r> {
    reader: &'r FieldReader,
    policy: IcmsPolicy,
}

impl<'r> TaxResolver<'r> {
    pub fn new(reader: &'r FieldReader, policy: IcmsPolicy) -> Self {
        Self { reader, policy }
    }

    /// Resolve the ICMS container (`ICMS` element) of one item.
    ///
    /// Every element child is classified by its tag and probed through its
    /// regime's field table. A missing container yields all zeros.
    pub fn icms(&self, container: Option<Node<'_, '_>>) -> IcmsValues {
        let mut values = IcmsValues::default();
        let Some(container) = container else {
            return values;
        };

        for child in container.children().filter(Node::is_element) {
            let regime = IcmsRegime::from_tag(child.tag_name().name());
            if !regime.is_known() {
                debug!("unknown ICMS sub-structure {}, probing common fields", regime);
            }
            let probed = self.probe(child, regime.fields());
            self.combine(&mut values, &probed);
        }

        values
    }

    fn probe(&self, node: Node<'_, '_>, table: &IcmsFieldTable) -> ProbedIcms {
        let read = |tags: &[&str]| {
            if tags.is_empty() {
                None
            } else {
                self.reader.probe_decimal(node, tags)
            }
        };

        ProbedIcms {
            base: read(table.base),
            rate: read(table.rate),
            value: read(table.value),
            st_base: read(table.st_base),
            st_rate: read(table.st_rate),
            st_value: read(table.st_value),
            exempted: read(table.exempted),
        }
    }

    fn combine(&self, values: &mut IcmsValues, probed: &ProbedIcms) {
        let pairs = [
            (&mut values.base, probed.base),
            (&mut values.rate, probed.rate),
            (&mut values.value, probed.value),
            (&mut values.st_base, probed.st_base),
            (&mut values.st_rate, probed.st_rate),
            (&mut values.st_value, probed.st_value),
            (&mut values.exempted, probed.exempted),
        ];

        for (running, found) in pairs {
            self.policy.apply(running, found);
        }
    }

    /// Value of a PIS or COFINS container: the value field of the first
    /// variant present (rate-based, other basis, not taxed).
    pub fn contribution(&self, container: Option<Node<'_, '_>>, contribution: Contribution) -> Decimal {
        let Some(container) = container else {
            return Decimal::ZERO;
        };

        ContributionVariant::ORDER
            .iter()
            .find_map(|variant| self.reader.node(container, &contribution.variant_tag(*variant)))
            .map(|node| self.reader.decimal(node, contribution.value_tag()))
            .unwrap_or(Decimal::ZERO)
    }

    /// Item charge at `tag` under `prod`, falling back to the document total
    /// when the item figure is zero.
    pub fn charge(&self, prod: Option<Node<'_, '_>>, tag: &str, document_total: Decimal) -> Charge {
        let amount = prod
            .map(|prod| self.reader.decimal(prod, tag))
            .unwrap_or(Decimal::ZERO);

        if amount.is_zero() && !document_total.is_zero() {
            Charge::document(document_total)
        } else {
            Charge::item(amount)
        }
    }

    /// Freight, insurance and discount of an item.
    pub fn charges(&self, prod: Option<Node<'_, '_>>, totals: &DocumentCharges) -> (Charge, Charge, Charge) {
        (
            self.charge(prod, "vFrete", totals.freight),
            self.charge(prod, "vSeg", totals.insurance),
            self.charge(prod, "vDesc", totals.discount),
        )
    }

    /// Document totals from an `ICMSTot` element.
    pub fn document_charges(&self, icms_tot: Option<Node<'_, '_>>) -> DocumentCharges {
        let Some(totals) = icms_tot else {
            return DocumentCharges::default();
        };

        DocumentCharges {
            freight: self.reader.decimal(totals, "vFrete"),
            insurance: self.reader.decimal(totals, "vSeg"),
            discount: self.reader.decimal(totals, "vDesc"),
        }
    }
}

struct ProbedIcms {
    base: Option<Decimal>,
    rate: Option<Decimal>,
    value: Option<Decimal>,
    st_base: Option<Decimal>,
    st_rate: Option<Decimal>,
    st_value: Option<Decimal>,
    exempted: Option<Decimal>,
}

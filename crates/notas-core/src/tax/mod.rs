//! ICMS, PIS/COFINS and item charge resolution.

mod regime;
mod resolver;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

pub use regime::{Contribution, ContributionVariant, IcmsFieldTable, IcmsRegime};
pub use resolver::{DocumentCharges, TaxResolver};

/// How ICMS figures from sibling sub-structures of one item combine.
///
/// A well-formed item has exactly one sub-structure, and then both policies
/// give the same result.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IcmsPolicy {
    /// A present, non-zero figure replaces the running value.
    #[default]
    OverwriteIfNonzero,
    /// Every sibling's figure is added to the running value.
    Sum,
}

impl IcmsPolicy {
    /// Fold one probed figure into the running value.
    pub fn apply(&self, running: &mut Decimal, found: Option<Decimal>) {
        match (self, found) {
            (IcmsPolicy::OverwriteIfNonzero, Some(value)) if !value.is_zero() => *running = value,
            (IcmsPolicy::Sum, Some(value)) => *running += value,
            _ => {}
        }
    }
}

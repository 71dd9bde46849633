//! Leaf value extraction with defaults and fallback-path chains.

use roxmltree::Node;
use rust_decimal::Decimal;

use super::strategy::StrategyChain;
use crate::numeric::{parse_decimal, try_parse_decimal};

/// Number of characters kept from date and date-time values.
pub const DATE_LEN: usize = 10;

/// Outcome of looking up a leaf element.
///
/// "Found but empty" and "not found" are different outcomes: only the
/// latter lets a fallback path be tried.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Lookup<'a> {
    /// No element at the path in any addressing style.
    Missing,
    /// Element present without (non-blank) text.
    Empty,
    /// Element text, trimmed.
    Text(&'a str),
}

impl<'a> Lookup<'a> {
    pub fn is_found(&self) -> bool {
        !matches!(self, Lookup::Missing)
    }

    pub fn text(&self) -> Option<&'a str> {
        match self {
            Lookup::Text(text) => Some(text),
            _ => None,
        }
    }

    /// The text, or `default` when the element is missing or empty.
    pub fn or(&self, default: &str) -> String {
        self.text().unwrap_or(default).to_string()
    }
}

/// Reads leaf values through a [`StrategyChain`].
///
/// Every call resolves its path independently, so a document may mix
/// addressing styles between fields.
#[derive(Debug, Clone)]
pub struct FieldReader {
    chain: StrategyChain,
}

impl FieldReader {
    pub fn new(chain: StrategyChain) -> Self {
        Self { chain }
    }

    /// Element at `path`.
    pub fn node<'a, 'input>(&self, context: Node<'a, 'input>, path: &str) -> Option<Node<'a, 'input>> {
        self.chain.find(context, path)
    }

    /// Every element at `path`, in document order.
    pub fn nodes<'a, 'input>(&self, context: Node<'a, 'input>, path: &str) -> Vec<Node<'a, 'input>> {
        self.chain.find_all(context, path)
    }

    pub fn lookup<'a>(&self, context: Node<'a, '_>, path: &str) -> Lookup<'a> {
        match self.node(context, path) {
            None => Lookup::Missing,
            Some(node) => match node.text().map(str::trim) {
                Some(text) if !text.is_empty() => Lookup::Text(text),
                _ => Lookup::Empty,
            },
        }
    }

    /// Text at `path`, or `default`.
    pub fn get(&self, context: Node<'_, '_>, path: &str, default: &str) -> String {
        self.lookup(context, path).or(default)
    }

    /// Text of the first path whose element exists, or `default`.
    ///
    /// An element that exists but is empty stops the chain.
    pub fn get_first(&self, context: Node<'_, '_>, paths: &[&str], default: &str) -> String {
        paths
            .iter()
            .map(|path| self.lookup(context, path))
            .find(Lookup::is_found)
            .map(|lookup| lookup.or(default))
            .unwrap_or_else(|| default.to_string())
    }

    /// Date or date-time at the first existing path, truncated to a date.
    pub fn date(&self, context: Node<'_, '_>, paths: &[&str]) -> String {
        truncate_date(&self.get_first(context, paths, ""))
    }

    /// Decimal at `path`; missing or non-numeric values are zero.
    pub fn decimal(&self, context: Node<'_, '_>, path: &str) -> Decimal {
        self.lookup(context, path).text().map(parse_decimal).unwrap_or(Decimal::ZERO)
    }

    /// Decimal at the first of `paths` holding a numeric value.
    pub fn probe_decimal(&self, context: Node<'_, '_>, paths: &[&str]) -> Option<Decimal> {
        paths
            .iter()
            .find_map(|path| self.lookup(context, path).text().and_then(try_parse_decimal))
    }

    /// Attribute of the element at `path` (an empty path means `context`).
    pub fn attribute(&self, context: Node<'_, '_>, path: &str, name: &str) -> String {
        self.node(context, path)
            .and_then(|node| node.attribute(name))
            .unwrap_or_default()
            .to_string()
    }
}

/// Keep the calendar-date prefix of a date or date-time value.
pub fn truncate_date(value: &str) -> String {
    value.chars().take(DATE_LEN).collect()
}

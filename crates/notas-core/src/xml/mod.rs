//! Namespace-tolerant navigation of fiscal XML trees.

mod fields;
mod navigator;
mod path;
mod strategy;

pub use fields::{truncate_date, FieldReader, Lookup, DATE_LEN};
pub use navigator::SchemaNavigator;
pub use path::LogicalPath;
pub use strategy::{PathStrategy, StrategyChain};

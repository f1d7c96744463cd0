//! HTML parsers for arc-raiders.dev pages.

pub mod conditions;

pub use conditions::{ConditionFields, ConditionsParser, TimeInfo};

//! Conditional formatting
//!
//! A [`ConditionalRule`] compares the cell value against one or two numeric
//! thresholds and applies a style fragment when the comparison holds.
//!
//! ## Example
//!
//! ```rust
//! use sheetmark_core::{CfOperator, ConditionalRule, Color, StyleDescriptor};
//!
//! let rule = ConditionalRule::greater_than(1000.0)
//!     .with_format(StyleDescriptor::new().fill_color(Color::rgb(0xFF, 0xC7, 0xCE)));
//!
//! assert_eq!(rule.operator, CfOperator::GreaterThan);
//! assert!(rule.matches(1500.0));
//! ```

use crate::style::StyleDescriptor;

/// Comparison operator of a conditional rule
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CfOperator {
    /// Value strictly greater than the threshold
    GreaterThan,
    /// Value strictly less than the threshold
    LessThan,
    /// Value between two thresholds, inclusive
    Between,
}

impl CfOperator {
    /// Name of the operator as written by spreadsheet formats
    pub fn as_str(&self) -> &'static str {
        match self {
            CfOperator::GreaterThan => "greaterThan",
            CfOperator::LessThan => "lessThan",
            CfOperator::Between => "between",
        }
    }
}

/// A cell-value conditional formatting rule
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ConditionalRule {
    /// Comparison operator
    pub operator: CfOperator,
    /// First threshold
    pub value1: f64,
    /// Second threshold (only for `Between`)
    pub value2: Option<f64>,
    /// Style fragment applied when the rule matches
    pub format: StyleDescriptor,
}

impl ConditionalRule {
    /// Match values greater than `value`
    pub fn greater_than(value: f64) -> Self {
        Self {
            operator: CfOperator::GreaterThan,
            value1: value,
            value2: None,
            format: StyleDescriptor::default(),
        }
    }

    /// Match values less than `value`
    pub fn less_than(value: f64) -> Self {
        Self {
            operator: CfOperator::LessThan,
            value1: value,
            value2: None,
            format: StyleDescriptor::default(),
        }
    }

    /// Match values within `low..=high` (bounds are reordered if needed)
    pub fn between(low: f64, high: f64) -> Self {
        Self {
            operator: CfOperator::Between,
            value1: low.min(high),
            value2: Some(low.max(high)),
            format: StyleDescriptor::default(),
        }
    }

    /// Set the format applied on match
    pub fn with_format(mut self, format: StyleDescriptor) -> Self {
        self.format = format;
        self
    }

    /// Evaluate the comparison against a numeric cell value
    pub fn matches(&self, value: f64) -> bool {
        match self.operator {
            CfOperator::GreaterThan => value > self.value1,
            CfOperator::LessThan => value < self.value1,
            CfOperator::Between => {
                let high = self.value2.unwrap_or(self.value1);
                value >= self.value1 && value <= high
            }
        }
    }
}

impl std::hash::Hash for ConditionalRule {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.operator.hash(state);
        self.value1.to_bits().hash(state);
        self.value2.map(f64::to_bits).hash(state);
        self.format.hash(state);
    }
}

impl Eq for ConditionalRule {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_operators() {
        assert!(ConditionalRule::greater_than(10.0).matches(10.5));
        assert!(!ConditionalRule::greater_than(10.0).matches(10.0));
        assert!(ConditionalRule::less_than(0.0).matches(-1.0));

        let between = ConditionalRule::between(20.0, 10.0);
        assert_eq!((between.value1, between.value2), (10.0, Some(20.0)));
        assert!(between.matches(10.0));
        assert!(between.matches(20.0));
        assert!(!between.matches(20.01));
    }
}

//! Specifications
//!
//! A specification is a typed, category-scoped product attribute such as `weight` (number, `kg`)
//! or `material` (text). Product values are validated against the specification's kind.

use std::{fmt, str::FromStr};

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// The value type of a specification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SpecificationKind {
    /// Free text.
    Text,

    /// Decimal number, optionally with a unit.
    Number,

    /// Yes / no.
    Boolean,
}

/// Specification value parsing failures.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SpecificationValueError {
    /// Unknown kind name.
    #[error("unknown specification kind `{0}`")]
    UnknownKind(String),

    /// Text value was blank.
    #[error("value cannot be empty")]
    Empty,

    /// Value is not a decimal number.
    #[error("`{0}` is not a number")]
    NotANumber(String),

    /// Value is not a recognised boolean.
    #[error("`{0}` is not a boolean")]
    NotABoolean(String),
}

/// A parsed specification value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SpecificationValue {
    /// Text value.
    Text(String),

    /// Numeric value.
    Number(Decimal),

    /// Boolean value.
    Boolean(bool),
}

impl SpecificationKind {
    /// Canonical lowercase name.
    pub const fn as_str(self) -> &'static str {
        match self {
            SpecificationKind::Text => "text",
            SpecificationKind::Number => "number",
            SpecificationKind::Boolean => "boolean",
        }
    }

    /// Parse a raw value according to this kind.
    ///
    /// # Errors
    ///
    /// Returns a [`SpecificationValueError`] when `raw` does not match the kind.
    pub fn parse_value(self, raw: &str) -> Result<SpecificationValue, SpecificationValueError> {
        let trimmed = raw.trim();

        if trimmed.is_empty() {
            return Err(SpecificationValueError::Empty);
        }

        match self {
            SpecificationKind::Text => Ok(SpecificationValue::Text(trimmed.to_string())),
            SpecificationKind::Number => Decimal::from_str(trimmed)
                .map(|value| SpecificationValue::Number(value.normalize()))
                .map_err(|_parse| SpecificationValueError::NotANumber(trimmed.to_string())),
            SpecificationKind::Boolean => match trimmed.to_ascii_lowercase().as_str() {
                "true" | "yes" | "1" => Ok(SpecificationValue::Boolean(true)),
                "false" | "no" | "0" => Ok(SpecificationValue::Boolean(false)),
                _ => Err(SpecificationValueError::NotABoolean(trimmed.to_string())),
            },
        }
    }
}

impl fmt::Display for SpecificationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SpecificationKind {
    type Err = SpecificationValueError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "text" => Ok(SpecificationKind::Text),
            "number" => Ok(SpecificationKind::Number),
            "boolean" => Ok(SpecificationKind::Boolean),
            other => Err(SpecificationValueError::UnknownKind(other.to_string())),
        }
    }
}

impl fmt::Display for SpecificationValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SpecificationValue::Text(value) => f.write_str(value),
            SpecificationValue::Number(value) => write!(f, "{value}"),
            SpecificationValue::Boolean(value) => write!(f, "{value}"),
        }
    }
}

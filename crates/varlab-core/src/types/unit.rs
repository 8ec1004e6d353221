//! Unit of measure carried by a series.

use serde::{Deserialize, Serialize};
use std::fmt;

/// What the values of a [`Series`](crate::Series) represent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UnitOfMeasure {
    /// Observed prices.
    Price,
    /// Classic (arithmetic) returns: `(now - prev) / prev`.
    ReturnClassic,
    /// Logarithmic returns: `ln(now / prev)`.
    ReturnLog,
}

impl UnitOfMeasure {
    /// Returns true for either return unit.
    #[must_use]
    pub fn is_return(&self) -> bool {
        matches!(self, Self::ReturnClassic | Self::ReturnLog)
    }

    /// Human readable description.
    #[must_use]
    pub fn description(&self) -> &'static str {
        match self {
            Self::Price => "price",
            Self::ReturnClassic => "classic return",
            Self::ReturnLog => "log return",
        }
    }
}

impl fmt::Display for UnitOfMeasure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.description())
    }
}

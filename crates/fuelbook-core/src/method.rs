//! Costing methods and over-consumption policy.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Costing method determines which lots an outgoing movement consumes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE", try_from = "String")]
pub enum CostingMethod {
    /// First In, First Out. Oldest lots are consumed first.
    #[default]
    Fifo,
    /// Last In, First Out. Newest lots are consumed first.
    Lifo,
    /// Weighted average over every incoming movement.
    Average,
}

/// Error returned when a costing method name is not recognised.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown costing method: {0} (expected FIFO, LIFO or AVERAGE)")]
pub struct ParseCostingMethodError(pub String);

impl FromStr for CostingMethod {
    type Err = ParseCostingMethodError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "FIFO" => Ok(Self::Fifo),
            "LIFO" => Ok(Self::Lifo),
            "AVERAGE" | "AVG" => Ok(Self::Average),
            _ => Err(ParseCostingMethodError(s.to_string())),
        }
    }
}

impl TryFrom<String> for CostingMethod {
    type Error = ParseCostingMethodError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl fmt::Display for CostingMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Fifo => write!(f, "FIFO"),
            Self::Lifo => write!(f, "LIFO"),
            Self::Average => write!(f, "AVERAGE"),
        }
    }
}

impl CostingMethod {
    /// Whether this method consumes individual lots in order.
    #[must_use]
    pub const fn is_lot_based(self) -> bool {
        matches!(self, Self::Fifo | Self::Lifo)
    }
}

/// What happens when outgoing quantity exceeds the stock on hand.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OverdrawPolicy {
    /// Ignore the excess demand and floor the remaining quantity at zero.
    #[default]
    Clamp,
    /// Report the excess demand as an error.
    Strict,
}

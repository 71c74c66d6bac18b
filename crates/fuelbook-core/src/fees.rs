//! Logistics fee rules.
//!
//! Moving goods into a staging system costs a freight fee proportional to
//! the cargo volume. A [`FeeSchedule`] is an ordered list of [`FeeRule`]s;
//! the first rule matching the entry's region (and target, when the rule
//! names one) decides the rate per cubic metre.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Local staging hub.
pub const LOCAL_HUB: &str = "C-J6MT";
/// Remote trade hub.
pub const REMOTE_HUB: &str = "Jita";

/// A single fee rule.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FeeRule {
    /// Region the movement happened in.
    pub region: String,
    /// Target the rule is restricted to, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target: Option<String>,
    /// Fee per cubic metre of cargo.
    pub rate_per_m3: Decimal,
}

impl FeeRule {
    /// Create a rule that applies to every target in `region`.
    #[must_use]
    pub fn region(region: impl Into<String>, rate_per_m3: Decimal) -> Self {
        Self {
            region: region.into(),
            target: None,
            rate_per_m3,
        }
    }

    /// Restrict this rule to one target.
    #[must_use]
    pub fn for_target(mut self, target: impl Into<String>) -> Self {
        self.target = Some(target.into());
        self
    }

    /// Check whether this rule applies to a movement.
    #[must_use]
    pub fn matches(&self, region: &str, target: &str) -> bool {
        self.region == region && self.target.as_deref().map_or(true, |t| t == target)
    }
}

/// Ordered fee rules. Movements matching no rule carry no fee.
///
/// # Examples
///
/// ```
/// use fuelbook_core::FeeSchedule;
/// use rust_decimal_macros::dec;
///
/// let fees = FeeSchedule::default();
/// assert_eq!(fees.fee_per_unit("C-J6MT", "Anyed", dec!(2)), dec!(160));
/// assert_eq!(fees.fee_per_unit("Jita", "RYC", dec!(2)), dec!(2560));
/// assert_eq!(fees.fee_per_unit("Jita", "Anyed", dec!(2)), dec!(0));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeeSchedule {
    rules: Vec<FeeRule>,
}

impl Default for FeeSchedule {
    fn default() -> Self {
        Self {
            rules: vec![
                FeeRule::region(LOCAL_HUB, Decimal::from(80)),
                FeeRule::region(REMOTE_HUB, Decimal::from(1280)).for_target("RYC"),
            ],
        }
    }
}

impl FeeSchedule {
    /// A schedule with no rules: every movement is fee-free.
    #[must_use]
    pub const fn none() -> Self {
        Self { rules: Vec::new() }
    }

    /// Build a schedule from explicit rules.
    #[must_use]
    pub const fn new(rules: Vec<FeeRule>) -> Self {
        Self { rules }
    }

    /// Get the rules in evaluation order.
    #[must_use]
    pub fn rules(&self) -> &[FeeRule] {
        &self.rules
    }

    /// Rate per cubic metre for a movement, zero when no rule matches.
    #[must_use]
    pub fn rate(&self, region: &str, target: &str) -> Decimal {
        self.rules
            .iter()
            .find(|rule| rule.matches(region, target))
            .map_or(Decimal::ZERO, |rule| rule.rate_per_m3)
    }

    /// Fee per unit of an item with the given per-unit volume.
    #[must_use]
    pub fn fee_per_unit(&self, region: &str, target: &str, volume_per_unit: Decimal) -> Decimal {
        self.rate(region, target) * volume_per_unit
    }
}

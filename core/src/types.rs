//! Shared primitive types used across every generator.

use crate::error::MetricsError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Whole US dollars.
pub type Dollars = i64;

/// Health above this is an active customer.
pub const ACTIVE_HEALTH_FLOOR: u32 = 70;
/// Health above this (and not active) is at risk; at or below it, churned.
pub const AT_RISK_HEALTH_FLOOR: u32 = 40;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum PlanTier {
    Enterprise,
    Pro,
    Basic,
}

impl PlanTier {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Enterprise => "Enterprise",
            Self::Pro => "Pro",
            Self::Basic => "Basic",
        }
    }
}

impl fmt::Display for PlanTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum CustomerStatus {
    Active,
    AtRisk,
    Churned,
}

impl CustomerStatus {
    /// Lifecycle status is a pure function of the health score.
    pub fn from_health(health: u32) -> Self {
        if health > ACTIVE_HEALTH_FLOOR {
            Self::Active
        } else if health > AT_RISK_HEALTH_FLOOR {
            Self::AtRisk
        } else {
            Self::Churned
        }
    }
}

/// Direction a metric (or a sparkline walk) is heading.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "lowercase")]
pub enum Trend {
    #[default]
    Up,
    Down,
    Stable,
}

impl Trend {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Up => "up",
            Self::Down => "down",
            Self::Stable => "stable",
        }
    }
}

impl FromStr for Trend {
    type Err = MetricsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "up" => Ok(Self::Up),
            "down" => Ok(Self::Down),
            "stable" => Ok(Self::Stable),
            _ => Err(MetricsError::InvalidTrend { value: s.to_string() }),
        }
    }
}

impl fmt::Display for Trend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

//! Risk tiers for remote operations
//!
//! Tiers are ordered by impact: `safe < moderate < destructive < critical`.

use serde::{Deserialize, Serialize};

/// Risk tier of a remote operation
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskTier {
    /// Read-only lookups
    Safe,
    /// Reversible changes
    Moderate,
    /// Removes or overwrites data
    Destructive,
    /// May permanently affect data or many accounts at once
    Critical,
}

impl RiskTier {
    /// All tiers in ascending order
    pub const ALL: [RiskTier; 4] = [
        RiskTier::Safe,
        RiskTier::Moderate,
        RiskTier::Destructive,
        RiskTier::Critical,
    ];

    /// Tier assigned to operations missing from the risk table
    pub const fn fallback() -> Self {
        RiskTier::Moderate
    }

    /// Whether this tier is gated by the destructive-operations switch
    pub fn is_gated(&self) -> bool {
        *self >= RiskTier::Destructive
    }

    /// Get human-readable description
    pub fn description(&self) -> &'static str {
        match self {
            Self::Safe => "read-only operation",
            Self::Moderate => "modifying operation",
            Self::Destructive => "destructive operation",
            Self::Critical => "critical operation",
        }
    }
}

impl std::fmt::Display for RiskTier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Safe => write!(f, "safe"),
            Self::Moderate => write!(f, "moderate"),
            Self::Destructive => write!(f, "destructive"),
            Self::Critical => write!(f, "critical"),
        }
    }
}

impl std::str::FromStr for RiskTier {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "safe" => Ok(Self::Safe),
            "moderate" => Ok(Self::Moderate),
            "destructive" => Ok(Self::Destructive),
            "critical" => Ok(Self::Critical),
            _ => Err(format!("Unknown risk tier: {}", s)),
        }
    }
}

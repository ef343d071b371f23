//! Risk Registry - operation name to risk tier
//!
//! Built once from the operation catalog. Lookups are total: names missing
//! from the table resolve to [`RiskTier::fallback`] (`moderate`), never to
//! `safe`.

use std::collections::HashMap;

use edugate_core::RiskTier;
use edugate_tools::OperationCatalog;

/// Risk entry for one operation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OperationRisk {
    pub tier: RiskTier,
    pub warning: Option<String>,
}

/// Static risk table
#[derive(Debug, Clone, Default)]
pub struct RiskRegistry {
    entries: HashMap<String, OperationRisk>,
}

impl RiskRegistry {
    /// Build from an operation catalog
    pub fn from_catalog(catalog: &OperationCatalog) -> Self {
        let entries = catalog
            .iter()
            .map(|op| {
                (
                    op.name.clone(),
                    OperationRisk {
                        tier: op.tier,
                        warning: op.warning.clone(),
                    },
                )
            })
            .collect();
        Self { entries }
    }

    /// Build from `(name, tier, warning)` entries
    pub fn from_entries<I, S>(entries: I) -> Self
    where
        I: IntoIterator<Item = (S, RiskTier, Option<S>)>,
        S: Into<String>,
    {
        let entries = entries
            .into_iter()
            .map(|(name, tier, warning)| {
                (
                    name.into(),
                    OperationRisk {
                        tier,
                        warning: warning.map(Into::into),
                    },
                )
            })
            .collect();
        Self { entries }
    }

    /// Tier of an operation; unknown names get the fallback tier
    pub fn tier_of(&self, name: &str) -> RiskTier {
        self.entries
            .get(name)
            .map(|risk| risk.tier)
            .unwrap_or_else(RiskTier::fallback)
    }

    /// Operation-specific warning, if any
    pub fn warning_of(&self, name: &str) -> Option<&str> {
        self.entries.get(name).and_then(|risk| risk.warning.as_deref())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

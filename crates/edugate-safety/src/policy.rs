//! Policy Engine - decide whether an operation may run
//!
//! `destructive` and `critical` operations share one switch
//! (`allow_destructive`) but are denied with distinct wording, so operators
//! can tell when data may be permanently affected. `safe` and `moderate`
//! operations are never denied here.

use std::sync::Arc;

use edugate_core::RiskTier;
use edugate_tools::{OperationCatalog, OperationSpec};

use super::config::{GateConfig, ALLOW_DESTRUCTIVE_ENV};
use super::registry::RiskRegistry;

/// Policy decision for an operation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PolicyDecision {
    /// Operation is allowed
    Allow,
    /// Operation is denied
    Deny {
        /// Why, and which switch enables it
        reason: String,
    },
}

impl PolicyDecision {
    /// Check if the decision is Allow
    pub fn is_allowed(&self) -> bool {
        matches!(self, Self::Allow)
    }

    /// Check if the decision is Deny
    pub fn is_denied(&self) -> bool {
        matches!(self, Self::Deny { .. })
    }

    /// Denial reason, if denied
    pub fn reason(&self) -> Option<&str> {
        match self {
            Self::Allow => None,
            Self::Deny { reason } => Some(reason),
        }
    }
}

/// Policy engine over a risk registry
#[derive(Debug, Clone)]
pub struct PolicyEngine {
    registry: Arc<RiskRegistry>,
}

impl PolicyEngine {
    pub fn new(registry: Arc<RiskRegistry>) -> Self {
        Self { registry }
    }

    /// Policy over the tiers declared by a catalog
    pub fn for_catalog(catalog: &OperationCatalog) -> Self {
        Self::new(Arc::new(RiskRegistry::from_catalog(catalog)))
    }

    /// Get the underlying registry
    pub fn registry(&self) -> &RiskRegistry {
        &self.registry
    }

    /// Tier of an operation
    pub fn tier_of(&self, name: &str) -> RiskTier {
        self.registry.tier_of(name)
    }

    /// Evaluate whether an operation may run under `config`
    pub fn evaluate(&self, name: &str, config: &GateConfig) -> PolicyDecision {
        match self.registry.tier_of(name) {
            RiskTier::Critical if !config.allow_destructive => PolicyDecision::Deny {
                reason: format!(
                    "Operation '{}' is critical and critical operations are disabled: \
                     they may permanently affect data. Set {}=true (allow_destructive) to enable them.",
                    name, ALLOW_DESTRUCTIVE_ENV
                ),
            },
            RiskTier::Destructive if !config.allow_destructive => PolicyDecision::Deny {
                reason: format!(
                    "Operation '{}' is destructive and destructive operations are disabled. \
                     Set {}=true (allow_destructive) to enable them.",
                    name, ALLOW_DESTRUCTIVE_ENV
                ),
            },
            _ => PolicyDecision::Allow,
        }
    }

    /// Catalog operations allowed under `config`, in catalog order
    ///
    /// This is the startup filter; it applies exactly the check `evaluate`
    /// applies at call time.
    pub fn advertised<'a>(&self, catalog: &'a OperationCatalog, config: &GateConfig) -> Vec<&'a OperationSpec> {
        catalog
            .iter()
            .filter(|op| self.evaluate(&op.name, config).is_allowed())
            .collect()
    }

    /// Whether the confirmation marker is required for an operation
    pub fn requires_confirmation(&self, name: &str, config: &GateConfig) -> bool {
        if !config.require_confirmation {
            return false;
        }
        self.registry.tier_of(name).is_gated()
    }
}

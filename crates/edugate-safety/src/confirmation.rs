//! Confirmation Gate - require an explicit marker for gated operations
//!
//! The marker must be the JSON boolean `true`. Truthy look-alikes (`1`,
//! `"true"`, `"yes"`) do not count.

use edugate_core::CONFIRMATION_FIELD;
use serde_json::Value;

use super::config::GateConfig;
use super::policy::PolicyEngine;
use super::warning::compose_warning;

/// Result of a confirmation check
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfirmationCheck {
    pub ok: bool,
    pub message: Option<String>,
}

impl ConfirmationCheck {
    fn passed() -> Self {
        Self {
            ok: true,
            message: None,
        }
    }

    fn failed(message: String) -> Self {
        Self {
            ok: false,
            message: Some(message),
        }
    }
}

/// Whether `params` carries the confirmation marker set to JSON `true`
pub fn is_confirmed(params: &Value) -> bool {
    matches!(params.get(CONFIRMATION_FIELD), Some(Value::Bool(true)))
}

/// Check the confirmation marker for an operation
pub fn check_confirmation(
    policy: &PolicyEngine,
    name: &str,
    params: &Value,
    config: &GateConfig,
) -> ConfirmationCheck {
    if !policy.requires_confirmation(name, config) || is_confirmed(params) {
        return ConfirmationCheck::passed();
    }

    let warning = compose_warning(policy.registry(), name, policy.tier_of(name));
    ConfirmationCheck::failed(format!(
        "{}\n\nOperation '{}' requires explicit confirmation. \
         Call it again with \"{}\": true to proceed.",
        warning, name, CONFIRMATION_FIELD
    ))
}

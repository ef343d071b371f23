//! Warning Composer - human-readable risk text

use edugate_core::RiskTier;

use super::registry::RiskRegistry;

/// Generic warning for a tier; empty for `safe`
pub fn tier_warning(tier: RiskTier) -> &'static str {
    match tier {
        RiskTier::Safe => "",
        RiskTier::Moderate => "Note: this operation changes data on the school server.",
        RiskTier::Destructive => {
            "WARNING: this is a destructive operation. It removes or overwrites data."
        }
        RiskTier::Critical => {
            "CRITICAL: this operation may permanently affect data and cannot be undone."
        }
    }
}

/// Compose the tier warning and the operation-specific warning
///
/// The specific warning goes on its own line. No de-duplication is attempted.
pub fn compose_warning(registry: &RiskRegistry, name: &str, tier: RiskTier) -> String {
    let generic = tier_warning(tier);
    match registry.warning_of(name) {
        Some(specific) if generic.is_empty() => specific.to_string(),
        Some(specific) => format!("{}\n{}", generic, specific),
        None => generic.to_string(),
    }
}

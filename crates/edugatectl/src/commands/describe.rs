use anyhow::{anyhow, Result};
use edugate_safety::{compose_warning, GateConfig, PolicyDecision, PolicyEngine};
use edugate_tools::OperationCatalog;

/// Describe a single operation
pub fn execute(config: GateConfig, operation: &str) -> Result<()> {
    let catalog = OperationCatalog::builtin();
    let spec = catalog
        .get(operation)
        .ok_or_else(|| anyhow!("Unknown operation: {}", operation))?;
    let policy = PolicyEngine::for_catalog(&catalog);

    println!("Name:          {}", spec.name);
    println!("Category:      {}", spec.category);
    println!("Tier:          {} ({})", spec.tier, spec.tier.description());
    println!("Description:   {}", spec.description);
    if let Some(param) = &spec.identity_param {
        println!("Identity arg:  {}", param);
    }

    match policy.evaluate(&spec.name, &config) {
        PolicyDecision::Allow => println!("Policy:        allowed"),
        PolicyDecision::Deny { reason } => println!("Policy:        denied - {}", reason),
    }
    println!(
        "Confirmation:  {}",
        if policy.requires_confirmation(&spec.name, &config) {
            "required"
        } else {
            "not required"
        }
    );

    let warning = compose_warning(policy.registry(), &spec.name, spec.tier);
    if !warning.is_empty() {
        println!("\nWarning:\n{}", warning);
    }

    println!("\nParameters:\n{}", serde_json::to_string_pretty(&spec.parameters)?);
    Ok(())
}

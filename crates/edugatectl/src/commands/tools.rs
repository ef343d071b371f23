use anyhow::Result;
use edugate_safety::{GateConfig, PolicyEngine};
use edugate_tools::{OperationCatalog, OperationSpec};
use serde_json::{json, Value};

/// List operations (kubectl-style table or JSON)
pub fn execute(config: GateConfig, output: &str, all: bool) -> Result<()> {
    let rows = listing(&OperationCatalog::builtin(), &config, all);

    match output {
        "json" => {
            println!("{}", serde_json::to_string_pretty(&rows)?);
        }
        _ => {
            println!("\n{:<22} {:<12} {:<8} {}", "NAME", "TIER", "STATUS", "CONFIRM");
            println!("{}", "=".repeat(54));
            for row in &rows {
                let status = if row["allowed"].as_bool().unwrap_or(false) {
                    "allowed"
                } else {
                    "denied"
                };
                let confirm = if row["confirmation"].as_bool().unwrap_or(false) {
                    "yes"
                } else {
                    "-"
                };
                println!(
                    "{:<22} {:<12} {:<8} {}",
                    row["name"].as_str().unwrap_or("unknown"),
                    row["tier"].as_str().unwrap_or("unknown"),
                    status,
                    confirm
                );
            }
            println!("\n{} operation(s)", rows.len());
        }
    }

    Ok(())
}

/// One row per listed operation; without `all` only the advertised ones
fn listing(catalog: &OperationCatalog, config: &GateConfig, all: bool) -> Vec<Value> {
    let policy = PolicyEngine::for_catalog(catalog);
    let advertised = policy.advertised(catalog, config);

    let listed: Vec<&OperationSpec> = if all {
        catalog.iter().collect()
    } else {
        advertised.clone()
    };

    listed
        .iter()
        .map(|op| {
            json!({
                "name": op.name,
                "tier": op.tier,
                "allowed": advertised.iter().any(|a| a.name == op.name),
                "confirmation": policy.requires_confirmation(&op.name, config),
                "description": op.description,
            })
        })
        .collect()
}

//! Gated Tools - catalog operations exposed as tools
//!
//! Registration applies the same policy check as dispatch: operations the
//! policy denies are left out of the registry entirely, so the host never
//! sees them.

use std::sync::Arc;

use async_trait::async_trait;
use edugate_core::{EdugateResult, Tool, ToolConfig, ToolInput, ToolResult, CONFIRMATION_FIELD};
use edugate_tools::{OperationSpec, ToolRegistry};
use serde_json::json;
use tracing::info;

use super::dispatch::Dispatcher;
use super::warning::compose_warning;

/// A catalog operation routed through the dispatcher
pub struct GatedTool {
    config: ToolConfig,
    dispatcher: Arc<Dispatcher>,
}

impl GatedTool {
    pub fn new(spec: &OperationSpec, dispatcher: Arc<Dispatcher>) -> Self {
        let policy = dispatcher.policy();
        let gate_config = dispatcher.config();

        let warning = compose_warning(policy.registry(), &spec.name, policy.tier_of(&spec.name));
        let description = if warning.is_empty() {
            spec.description.clone()
        } else {
            format!("{}\n\n{}", spec.description, warning)
        };

        let mut parameters = spec.parameters.clone();
        if policy.requires_confirmation(&spec.name, gate_config) {
            if let Some(properties) = parameters
                .get_mut("properties")
                .and_then(|p| p.as_object_mut())
            {
                properties.insert(
                    CONFIRMATION_FIELD.to_string(),
                    json!({
                        "type": "boolean",
                        "description": "Must be set to true to confirm this operation"
                    }),
                );
            }
        }

        Self {
            config: ToolConfig {
                name: spec.name.clone(),
                description,
                parameters,
            },
            dispatcher,
        }
    }
}

#[async_trait]
impl Tool for GatedTool {
    async fn execute(&self, input: ToolInput) -> EdugateResult<ToolResult> {
        let outcome = self.dispatcher.dispatch(&self.config.name, input.arguments).await;
        Ok(outcome.into_tool_result())
    }

    fn config(&self) -> &ToolConfig {
        &self.config
    }
}

/// Register every operation the policy allows; returns the number registered
pub fn register_gated_tools(registry: &mut ToolRegistry, dispatcher: Arc<Dispatcher>) -> usize {
    let advertised = dispatcher.advertised_operations();
    let skipped = dispatcher.catalog().len() - advertised.len();

    for spec in &advertised {
        let tier = dispatcher.policy().tier_of(&spec.name);
        registry.register(GatedTool::new(spec, Arc::clone(&dispatcher)), spec.category, tier);
    }

    info!(registered = advertised.len(), skipped = skipped, "Registered gated tools");
    advertised.len()
}

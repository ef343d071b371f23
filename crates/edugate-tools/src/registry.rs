//! Tool Registry - the tools offered to the agent host
//!
//! Each entry keeps the tier and category it was registered with, so the
//! host listing can show how dangerous a tool is without going back to the
//! catalog. Only registered tools are listed or executable: anything
//! filtered out at startup is invisible to the host.

use std::collections::BTreeMap;
use std::sync::Arc;
use std::time::Instant;

use async_trait::async_trait;
use edugate_core::{
    EdugateError, EdugateResult, RiskTier, Tool, ToolDefinition, ToolExecutor, ToolInput, ToolResult,
};
use tracing::{debug, info, warn};

/// Area of the school system an operation belongs to
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ToolCategory {
    Users,
    Groups,
    Courses,
    Absences,
    Timetable,
    Rooms,
    Exams,
    Messaging,
    #[default]
    System,
}

impl std::fmt::Display for ToolCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            ToolCategory::Users => "users",
            ToolCategory::Groups => "groups",
            ToolCategory::Courses => "courses",
            ToolCategory::Absences => "absences",
            ToolCategory::Timetable => "timetable",
            ToolCategory::Rooms => "rooms",
            ToolCategory::Exams => "exams",
            ToolCategory::Messaging => "messaging",
            ToolCategory::System => "system",
        };
        f.write_str(name)
    }
}

/// A tool together with its registration metadata
#[derive(Clone)]
pub struct RegisteredTool {
    pub tool: Arc<dyn Tool>,
    pub category: ToolCategory,
    pub tier: RiskTier,
}

/// Registry of host-visible tools, ordered by name
#[derive(Default)]
pub struct ToolRegistry {
    entries: BTreeMap<String, RegisteredTool>,
}

impl ToolRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a tool; a later registration under the same name replaces the earlier one
    pub fn register<T: Tool + 'static>(&mut self, tool: T, category: ToolCategory, tier: RiskTier) -> &mut Self {
        let name = tool.config().name.clone();
        info!(tool = %name, category = %category, tier = %tier, "Registering tool");

        let entry = RegisteredTool {
            tool: Arc::new(tool),
            category,
            tier,
        };
        if self.entries.insert(name.clone(), entry).is_some() {
            warn!(tool = %name, "Replaced previously registered tool");
        }
        self
    }

    pub fn get(&self, name: &str) -> Option<Arc<dyn Tool>> {
        self.entries.get(name).map(|entry| Arc::clone(&entry.tool))
    }

    /// Tier the tool was registered with
    pub fn tier_of(&self, name: &str) -> Option<RiskTier> {
        self.entries.get(name).map(|entry| entry.tier)
    }

    /// Registered names, sorted
    pub fn names(&self) -> Vec<&str> {
        self.entries.keys().map(String::as_str).collect()
    }

    /// Names registered under a category, sorted
    pub fn names_in(&self, category: ToolCategory) -> Vec<&str> {
        self.entries
            .iter()
            .filter(|(_, entry)| entry.category == category)
            .map(|(name, _)| name.as_str())
            .collect()
    }

    /// Names of tools that need confirmation-tier handling (`destructive` and above)
    pub fn gated_names(&self) -> Vec<&str> {
        self.entries
            .iter()
            .filter(|(_, entry)| entry.tier.is_gated())
            .map(|(name, _)| name.as_str())
            .collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Freeze the registry into an executor for the host
    pub fn into_executor(self) -> BuiltinToolExecutor {
        BuiltinToolExecutor {
            entries: self.entries,
        }
    }
}

/// Executes registered tools by name
pub struct BuiltinToolExecutor {
    entries: BTreeMap<String, RegisteredTool>,
}

#[async_trait]
impl ToolExecutor for BuiltinToolExecutor {
    async fn execute_tool(&self, name: &str, input: ToolInput) -> EdugateResult<ToolResult> {
        let Some(entry) = self.entries.get(name) else {
            return Err(EdugateError::tool(format!("Tool not found: {}", name)));
        };

        let start = Instant::now();
        let result = entry.tool.execute(input).await;
        let elapsed = start.elapsed().as_millis() as u64;

        match result {
            Ok(result) => {
                debug!(tool = %name, tier = %entry.tier, elapsed_ms = elapsed, success = result.success, "Tool finished");
                Ok(result.with_execution_time(elapsed))
            }
            Err(e) => {
                warn!(tool = %name, tier = %entry.tier, error = %e, "Tool execution failed");
                Err(e)
            }
        }
    }

    fn list_tools(&self) -> Vec<ToolDefinition> {
        self.entries.values().map(|entry| entry.tool.definition()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use edugate_core::ToolConfig;

    struct EchoTool {
        config: ToolConfig,
    }

    impl EchoTool {
        fn new(name: &str) -> Self {
            Self {
                config: ToolConfig {
                    name: name.to_string(),
                    description: format!("Echo {}", name),
                    parameters: serde_json::json!({"type": "object", "properties": {}}),
                },
            }
        }
    }

    #[async_trait]
    impl Tool for EchoTool {
        async fn execute(&self, input: ToolInput) -> EdugateResult<ToolResult> {
            Ok(ToolResult::success(input.arguments))
        }

        fn config(&self) -> &ToolConfig {
            &self.config
        }
    }

    fn registry() -> ToolRegistry {
        let mut registry = ToolRegistry::new();
        registry
            .register(EchoTool::new("list_users"), ToolCategory::Users, RiskTier::Safe)
            .register(EchoTool::new("deactivate_user"), ToolCategory::Users, RiskTier::Destructive)
            .register(EchoTool::new("cancel_room_booking"), ToolCategory::Rooms, RiskTier::Destructive)
            .register(EchoTool::new("get_system_info"), ToolCategory::System, RiskTier::Safe);
        registry
    }

    #[test]
    fn test_metadata_kept_per_tool() {
        let registry = registry();

        assert_eq!(registry.len(), 4);
        assert_eq!(registry.tier_of("deactivate_user"), Some(RiskTier::Destructive));
        assert_eq!(registry.tier_of("delete_user"), None);
        assert!(registry.get("list_users").is_some());
        assert!(registry.get("delete_user").is_none());
    }

    #[test]
    fn test_listings_sorted() {
        let registry = registry();

        assert_eq!(
            registry.names(),
            vec!["cancel_room_booking", "deactivate_user", "get_system_info", "list_users"]
        );
        assert_eq!(registry.names_in(ToolCategory::Users), vec!["deactivate_user", "list_users"]);
        assert!(registry.names_in(ToolCategory::Exams).is_empty());
        assert_eq!(registry.gated_names(), vec!["cancel_room_booking", "deactivate_user"]);
    }

    #[test]
    fn test_reregistration_replaces() {
        let mut registry = registry();
        registry.register(EchoTool::new("list_users"), ToolCategory::Users, RiskTier::Moderate);

        assert_eq!(registry.len(), 4);
        assert_eq!(registry.tier_of("list_users"), Some(RiskTier::Moderate));
    }

    #[tokio::test]
    async fn test_executor_runs_and_lists() {
        let executor = registry().into_executor();

        let result = executor
            .execute_tool("list_users", ToolInput::new(serde_json::json!({"class": "7b"})))
            .await
            .unwrap();
        assert!(result.success);
        assert_eq!(result.data["class"], "7b");

        let names: Vec<String> = executor.list_tools().into_iter().map(|d| d.name).collect();
        assert_eq!(names.len(), 4);
        assert_eq!(names[0], "cancel_room_booking");
    }

    #[tokio::test]
    async fn test_executor_unknown_tool() {
        let executor = ToolRegistry::new().into_executor();
        let result = executor
            .execute_tool("delete_user", ToolInput::new(serde_json::json!({})))
            .await;
        assert!(matches!(result, Err(EdugateError::Tool(_))));
    }
}

// EduGate Core - Foundation types and traits
//
// Shared by the operation catalog, the safety layer and the CLI.

pub mod error;
pub mod risk;
pub mod tool;

pub use error::{EdugateError, EdugateResult};
pub use risk::RiskTier;
pub use tool::{RemoteClient, Tool, ToolConfig, ToolDefinition, ToolExecutor, ToolInput, ToolResult};

/// Reserved argument that authorizes a gated operation when set to JSON `true`
pub const CONFIRMATION_FIELD: &str = "confirm_destructive_action";

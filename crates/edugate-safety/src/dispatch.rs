//! Dispatch - run one operation through the safety gates
//!
//! Every call goes through the same sequence, each step able to stop it:
//!
//! 1. Allowance check (policy engine)
//! 2. Identifier normalization (best effort, never fails)
//! 3. Confirmation check
//! 4. Remote invocation (optionally under a timeout)
//! 5. Result shaping
//! 6. Failure containment
//!
//! The remote collaborator is only reached when steps 1 and 3 pass, and the
//! dispatcher always returns an outcome: no error escapes it.

use std::sync::Arc;

use edugate_core::{EdugateError, RemoteClient, ToolResult, CONFIRMATION_FIELD};
use edugate_tools::{OperationCatalog, OperationSpec};
use serde_json::Value;
use thiserror::Error;
use tracing::{debug, info, warn};

use super::annotate::CodeAnnotator;
use super::config::GateConfig;
use super::confirmation::check_confirmation;
use super::normalize::normalize_params;
use super::policy::{PolicyDecision, PolicyEngine};

/// Why a dispatch did not succeed
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DispatchError {
    /// Tier not allowed under the current configuration
    #[error("{reason}")]
    PolicyDenied { operation: String, reason: String },

    /// Confirmation marker required but absent or not `true`
    #[error("{message}")]
    ConfirmationMissing { operation: String, message: String },

    /// The remote collaborator failed
    #[error("Operation '{operation}' failed: {message}")]
    RemoteFailure { operation: String, message: String },

    /// The remote call exceeded the configured timeout
    #[error("Operation '{operation}' timed out after {timeout_secs}s")]
    Timeout { operation: String, timeout_secs: u64 },
}

impl DispatchError {
    pub fn operation(&self) -> &str {
        match self {
            Self::PolicyDenied { operation, .. }
            | Self::ConfirmationMissing { operation, .. }
            | Self::RemoteFailure { operation, .. }
            | Self::Timeout { operation, .. } => operation,
        }
    }

    /// Only a missing confirmation can be fixed by the caller re-issuing the call
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::ConfirmationMissing { .. })
    }

    /// Short machine-readable kind
    pub fn kind(&self) -> &'static str {
        match self {
            Self::PolicyDenied { .. } => "policy_denied",
            Self::ConfirmationMissing { .. } => "confirmation_missing",
            Self::RemoteFailure { .. } => "remote_failure",
            Self::Timeout { .. } => "timeout",
        }
    }
}

/// Outcome of one dispatch
#[derive(Debug, Clone, PartialEq)]
pub enum DispatchOutcome {
    /// The remote call happened and returned a value
    Success {
        operation: String,
        /// Text rendering for the caller
        text: String,
        /// Raw remote payload
        payload: Value,
    },
    /// The call was blocked or the remote failed
    Failure(DispatchError),
}

impl DispatchOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success { .. })
    }

    pub fn error(&self) -> Option<&DispatchError> {
        match self {
            Self::Success { .. } => None,
            Self::Failure(err) => Some(err),
        }
    }

    /// Convert into a tool result for the agent host
    pub fn into_tool_result(self) -> ToolResult {
        match self {
            Self::Success { text, .. } => ToolResult::success(Value::String(text)),
            Self::Failure(err) => ToolResult::error(err.to_string()),
        }
    }
}

impl std::fmt::Display for DispatchOutcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Success { text, .. } => write!(f, "{}", text),
            Self::Failure(err) => write!(f, "Error: {}", err),
        }
    }
}

/// Dispatcher over a remote collaborator
///
/// Cheap to clone; all state is immutable and shared.
#[derive(Clone)]
pub struct Dispatcher {
    remote: Arc<dyn RemoteClient>,
    catalog: Arc<OperationCatalog>,
    policy: PolicyEngine,
    config: Arc<GateConfig>,
    annotator: Arc<CodeAnnotator>,
}

impl Dispatcher {
    /// Create a dispatcher for a catalog
    pub fn new(remote: Arc<dyn RemoteClient>, catalog: OperationCatalog, config: GateConfig) -> Self {
        Self {
            remote,
            policy: PolicyEngine::for_catalog(&catalog),
            catalog: Arc::new(catalog),
            config: Arc::new(config),
            annotator: Arc::new(CodeAnnotator::new()),
        }
    }

    /// Create a dispatcher for the built-in school operations
    pub fn builtin(remote: Arc<dyn RemoteClient>, config: GateConfig) -> Self {
        Self::new(remote, OperationCatalog::builtin(), config)
    }

    pub fn config(&self) -> &GateConfig {
        &self.config
    }

    pub fn policy(&self) -> &PolicyEngine {
        &self.policy
    }

    pub fn catalog(&self) -> &OperationCatalog {
        &self.catalog
    }

    /// Operations allowed under the current configuration
    ///
    /// Uses the same check as step 1 of [`Dispatcher::dispatch`], so anything
    /// listed here is never denied at call time and vice versa.
    pub fn advertised_operations(&self) -> Vec<&OperationSpec> {
        self.policy.advertised(&self.catalog, &self.config)
    }

    /// Dispatch one operation
    pub async fn dispatch(&self, name: &str, params: Value) -> DispatchOutcome {
        let mut params = match params {
            Value::Null => Value::Object(Default::default()),
            other => other,
        };

        // 1. Allowance
        if let PolicyDecision::Deny { reason } = self.policy.evaluate(name, &self.config) {
            warn!(operation = %name, tier = %self.policy.tier_of(name), "Operation denied by policy");
            return DispatchOutcome::Failure(DispatchError::PolicyDenied {
                operation: name.to_string(),
                reason,
            });
        }

        // 2. Identifier normalization
        let identity_param = self
            .catalog
            .get(name)
            .and_then(|op| op.identity_param.as_deref());
        if let Some((original, normalized)) = normalize_params(&mut params, identity_param) {
            debug!(operation = %name, original = %original, normalized = %normalized, "Normalized identifier");
        }

        // 3. Confirmation
        let check = check_confirmation(&self.policy, name, &params, &self.config);
        if !check.ok {
            info!(operation = %name, "Confirmation required");
            return DispatchOutcome::Failure(DispatchError::ConfirmationMissing {
                operation: name.to_string(),
                message: check.message.unwrap_or_default(),
            });
        }

        if let Some(map) = params.as_object_mut() {
            map.remove(CONFIRMATION_FIELD);
        }

        // 4. Remote invocation
        debug!(operation = %name, "Invoking remote operation");
        match self.invoke(name, params).await {
            Ok(payload) => {
                debug!(operation = %name, "Remote operation succeeded");
                let text = self.shape(name, &payload);
                DispatchOutcome::Success {
                    operation: name.to_string(),
                    text,
                    payload,
                }
            }
            Err(err) => {
                warn!(operation = %name, error = %err, kind = err.kind(), "Remote operation failed");
                DispatchOutcome::Failure(err)
            }
        }
    }

    /// Call the remote, containing every failure
    async fn invoke(&self, name: &str, params: Value) -> Result<Value, DispatchError> {
        let call = self.remote.call(name, params);

        let result: Result<Value, EdugateError> = match self.config.remote_timeout() {
            Some(limit) => match tokio::time::timeout(limit, call).await {
                Ok(result) => result,
                Err(_) => {
                    return Err(DispatchError::Timeout {
                        operation: name.to_string(),
                        timeout_secs: limit.as_secs(),
                    })
                }
            },
            None => call.await,
        };

        result.map_err(|err| DispatchError::RemoteFailure {
            operation: name.to_string(),
            message: match err {
                EdugateError::Remote(message) => message,
                other => other.to_string(),
            },
        })
    }

    /// Render a payload as text for the caller
    fn shape(&self, name: &str, payload: &Value) -> String {
        match payload {
            Value::Bool(true) => format!("Operation '{}' completed successfully.", name),
            Value::Object(_) | Value::Array(_) => {
                let rendered = serde_json::to_string_pretty(payload).unwrap_or_else(|_| payload.to_string());
                self.annotator.annotate(rendered)
            }
            Value::String(text) => text.clone(),
            other => other.to_string(),
        }
    }
}

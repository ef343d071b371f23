//! Operation Catalog - statically declared remote operations
//!
//! Every remote operation the agent may call is declared here once, with its
//! risk tier, optional specific warning, the argument that identifies a person
//! (if any) and the JSON schema of its arguments. Nothing is discovered at
//! runtime.

use edugate_core::{EdugateError, EdugateResult, RiskTier, CONFIRMATION_FIELD};
use serde::Serialize;
use serde_json::Value;
use std::collections::HashMap;

use crate::registry::ToolCategory;

/// Declaration of a single remote operation
#[derive(Debug, Clone, Serialize)]
pub struct OperationSpec {
    /// Remote operation name, also used as the tool name
    pub name: String,
    /// Base description shown to the agent
    pub description: String,
    /// Risk tier
    pub tier: RiskTier,
    /// Operation-specific warning, appended to the tier warning
    pub warning: Option<String>,
    /// Argument holding a person identifier (`first.last`)
    pub identity_param: Option<String>,
    /// JSON schema of the arguments
    pub parameters: Value,
    /// Grouping used by the registry
    #[serde(skip)]
    pub category: ToolCategory,
}

impl OperationSpec {
    pub fn new(
        name: &str,
        description: &str,
        tier: RiskTier,
        category: ToolCategory,
        parameters: Value,
    ) -> Self {
        Self {
            name: name.to_string(),
            description: description.to_string(),
            tier,
            warning: None,
            identity_param: None,
            parameters,
            category,
        }
    }

    pub fn with_warning(mut self, warning: &str) -> Self {
        self.warning = Some(warning.to_string());
        self
    }

    pub fn with_identity_param(mut self, param: &str) -> Self {
        self.identity_param = Some(param.to_string());
        self
    }
}

/// Immutable set of operations, indexed by name
#[derive(Debug, Clone, Default)]
pub struct OperationCatalog {
    operations: Vec<OperationSpec>,
    index: HashMap<String, usize>,
}

impl OperationCatalog {
    /// Catalog of the built-in school-management operations
    pub fn builtin() -> Self {
        let operations = crate::tools::school::SchoolOperations::all();
        let index = operations
            .iter()
            .enumerate()
            .map(|(i, op)| (op.name.clone(), i))
            .collect();
        Self { operations, index }
    }

    /// Build a catalog from custom declarations
    ///
    /// Rejects duplicate names and schemas that declare the reserved
    /// confirmation argument.
    pub fn from_operations(operations: Vec<OperationSpec>) -> EdugateResult<Self> {
        let mut index = HashMap::with_capacity(operations.len());
        for (i, op) in operations.iter().enumerate() {
            if op
                .parameters
                .get("properties")
                .and_then(|p| p.get(CONFIRMATION_FIELD))
                .is_some()
            {
                return Err(EdugateError::validation(format!(
                    "Operation '{}' declares reserved argument '{}'",
                    op.name, CONFIRMATION_FIELD
                )));
            }
            if index.insert(op.name.clone(), i).is_some() {
                return Err(EdugateError::validation(format!(
                    "Duplicate operation name: {}",
                    op.name
                )));
            }
        }
        Ok(Self { operations, index })
    }

    pub fn get(&self, name: &str) -> Option<&OperationSpec> {
        self.index.get(name).map(|&i| &self.operations[i])
    }

    pub fn iter(&self) -> impl Iterator<Item = &OperationSpec> {
        self.operations.iter()
    }

    pub fn names(&self) -> Vec<&str> {
        self.operations.iter().map(|op| op.name.as_str()).collect()
    }

    pub fn len(&self) -> usize {
        self.operations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.operations.is_empty()
    }
}

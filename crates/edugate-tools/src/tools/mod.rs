//! Operation declarations
//!
//! Each domain of the school-management API is declared in its own module.

pub mod school;

/// Common utilities for operation declarations
pub mod common {
    /// Create a standard JSON schema for a tool with required and optional parameters
    pub fn create_schema(
        properties: serde_json::Value,
        required: Vec<&str>,
    ) -> serde_json::Value {
        serde_json::json!({
            "type": "object",
            "properties": properties,
            "required": required
        })
    }

    /// Schema property for a person identifier
    pub fn username_property() -> serde_json::Value {
        serde_json::json!({
            "type": "string",
            "description": "Account name in 'first.last' form. A plain 'First Last' name is converted automatically."
        })
    }

    #[cfg(test)]
    mod tests {
        use super::*;

        #[test]
        fn test_create_schema() {
            let schema = create_schema(serde_json::json!({"a": {"type": "string"}}), vec!["a"]);
            assert_eq!(schema["type"], "object");
            assert_eq!(schema["required"][0], "a");
        }
    }
}

//! Tool definition types for model tool use

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Describes a tool the model can call: name, description, and a JSON
/// Schema for its input parameters.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolDefinition {
    /// Tool name (must match the tool registered with the executor)
    pub name: String,

    /// Description of what the tool does
    pub description: String,

    /// JSON schema for the tool's input parameters
    pub input_schema: Value,
}

impl ToolDefinition {
    /// Create a new tool definition
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        input_schema: Value,
    ) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            input_schema,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_tool_definition_creation() {
        let schema = json!({
            "type": "object",
            "properties": {"symbol": {"type": "string"}},
            "required": ["symbol"],
        });

        let tool = ToolDefinition::new("get_stock_price", "Get the current price", schema.clone());
        assert_eq!(tool.name, "get_stock_price");
        assert_eq!(tool.input_schema, schema);
    }
}

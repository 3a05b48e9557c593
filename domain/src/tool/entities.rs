//! Tool domain entities

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Definition of a tool offered to the model for function calling
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToolDefinition {
    /// Unique name of the tool (e.g., "web_search")
    pub name: String,
    /// Human-readable description
    pub description: String,
    /// Parameter specifications
    pub parameters: Vec<ToolParameter>,
}

/// Parameter specification for a tool
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToolParameter {
    pub name: String,
    pub description: String,
    pub required: bool,
    /// Parameter type hint ("string", "integer", "number", "boolean")
    pub param_type: String,
}

impl ToolDefinition {
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            parameters: Vec::new(),
        }
    }

    pub fn with_parameter(mut self, param: ToolParameter) -> Self {
        self.parameters.push(param);
        self
    }

    /// Function declaration in JSON Schema form:
    /// `{name, description, parameters: {type: object, properties, required}}`.
    pub fn to_json_schema(&self) -> serde_json::Value {
        let mut properties = serde_json::Map::new();
        let mut required = Vec::new();

        for param in &self.parameters {
            let schema_type = match param.param_type.as_str() {
                "number" => "number",
                "integer" => "integer",
                "boolean" => "boolean",
                _ => "string",
            };
            properties.insert(
                param.name.clone(),
                serde_json::json!({
                    "type": schema_type,
                    "description": param.description,
                }),
            );
            if param.required {
                required.push(serde_json::json!(param.name));
            }
        }

        serde_json::json!({
            "name": self.name,
            "description": self.description,
            "parameters": {
                "type": "object",
                "properties": properties,
                "required": required,
            }
        })
    }
}

impl ToolParameter {
    pub fn new(name: impl Into<String>, description: impl Into<String>, required: bool) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            required,
            param_type: "string".to_string(),
        }
    }

    pub fn with_type(mut self, param_type: impl Into<String>) -> Self {
        self.param_type = param_type.into();
        self
    }
}

/// A call to a tool chosen by the model
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolCall {
    /// Name of the tool to call
    pub tool_name: String,
    /// Arguments passed to the tool
    pub arguments: BTreeMap<String, serde_json::Value>,
}

impl ToolCall {
    pub fn new(tool_name: impl Into<String>) -> Self {
        Self {
            tool_name: tool_name.into(),
            arguments: BTreeMap::new(),
        }
    }

    pub fn with_arg(mut self, key: impl Into<String>, value: impl Into<serde_json::Value>) -> Self {
        self.arguments.insert(key.into(), value.into());
        self
    }

    /// Get a string argument
    pub fn get_string(&self, key: &str) -> Option<&str> {
        self.arguments.get(key).and_then(|v| v.as_str())
    }

    /// Get a required string argument or return an error message
    pub fn require_string(&self, key: &str) -> Result<&str, String> {
        self.get_string(key)
            .ok_or_else(|| format!("Missing required argument: {}", key))
    }

    /// Renders as `name(key="value", ...)`, used as action input text.
    pub fn to_input_string(&self) -> String {
        let args = self
            .arguments
            .iter()
            .map(|(key, value)| match value.as_str() {
                Some(s) => format!("{}={:?}", key, s),
                None => format!("{}={}", key, value),
            })
            .collect::<Vec<_>>()
            .join(", ");
        format!("{}({})", self.tool_name, args)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_to_json_schema() {
        let tool = ToolDefinition::new("web_search", "Search the web")
            .with_parameter(ToolParameter::new("query", "Search query", true))
            .with_parameter(
                ToolParameter::new("limit", "Max results", false).with_type("integer"),
            );

        let schema = tool.to_json_schema();
        assert_eq!(schema["name"], "web_search");
        assert_eq!(schema["parameters"]["type"], "object");
        assert_eq!(schema["parameters"]["properties"]["query"]["type"], "string");
        assert_eq!(schema["parameters"]["properties"]["limit"]["type"], "integer");
        assert_eq!(schema["parameters"]["required"], serde_json::json!(["query"]));
    }

    #[test]
    fn test_require_string() {
        let call = ToolCall::new("web_search").with_arg("query", "heat pumps");
        assert_eq!(call.require_string("query").unwrap(), "heat pumps");
        assert_eq!(
            call.require_string("missing").unwrap_err(),
            "Missing required argument: missing"
        );
    }

    #[test]
    fn test_to_input_string() {
        let call = ToolCall::new("document_search")
            .with_arg("query", "retention \"policy\"")
            .with_arg("top_k", 3);
        assert_eq!(
            call.to_input_string(),
            r#"document_search(query="retention \"policy\"", top_k=3)"#
        );
    }
}

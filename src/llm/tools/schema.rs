//! Tool schema compilation
//!
//! Schemas are built explicitly at registration time from a declared
//! parameter list rather than derived from the function itself, so the
//! advertised contract is visible and checkable at the registration site.

use serde_json::json;

use crate::llm::core::types::ToolSchema;

/// JSON-schema primitive type of a tool parameter
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParamType {
    /// Floating point numbers
    Number,
    /// Whole numbers
    Integer,
    /// Strings
    String,
    /// Booleans
    Boolean,
}

impl ParamType {
    /// The JSON-schema type keyword
    pub fn as_str(&self) -> &'static str {
        match self {
            ParamType::Number => "number",
            ParamType::Integer => "integer",
            ParamType::String => "string",
            ParamType::Boolean => "boolean",
        }
    }
}

/// Builder producing a strict [`ToolSchema`]
///
/// Every declared parameter lands in `required` and carries no `default`
/// entry: the responses API rejects schemas with defaults or optional
/// parameters, so optionality is deliberately not expressible here.
#[derive(Debug, Clone)]
pub struct ToolSchemaBuilder {
    name: String,
    description: String,
    params: Vec<(String, ParamType)>,
}

impl ToolSchema {
    /// Start building a schema for the tool with the given name
    pub fn builder(name: impl Into<String>) -> ToolSchemaBuilder {
        ToolSchemaBuilder {
            name: name.into(),
            description: String::new(),
            params: Vec::new(),
        }
    }
}

impl ToolSchemaBuilder {
    /// Set the tool description surfaced verbatim to the model
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Declare a parameter; declaration order is preserved in `required`
    pub fn param(mut self, name: impl Into<String>, param_type: ParamType) -> Self {
        self.params.push((name.into(), param_type));
        self
    }

    /// Compile the schema
    ///
    /// Deterministic: building twice from the same declarations yields
    /// identical schemas.
    pub fn build(self) -> ToolSchema {
        let mut properties = serde_json::Map::new();
        for (name, param_type) in &self.params {
            properties.insert(name.clone(), json!({ "type": param_type.as_str() }));
        }

        let required: Vec<&str> = self.params.iter().map(|(name, _)| name.as_str()).collect();

        ToolSchema {
            name: self.name,
            description: self.description.trim().to_string(),
            parameters: json!({
                "type": "object",
                "properties": properties,
                "required": required,
                "additionalProperties": false,
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_schema() -> ToolSchema {
        ToolSchema::builder("forecast_revenue")
            .description("Forecast revenue over a number of months.")
            .param("months", ParamType::Integer)
            .param("monthly_growth_rate", ParamType::Number)
            .param("region", ParamType::String)
            .param("include_churn", ParamType::Boolean)
            .build()
    }

    #[test]
    fn test_all_params_required() {
        let schema = sample_schema();
        let required = schema.parameters["required"].as_array().unwrap();
        assert_eq!(required.len(), 4);
        assert_eq!(schema.parameters["additionalProperties"], false);
    }

    #[test]
    fn test_required_preserves_declaration_order() {
        let schema = sample_schema();
        let required: Vec<&str> = schema.parameters["required"]
            .as_array()
            .unwrap()
            .iter()
            .map(|v| v.as_str().unwrap())
            .collect();
        assert_eq!(
            required,
            vec!["months", "monthly_growth_rate", "region", "include_churn"]
        );
    }

    #[test]
    fn test_primitive_type_mapping() {
        let schema = sample_schema();
        let properties = &schema.parameters["properties"];
        assert_eq!(properties["months"]["type"], "integer");
        assert_eq!(properties["monthly_growth_rate"]["type"], "number");
        assert_eq!(properties["region"]["type"], "string");
        assert_eq!(properties["include_churn"]["type"], "boolean");
    }

    #[test]
    fn test_no_default_entries() {
        let schema = sample_schema();
        for (_, property) in schema.parameters["properties"].as_object().unwrap() {
            assert!(property.get("default").is_none());
        }
    }

    #[test]
    fn test_description_is_trimmed() {
        let schema = ToolSchema::builder("t")
            .description("  Reads the model defaults.\n  ")
            .build();
        assert_eq!(schema.description, "Reads the model defaults.");
    }

    #[test]
    fn test_missing_description_is_empty() {
        let schema = ToolSchema::builder("t").build();
        assert_eq!(schema.description, "");
    }

    #[test]
    fn test_no_params_still_strict() {
        let schema = ToolSchema::builder("get_model_defaults").build();
        assert_eq!(schema.parameters["type"], "object");
        assert_eq!(schema.parameters["required"].as_array().unwrap().len(), 0);
        assert_eq!(schema.parameters["additionalProperties"], false);
        assert!(schema.parameters["properties"].as_object().unwrap().is_empty());
    }

    #[test]
    fn test_compilation_is_idempotent() {
        let first = serde_json::to_string(&sample_schema()).unwrap();
        let second = serde_json::to_string(&sample_schema()).unwrap();
        assert_eq!(first, second);
    }
}

//! Responses-API request and response types
//!
//! These types map directly to the responses API wire schema.

use serde::{Deserialize, Serialize};

use crate::llm::core::types::{Message, ToolSchema};

/// Request body for a responses API call
#[derive(Debug, Clone, Serialize)]
pub struct ResponsesRequest<'a> {
    /// Model identifier
    pub model: &'a str,
    /// Ordered conversation history
    pub input: &'a [Message],
    /// Available tools for the model to call; omitted when none registered
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tools: Option<Vec<FunctionTool>>,
}

/// Wire discriminator for function tools (always `"function"`)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FunctionToolType {
    #[default]
    Function,
}

/// A function tool entry in the request `tools` array
///
/// The responses API demands strict schemas, so `strict` is always true.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FunctionTool {
    #[serde(rename = "type")]
    pub kind: FunctionToolType,
    pub name: String,
    pub description: String,
    pub parameters: serde_json::Value,
    pub strict: bool,
}

impl From<&ToolSchema> for FunctionTool {
    fn from(schema: &ToolSchema) -> Self {
        FunctionTool {
            kind: FunctionToolType::Function,
            name: schema.name.clone(),
            description: schema.description.clone(),
            parameters: schema.parameters.clone(),
            strict: true,
        }
    }
}

/// Parsed response from the responses API
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelResponse {
    /// Ordered output items
    #[serde(default)]
    pub output: Vec<OutputItem>,
}

/// One item in the response `output` array
///
/// Item types this backend does not understand deserialize into `Other`
/// so the orchestrator can log and skip them instead of failing the whole
/// response parse.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum OutputItem {
    Item(ResponseItem),
    Other(serde_json::Value),
}

/// Output item kinds the orchestrator understands
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ResponseItem {
    /// Model invoking a tool
    FunctionCall {
        name: String,
        /// JSON-encoded arguments string
        arguments: String,
        call_id: String,
    },
    /// Model text output
    Message {
        role: String,
        content: Vec<OutputContent>,
    },
}

/// One content segment of a message output item
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum OutputContent {
    Segment(OutputSegment),
    Other(serde_json::Value),
}

/// Content segment kinds the orchestrator understands
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum OutputSegment {
    OutputText { text: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_function_tool_from_schema() {
        let schema = ToolSchema {
            name: "make_calculation".to_string(),
            description: "Adds two numbers".to_string(),
            parameters: serde_json::json!({
                "type": "object",
                "properties": {"x": {"type": "number"}, "y": {"type": "number"}},
                "required": ["x", "y"],
                "additionalProperties": false,
            }),
        };

        let tool = FunctionTool::from(&schema);
        let json = serde_json::to_value(&tool).unwrap();
        assert_eq!(json["type"], "function");
        assert_eq!(json["name"], "make_calculation");
        assert_eq!(json["strict"], true);
        assert_eq!(json["parameters"]["additionalProperties"], false);
    }

    #[test]
    fn test_request_omits_empty_tools() {
        let input = vec![Message::user("hello")];
        let request = ResponsesRequest {
            model: "gpt-4o",
            input: &input,
            tools: None,
        };
        let json = serde_json::to_value(&request).unwrap();
        assert!(json.get("tools").is_none());
        assert_eq!(json["model"], "gpt-4o");
        assert_eq!(json["input"][0]["content"], "hello");
    }

    #[test]
    fn test_deserialize_function_call_output() {
        let body = r#"{
            "id": "resp_123",
            "output": [
                {"type": "function_call", "id": "fc_1", "status": "completed",
                 "name": "make_calculation", "arguments": "{\"x\":2,\"y\":3}", "call_id": "123"}
            ]
        }"#;

        let response: ModelResponse = serde_json::from_str(body).unwrap();
        assert_eq!(response.output.len(), 1);
        match &response.output[0] {
            OutputItem::Item(ResponseItem::FunctionCall {
                name,
                arguments,
                call_id,
            }) => {
                assert_eq!(name, "make_calculation");
                assert_eq!(arguments, r#"{"x":2,"y":3}"#);
                assert_eq!(call_id, "123");
            }
            other => panic!("Expected function call, got {:?}", other),
        }
    }

    #[test]
    fn test_deserialize_message_output() {
        let body = r#"{
            "output": [
                {"type": "message", "role": "assistant",
                 "content": [{"type": "output_text", "text": "Hello, world!", "annotations": []}]}
            ]
        }"#;

        let response: ModelResponse = serde_json::from_str(body).unwrap();
        match &response.output[0] {
            OutputItem::Item(ResponseItem::Message { role, content }) => {
                assert_eq!(role, "assistant");
                match &content[0] {
                    OutputContent::Segment(OutputSegment::OutputText { text }) => {
                        assert_eq!(text, "Hello, world!");
                    }
                    other => panic!("Expected output_text, got {:?}", other),
                }
            }
            other => panic!("Expected message, got {:?}", other),
        }
    }

    #[test]
    fn test_deserialize_unknown_item_survives() {
        let body = r#"{
            "output": [
                {"type": "reasoning", "id": "rs_1", "summary": []},
                {"type": "message", "role": "assistant",
                 "content": [{"type": "output_text", "text": "ok"}]}
            ]
        }"#;

        let response: ModelResponse = serde_json::from_str(body).unwrap();
        assert_eq!(response.output.len(), 2);
        match &response.output[0] {
            OutputItem::Other(value) => assert_eq!(value["type"], "reasoning"),
            other => panic!("Expected unknown item, got {:?}", other),
        }
    }

    #[test]
    fn test_deserialize_unknown_segment_survives() {
        let body = r#"{
            "output": [
                {"type": "message", "role": "assistant",
                 "content": [{"type": "refusal", "refusal": "no"}]}
            ]
        }"#;

        let response: ModelResponse = serde_json::from_str(body).unwrap();
        match &response.output[0] {
            OutputItem::Item(ResponseItem::Message { content, .. }) => {
                assert!(matches!(content[0], OutputContent::Other(_)));
            }
            other => panic!("Expected message, got {:?}", other),
        }
    }

    #[test]
    fn test_deserialize_missing_output_defaults_empty() {
        let response: ModelResponse = serde_json::from_str(r#"{"id":"resp_1"}"#).unwrap();
        assert!(response.output.is_empty());
    }
}

//! Wire types for the Ollama chat API.
//!
//! One request shape covers all three gateway modes: free text, structured
//! output (`format` carries a JSON schema object), and tool calling
//! (`tools` carries the registry specs, the response may name one call).

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::types::ToolSpec;

/// Chat request body for POST /api/chat
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatRequest {
    pub model: String,
    pub messages: Vec<ChatMessage>,
    #[serde(default)]
    pub stream: bool,
    /// JSON schema object constraining the output
    #[serde(skip_serializing_if = "Option::is_none")]
    pub format: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tools: Option<Vec<ChatTool>>,
}

/// A single chat message
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: String,
    pub content: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tool_calls: Vec<ChatToolCall>,
}

impl ChatMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: "system".to_string(),
            content: content.into(),
            tool_calls: vec![],
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: "user".to_string(),
            content: content.into(),
            tool_calls: vec![],
        }
    }
}

/// Tool declaration sent with the request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatTool {
    /// Always "function"
    pub r#type: String,
    pub function: ChatFunction,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatFunction {
    pub name: String,
    pub description: String,
    pub parameters: Value,
}

impl From<&ToolSpec> for ChatTool {
    fn from(spec: &ToolSpec) -> Self {
        Self {
            r#type: "function".to_string(),
            function: ChatFunction {
                name: spec.name.clone(),
                description: spec.description.clone(),
                parameters: spec.parameters.clone(),
            },
        }
    }
}

/// Tool call selected by the model
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatToolCall {
    pub function: ChatFunctionCall,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatFunctionCall {
    pub name: String,
    #[serde(default)]
    pub arguments: Value,
}

/// Chat response body
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatResponse {
    pub model: String,
    pub message: ChatMessage,
    pub done: bool,
    #[serde(default)]
    pub total_duration: Option<u64>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_request_skips_absent_fields() {
        let request = ChatRequest {
            model: "qwen3:8b".to_string(),
            messages: vec![ChatMessage::system("sys"), ChatMessage::user("hello")],
            stream: false,
            format: None,
            tools: None,
        };
        let body = serde_json::to_value(&request).unwrap();
        assert!(body.get("format").is_none());
        assert!(body.get("tools").is_none());
        assert_eq!(body["messages"][1]["content"], "hello");
    }

    #[test]
    fn test_format_accepts_schema_object() {
        let request = ChatRequest {
            model: "qwen3:8b".to_string(),
            messages: vec![ChatMessage::user("plan this")],
            stream: false,
            format: Some(json!({
                "type": "object",
                "properties": {"tasks": {"type": "array", "items": {"type": "string"}}},
                "required": ["tasks"]
            })),
            tools: None,
        };
        let body = serde_json::to_value(&request).unwrap();
        assert_eq!(body["format"]["type"], "object");
    }

    #[test]
    fn test_response_parses_tool_call() {
        let raw = json!({
            "model": "qwen3:8b",
            "message": {
                "role": "assistant",
                "content": "",
                "tool_calls": [
                    {"function": {"name": "read_text_file", "arguments": {"file_path": "/tmp/a"}}}
                ]
            },
            "done": true
        });
        let response: ChatResponse = serde_json::from_value(raw).unwrap();
        assert_eq!(response.message.tool_calls.len(), 1);
        assert_eq!(response.message.tool_calls[0].function.name, "read_text_file");
    }

    #[test]
    fn test_response_parses_without_tool_calls() {
        let raw = json!({
            "model": "qwen3:8b",
            "message": {"role": "assistant", "content": "done"},
            "done": true
        });
        let response: ChatResponse = serde_json::from_value(raw).unwrap();
        assert!(response.message.tool_calls.is_empty());
    }

    #[test]
    fn test_chat_tool_from_spec() {
        let spec = ToolSpec {
            name: "analyze_forensic_image".to_string(),
            description: "Analyze a forensic image".to_string(),
            parameters: json!({"type": "object", "properties": {"file_path": {"type": "string"}}}),
        };
        let tool = ChatTool::from(&spec);
        assert_eq!(tool.r#type, "function");
        assert_eq!(tool.function.name, "analyze_forensic_image");
    }
}

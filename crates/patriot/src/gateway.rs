//! Model gateway over the Ollama chat API.
//!
//! One call shape covers three modes: free text, structured output (a JSON
//! schema passed through the request's format field), and tool calling
//! (registry specs bound, the model may select at most one call).
//! Exactly one of schema/tools may be supplied.
//!
//! Transport failures retry under the configured policy; everything else
//! propagates on first sight. The gateway keeps no state between calls.

use std::collections::VecDeque;
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;
use serde_json::Value;
use tracing::{debug, info};

use patriot_common::config::LlmConfig;
use patriot_common::error::GatewayError;
use patriot_common::retry::{with_retry, RetryPolicy};
use patriot_common::schemas::{ChatMessage, ChatRequest, ChatResponse, ChatTool};
use patriot_common::types::ToolSpec;
use patriot_common::DEFAULT_SYSTEM_PROMPT;

/// One generation request
#[derive(Debug, Clone)]
pub struct GenerateRequest {
    pub prompt: String,
    pub system_prompt: Option<String>,
    pub output_schema: Option<Value>,
    pub tool_specs: Option<Vec<ToolSpec>>,
}

impl GenerateRequest {
    /// Free-form text completion
    pub fn text(prompt: impl Into<String>) -> Self {
        Self {
            prompt: prompt.into(),
            system_prompt: None,
            output_schema: None,
            tool_specs: None,
        }
    }

    /// Output constrained to the given JSON schema
    pub fn structured(prompt: impl Into<String>, schema: Value) -> Self {
        Self {
            output_schema: Some(schema),
            ..Self::text(prompt)
        }
    }

    /// Tool selection over the given specs
    pub fn tool_choice(prompt: impl Into<String>, specs: Vec<ToolSpec>) -> Self {
        Self {
            tool_specs: Some(specs),
            ..Self::text(prompt)
        }
    }

    pub fn with_system(mut self, system_prompt: impl Into<String>) -> Self {
        self.system_prompt = Some(system_prompt.into());
        self
    }

    /// Schema and tools are mutually exclusive
    fn check_contract(&self) -> Result<(), GatewayError> {
        if self.output_schema.is_some() && self.tool_specs.is_some() {
            return Err(GatewayError::Contract(
                "output_schema and tool_specs are mutually exclusive".to_string(),
            ));
        }
        Ok(())
    }
}

/// The model's reply: content text plus at most one selected tool call
#[derive(Debug, Clone)]
pub struct GenerateResponse {
    pub content: String,
    pub tool_call: Option<ProposedToolCall>,
}

impl GenerateResponse {
    pub fn text(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            tool_call: None,
        }
    }
}

/// A tool call the model proposed, before argument validation
#[derive(Debug, Clone)]
pub struct ProposedToolCall {
    pub name: String,
    pub arguments: Value,
}

/// Backend seam. Production uses `OllamaGateway`; tests script a
/// `FakeModelBackend`.
#[async_trait]
pub trait ModelBackend: Send + Sync {
    async fn generate(&self, request: GenerateRequest) -> Result<GenerateResponse, GatewayError>;
}

/// HTTP gateway to an Ollama-compatible chat endpoint
pub struct OllamaGateway {
    http_client: reqwest::Client,
    endpoint: String,
    model: String,
    retry: RetryPolicy,
}

impl OllamaGateway {
    pub fn new(config: &LlmConfig) -> Self {
        Self {
            http_client: reqwest::Client::builder()
                .timeout(Duration::from_secs(config.request_timeout_secs))
                .build()
                .unwrap_or_default(),
            endpoint: config.endpoint.trim_end_matches('/').to_string(),
            model: config.model.clone(),
            retry: config.retry_policy(),
        }
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    async fn call_chat(&self, request: &GenerateRequest) -> Result<GenerateResponse, GatewayError> {
        let url = format!("{}/api/chat", self.endpoint);

        let system = request
            .system_prompt
            .clone()
            .unwrap_or_else(|| DEFAULT_SYSTEM_PROMPT.to_string());

        let body = ChatRequest {
            model: self.model.clone(),
            messages: vec![ChatMessage::system(system), ChatMessage::user(&request.prompt)],
            stream: false,
            format: request.output_schema.clone(),
            tools: request
                .tool_specs
                .as_ref()
                .map(|specs| specs.iter().map(ChatTool::from).collect()),
        };

        debug!(
            "[>]  model call [{}]: prompt {} chars, schema={}, tools={}",
            self.model,
            request.prompt.len(),
            request.output_schema.is_some(),
            request.tool_specs.as_ref().map(|t| t.len()).unwrap_or(0)
        );

        let response = self
            .http_client
            .post(&url)
            .json(&body)
            .send()
            .await
            .map_err(classify_reqwest_error)?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await.unwrap_or_default();
            return Err(GatewayError::Backend(format!(
                "backend returned {}: {}",
                status, error_text
            )));
        }

        let chat: ChatResponse = response
            .json()
            .await
            .map_err(|e| GatewayError::Backend(format!("undecodable response body: {}", e)))?;

        let tool_call = chat
            .message
            .tool_calls
            .into_iter()
            .next()
            .map(|c| ProposedToolCall {
                name: c.function.name,
                arguments: c.function.arguments,
            });

        info!(
            "[<]  model response: {} chars, tool_call={}",
            chat.message.content.len(),
            tool_call.as_ref().map(|c| c.name.as_str()).unwrap_or("none")
        );

        Ok(GenerateResponse {
            content: chat.message.content,
            tool_call,
        })
    }
}

#[async_trait]
impl ModelBackend for OllamaGateway {
    async fn generate(&self, request: GenerateRequest) -> Result<GenerateResponse, GatewayError> {
        request.check_contract()?;
        with_retry(&self.retry, || self.call_chat(&request)).await
    }
}

/// Connect and timeout failures are transient; anything else is a
/// backend fault that retrying will not fix.
fn classify_reqwest_error(e: reqwest::Error) -> GatewayError {
    if e.is_connect() || e.is_timeout() {
        GatewayError::Transport(e.to_string())
    } else {
        GatewayError::Backend(e.to_string())
    }
}

/// Extract a JSON object from text that may have prose around it
pub fn extract_json(text: &str) -> &str {
    if let (Some(start), Some(end)) = (text.find('{'), text.rfind('}')) {
        if start <= end {
            return &text[start..=end];
        }
    }
    text
}

/// Scripted backend for deterministic tests. Responses are handed out in
/// order; every request is recorded for assertions.
pub struct FakeModelBackend {
    responses: Mutex<VecDeque<Result<GenerateResponse, GatewayError>>>,
    calls: Mutex<Vec<GenerateRequest>>,
}

impl FakeModelBackend {
    pub fn new() -> Self {
        Self {
            responses: Mutex::new(VecDeque::new()),
            calls: Mutex::new(Vec::new()),
        }
    }

    /// Queue a plain content response
    pub fn push_text(&self, content: impl Into<String>) {
        self.responses
            .lock()
            .unwrap()
            .push_back(Ok(GenerateResponse::text(content)));
    }

    /// Queue a response selecting the given tool call
    pub fn push_tool_call(&self, name: impl Into<String>, arguments: Value) {
        self.responses.lock().unwrap().push_back(Ok(GenerateResponse {
            content: String::new(),
            tool_call: Some(ProposedToolCall {
                name: name.into(),
                arguments,
            }),
        }));
    }

    /// Queue a failure
    pub fn push_error(&self, error: GatewayError) {
        self.responses.lock().unwrap().push_back(Err(error));
    }

    /// Requests seen so far
    pub fn calls(&self) -> Vec<GenerateRequest> {
        self.calls.lock().unwrap().clone()
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }
}

impl Default for FakeModelBackend {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ModelBackend for FakeModelBackend {
    async fn generate(&self, request: GenerateRequest) -> Result<GenerateResponse, GatewayError> {
        request.check_contract()?;
        self.calls.lock().unwrap().push(request);
        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Ok(GenerateResponse::text("")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_schema_and_tools_is_a_contract_error() {
        let mut request = GenerateRequest::structured("p", json!({"type": "object"}));
        request.tool_specs = Some(vec![]);
        let err = request.check_contract().unwrap_err();
        assert!(matches!(err, GatewayError::Contract(_)));
    }

    #[test]
    fn test_extract_json_strips_prose() {
        let text = "Sure, here is the plan:\n{\"tasks\": []}\nHope that helps.";
        assert_eq!(extract_json(text), "{\"tasks\": []}");
        assert_eq!(extract_json("no json here"), "no json here");
    }

    #[tokio::test]
    async fn test_fake_backend_hands_out_responses_in_order() {
        let fake = FakeModelBackend::new();
        fake.push_text("first");
        fake.push_tool_call("read_text_file", json!({"file_path": "/tmp/a"}));

        let r1 = fake.generate(GenerateRequest::text("one")).await.unwrap();
        assert_eq!(r1.content, "first");
        assert!(r1.tool_call.is_none());

        let r2 = fake.generate(GenerateRequest::text("two")).await.unwrap();
        let call = r2.tool_call.unwrap();
        assert_eq!(call.name, "read_text_file");

        assert_eq!(fake.call_count(), 2);
        assert_eq!(fake.calls()[0].prompt, "one");
    }

    #[tokio::test]
    async fn test_fake_backend_propagates_scripted_errors() {
        let fake = FakeModelBackend::new();
        fake.push_error(GatewayError::Transport("unreachable".into()));
        let err = fake.generate(GenerateRequest::text("x")).await.unwrap_err();
        assert!(err.is_transient());
    }
}

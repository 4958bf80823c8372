//! Validator: decide whether a task's accumulated evidence is enough.

use std::sync::Arc;

use serde::Deserialize;
use serde_json::json;
use tracing::info;

use patriot_common::error::GatewayError;
use patriot_common::prompts::generate_validation_prompt;
use patriot_common::types::{Task, ToolInvocation};
use patriot_common::VALIDATION_SYSTEM_PROMPT;

use crate::gateway::{extract_json, GenerateRequest, ModelBackend};

#[derive(Debug, Deserialize)]
struct ValidationResponse {
    done: bool,
}

pub struct Validator {
    backend: Arc<dyn ModelBackend>,
}

impl Validator {
    pub fn new(backend: Arc<dyn ModelBackend>) -> Self {
        Self { backend }
    }

    /// True when the task can be considered complete. An empty history
    /// means the task was outside tool scope; that is complete by
    /// definition and needs no model call.
    pub async fn validate(
        &self,
        task: &Task,
        history: &[ToolInvocation],
    ) -> Result<bool, GatewayError> {
        if history.is_empty() {
            info!("[V]  task {} done (no tools needed)", task.ordinal);
            return Ok(true);
        }

        let request = GenerateRequest::structured(
            generate_validation_prompt(task, history),
            json!({
                "type": "object",
                "properties": {"done": {"type": "boolean"}},
                "required": ["done"]
            }),
        )
        .with_system(VALIDATION_SYSTEM_PROMPT);

        let response = self.backend.generate(request).await?;
        let parsed: ValidationResponse = serde_json::from_str(extract_json(&response.content))
            .map_err(|e| {
                GatewayError::Backend(format!(
                    "malformed validation output: {} - text: {}",
                    e, response.content
                ))
            })?;

        info!("[V]  task {} done={}", task.ordinal, parsed.done);
        Ok(parsed.done)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::gateway::FakeModelBackend;

    fn history_with_output(output: &str) -> Vec<ToolInvocation> {
        vec![ToolInvocation::new(
            1,
            "run_shell_command",
            json!({"command": "ss -tlnp"}),
            output,
        )]
    }

    #[tokio::test]
    async fn test_empty_history_is_done_without_model_call() {
        let fake = Arc::new(FakeModelBackend::new());
        let validator = Validator::new(fake.clone());
        let task = Task::new(1, "General hardening advice.");

        assert!(validator.validate(&task, &[]).await.unwrap());
        assert_eq!(fake.call_count(), 0);
    }

    #[tokio::test]
    async fn test_done_verdict() {
        let fake = Arc::new(FakeModelBackend::new());
        fake.push_text(r#"{"done": true}"#);

        let validator = Validator::new(fake);
        let task = Task::new(1, "Check listening ports.");
        let done = validator
            .validate(&task, &history_with_output("LISTEN 0.0.0.0:22"))
            .await
            .unwrap();
        assert!(done);
    }

    #[tokio::test]
    async fn test_not_done_verdict() {
        let fake = Arc::new(FakeModelBackend::new());
        fake.push_text(r#"{"done": false}"#);

        let validator = Validator::new(fake);
        let task = Task::new(1, "Check listening ports.");
        let done = validator
            .validate(&task, &history_with_output(""))
            .await
            .unwrap();
        assert!(!done);
    }

    #[tokio::test]
    async fn test_malformed_verdict_is_fatal() {
        let fake = Arc::new(FakeModelBackend::new());
        fake.push_text("maybe?");

        let validator = Validator::new(fake);
        let task = Task::new(1, "Check listening ports.");
        let err = validator
            .validate(&task, &history_with_output("data"))
            .await
            .unwrap_err();
        assert!(matches!(err, GatewayError::Backend(_)));
    }
}

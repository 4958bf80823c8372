//! Answer synthesizer: one plain-text answer from everything collected.

use std::sync::Arc;

use tracing::info;

use patriot_common::error::GatewayError;
use patriot_common::prompts::{answer_system_prompt, current_date_string, generate_answer_prompt};
use patriot_common::types::TaskResult;
use patriot_common::GENERAL_KNOWLEDGE_NOTE;

use crate::gateway::{GenerateRequest, ModelBackend};

pub struct Synthesizer {
    backend: Arc<dyn ModelBackend>,
}

impl Synthesizer {
    pub fn new(backend: Arc<dyn ModelBackend>) -> Self {
        Self { backend }
    }

    /// Compose the final answer. When the planner produced no tasks at
    /// all, the query was outside the research scope and the fixed
    /// disclosure note is appended after the general-knowledge answer.
    pub async fn synthesize(
        &self,
        query: &str,
        results: &[TaskResult],
    ) -> Result<String, GatewayError> {
        let request = GenerateRequest::text(generate_answer_prompt(query, results))
            .with_system(answer_system_prompt(&current_date_string()));

        let response = self.backend.generate(request).await?;
        let mut answer = response.content.trim().to_string();

        if results.is_empty() {
            answer.push_str("\n\n");
            answer.push_str(GENERAL_KNOWLEDGE_NOTE);
        }

        info!("[=]  synthesized answer ({} chars)", answer.len());
        Ok(answer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gateway::FakeModelBackend;
    use patriot_common::types::{Task, ToolInvocation};
    use serde_json::json;

    #[tokio::test]
    async fn test_out_of_scope_answer_gets_the_note() {
        let fake = Arc::new(FakeModelBackend::new());
        fake.push_text("Paris is the capital of France.");

        let synthesizer = Synthesizer::new(fake);
        let answer = synthesizer
            .synthesize("what is the capital of France?", &[])
            .await
            .unwrap();
        assert!(answer.starts_with("Paris is the capital of France."));
        assert!(answer.ends_with(GENERAL_KNOWLEDGE_NOTE));
    }

    #[tokio::test]
    async fn test_in_scope_answer_without_note() {
        let fake = Arc::new(FakeModelBackend::new());
        fake.push_text("Disable the guest account first.");

        let results = vec![TaskResult {
            task: Task::new(1, "List the steps to harden a Windows 10 system image."),
            invocations: vec![],
            done: true,
            rounds_used: 1,
        }];
        let synthesizer = Synthesizer::new(fake);
        let answer = synthesizer
            .synthesize("harden windows 10", &results)
            .await
            .unwrap();
        assert_eq!(answer, "Disable the guest account first.");
        assert!(!answer.contains(GENERAL_KNOWLEDGE_NOTE));
    }

    #[tokio::test]
    async fn test_evidence_rendered_into_prompt() {
        let fake = Arc::new(FakeModelBackend::new());
        fake.push_text("Port 22 is open.");

        let results = vec![TaskResult {
            task: Task::new(1, "Check open ports."),
            invocations: vec![ToolInvocation::new(
                1,
                "run_shell_command",
                json!({"command": "ss -tlnp"}),
                "LISTEN 0.0.0.0:22",
            )],
            done: true,
            rounds_used: 2,
        }];
        let synthesizer = Synthesizer::new(fake.clone());
        synthesizer.synthesize("audit ports", &results).await.unwrap();

        let calls = fake.calls();
        assert!(calls[0].prompt.contains("LISTEN 0.0.0.0:22"));
        assert!(calls[0]
            .system_prompt
            .as_deref()
            .unwrap()
            .contains("Current date:"));
    }
}

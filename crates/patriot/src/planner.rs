//! Planner: decompose one query into an ordered task list.

use std::sync::Arc;

use serde::Deserialize;
use serde_json::json;
use tracing::info;

use patriot_common::error::GatewayError;
use patriot_common::prompts::{generate_plan_prompt, planning_system_prompt};
use patriot_common::types::{Task, ToolSpec};

use crate::gateway::{extract_json, GenerateRequest, ModelBackend};

/// Structured output of the planning pass
#[derive(Debug, Deserialize)]
struct PlanResponse {
    #[serde(default)]
    tasks: Vec<String>,
}

pub struct Planner {
    backend: Arc<dyn ModelBackend>,
    specs: Vec<ToolSpec>,
}

impl Planner {
    pub fn new(backend: Arc<dyn ModelBackend>, specs: Vec<ToolSpec>) -> Self {
        Self { backend, specs }
    }

    /// Plan the query. An empty list is the valid out-of-scope outcome,
    /// not an error; the orchestrator answers such queries directly.
    pub async fn plan(&self, query: &str) -> Result<Vec<Task>, GatewayError> {
        let request = GenerateRequest::structured(
            generate_plan_prompt(query),
            json!({
                "type": "object",
                "properties": {
                    "tasks": {"type": "array", "items": {"type": "string"}}
                },
                "required": ["tasks"]
            }),
        )
        .with_system(planning_system_prompt(&self.specs));

        let response = self.backend.generate(request).await?;
        let parsed: PlanResponse = serde_json::from_str(extract_json(&response.content))
            .map_err(|e| {
                GatewayError::Backend(format!(
                    "malformed plan output: {} - text: {}",
                    e, response.content
                ))
            })?;

        let tasks: Vec<Task> = parsed
            .tasks
            .into_iter()
            .map(|d| d.trim().to_string())
            .filter(|d| !d.is_empty())
            .enumerate()
            .map(|(i, description)| Task::new(i + 1, description))
            .collect();

        info!("[P]  planned {} task(s)", tasks.len());
        Ok(tasks)
    }
}

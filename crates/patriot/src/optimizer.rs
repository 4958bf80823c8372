//! Tool-argument optimizer: a secondary model pass that refines a
//! proposed call's arguments against the tool's schema and the task text
//! (filling in implied filters, resolving relative dates).
//!
//! Keys absent from the tool's schema are dropped. If the refined object
//! fails typed validation, the originally proposed arguments win.

use std::sync::Arc;

use serde::Deserialize;
use serde_json::{json, Map, Value};
use tracing::{debug, warn};

use patriot_common::error::GatewayError;
use patriot_common::prompts::{current_date_string, generate_tool_args_prompt, tool_args_system_prompt};
use patriot_common::types::{Task, ToolSpec};

use crate::gateway::{extract_json, GenerateRequest, ModelBackend};

#[derive(Debug, Deserialize)]
struct OptimizedArgs {
    arguments: Value,
}

pub struct Optimizer {
    backend: Arc<dyn ModelBackend>,
}

impl Optimizer {
    pub fn new(backend: Arc<dyn ModelBackend>) -> Self {
        Self { backend }
    }

    /// Produce the final argument object for a call. Falls back to
    /// `proposed` whenever the optimized output is unusable.
    pub async fn optimize(
        &self,
        spec: &ToolSpec,
        task: &Task,
        proposed: &Value,
    ) -> Result<Value, GatewayError> {
        let request = GenerateRequest::structured(
            generate_tool_args_prompt(spec, task, proposed),
            json!({
                "type": "object",
                "properties": {"arguments": {"type": "object"}},
                "required": ["arguments"]
            }),
        )
        .with_system(tool_args_system_prompt(&current_date_string()));

        let response = self.backend.generate(request).await?;

        let optimized = match serde_json::from_str::<OptimizedArgs>(extract_json(&response.content))
        {
            Ok(parsed) => parsed.arguments,
            Err(e) => {
                warn!(
                    "Optimizer output unusable for {} ({}), keeping proposed arguments",
                    spec.name, e
                );
                return Ok(proposed.clone());
            }
        };

        Ok(merge_schema_keys(spec, proposed, &optimized))
    }
}

/// Overlay schema-known keys from `optimized` onto `proposed`; anything
/// the schema does not declare is dropped.
fn merge_schema_keys(spec: &ToolSpec, proposed: &Value, optimized: &Value) -> Value {
    let Some(optimized_map) = optimized.as_object() else {
        return proposed.clone();
    };
    let allowed = spec.parameter_names();

    let mut merged: Map<String, Value> = proposed
        .as_object()
        .cloned()
        .unwrap_or_default()
        .into_iter()
        .filter(|(k, _)| allowed.contains(k))
        .collect();

    for (key, value) in optimized_map {
        if allowed.contains(key) {
            merged.insert(key.clone(), value.clone());
        } else {
            debug!("Dropping parameter '{}' not in {} schema", key, spec.name);
        }
    }

    Value::Object(merged)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gateway::FakeModelBackend;
    use crate::registry::ToolRegistry;

    fn vuln_spec() -> ToolSpec {
        ToolRegistry::default()
            .spec("analyze_system_vulnerabilities")
            .unwrap()
    }

    #[tokio::test]
    async fn test_fills_in_schema_parameters() {
        let fake = Arc::new(FakeModelBackend::new());
        fake.push_text(r#"{"arguments": {"operating_system": "windows10"}}"#);

        let optimizer = Optimizer::new(fake);
        let task = Task::new(1, "List the steps to harden a Windows 10 system image.");
        let final_args = optimizer
            .optimize(&vuln_spec(), &task, &json!({}))
            .await
            .unwrap();
        assert_eq!(final_args, json!({"operating_system": "windows10"}));
    }

    #[tokio::test]
    async fn test_drops_parameters_outside_schema() {
        let fake = Arc::new(FakeModelBackend::new());
        fake.push_text(
            r#"{"arguments": {"operating_system": "ubuntu22", "severity": "critical"}}"#,
        );

        let optimizer = Optimizer::new(fake);
        let task = Task::new(1, "Scan the Ubuntu 22 image.");
        let final_args = optimizer
            .optimize(&vuln_spec(), &task, &json!({"category": "services"}))
            .await
            .unwrap();
        assert_eq!(
            final_args,
            json!({"operating_system": "ubuntu22", "category": "services"})
        );
    }

    #[tokio::test]
    async fn test_unusable_output_falls_back_to_proposed() {
        let fake = Arc::new(FakeModelBackend::new());
        fake.push_text("I think the arguments are fine as they are.");

        let optimizer = Optimizer::new(fake);
        let task = Task::new(1, "Scan the image.");
        let proposed = json!({"operating_system": "windows10"});
        let final_args = optimizer
            .optimize(&vuln_spec(), &task, &proposed)
            .await
            .unwrap();
        assert_eq!(final_args, proposed);
    }

    #[tokio::test]
    async fn test_gateway_failure_propagates() {
        let fake = Arc::new(FakeModelBackend::new());
        fake.push_error(GatewayError::Backend("500".into()));

        let optimizer = Optimizer::new(fake);
        let task = Task::new(1, "Scan the image.");
        let result = optimizer.optimize(&vuln_spec(), &task, &json!({})).await;
        assert!(result.is_err());
    }
}

//! Executor: drive one task through tool-call rounds.
//!
//! Each round the model sees the task plus the full invocation history
//! and selects at most one tool. Rounds stop when the model declines to
//! call, when a proposed call duplicates one already in the history, or
//! when the round cap is hit. The cap is the only hard termination
//! guarantee the loop has; the model's own judgment is not one.

use std::sync::Arc;

use anyhow::Result;
use tracing::{info, warn};

use patriot_common::types::{Task, TaskResult, ToolInvocation};

use crate::gateway::{GenerateRequest, ModelBackend};
use crate::optimizer::Optimizer;
use crate::registry::{ToolCall, ToolRegistry};
use patriot_common::prompts::generate_action_prompt;
use patriot_common::ACTION_SYSTEM_PROMPT;

/// Mutable execution state for one task. The invocation history only
/// ever grows, and `rounds_used` counts every model decision round
/// across executor re-entries.
pub struct TaskExecution {
    pub task: Task,
    pub invocations: Vec<ToolInvocation>,
    pub rounds_used: usize,
}

impl TaskExecution {
    pub fn new(task: Task) -> Self {
        Self {
            task,
            invocations: Vec::new(),
            rounds_used: 0,
        }
    }

    /// Close out the execution with the validator's verdict
    pub fn into_result(self, done: bool) -> TaskResult {
        TaskResult {
            task: self.task,
            invocations: self.invocations,
            done,
            rounds_used: self.rounds_used,
        }
    }

    fn is_duplicate(&self, call: &ToolCall) -> bool {
        let arguments = call.arguments();
        self.invocations
            .iter()
            .any(|inv| inv.matches(call.name(), &arguments))
    }
}

pub struct Executor {
    backend: Arc<dyn ModelBackend>,
    registry: Arc<ToolRegistry>,
    optimizer: Optimizer,
    max_rounds: usize,
}

impl Executor {
    pub fn new(backend: Arc<dyn ModelBackend>, registry: Arc<ToolRegistry>, max_rounds: usize) -> Self {
        let optimizer = Optimizer::new(backend.clone());
        Self {
            backend,
            registry,
            optimizer,
            max_rounds,
        }
    }

    /// Run rounds until the model declines to call a tool or the round
    /// cap is exhausted. Unknown tools and schema-violating arguments
    /// from the action pass are fatal to the query; tool-domain failures
    /// land in the history as output text.
    pub async fn run(&self, exec: &mut TaskExecution) -> Result<()> {
        while exec.rounds_used < self.max_rounds {
            exec.rounds_used += 1;
            info!(
                "[E]  task {} round {}/{}",
                exec.task.ordinal, exec.rounds_used, self.max_rounds
            );

            let request = GenerateRequest::tool_choice(
                generate_action_prompt(&exec.task, &exec.invocations),
                self.registry.specs(),
            )
            .with_system(ACTION_SYSTEM_PROMPT);

            let response = self.backend.generate(request).await?;

            let Some(proposed) = response.tool_call else {
                info!("[E]  task {} no call needed", exec.task.ordinal);
                return Ok(());
            };

            // Validate the proposal, then let the optimizer refine the
            // arguments; a refinement that fails validation loses to the
            // original proposal.
            let proposed_call = ToolCall::parse(&proposed.name, &proposed.arguments)?;
            let spec = self
                .registry
                .spec(&proposed.name)
                .expect("parsed calls always have a spec");
            let optimized_args = self
                .optimizer
                .optimize(&spec, &exec.task, &proposed.arguments)
                .await?;
            let call = match ToolCall::parse(&proposed.name, &optimized_args) {
                Ok(call) => call,
                Err(e) => {
                    warn!("Optimized arguments rejected ({}), using proposed", e);
                    proposed_call
                }
            };

            if exec.is_duplicate(&call) {
                info!(
                    "[E]  task {} duplicate call to {} - treating as no call needed",
                    exec.task.ordinal,
                    call.name()
                );
                return Ok(());
            }

            let output = self.registry.invoke(&call).await;
            exec.invocations.push(ToolInvocation::new(
                exec.invocations.len() + 1,
                call.name(),
                call.arguments(),
                output,
            ));
        }

        warn!(
            "[E]  task {} hit the round cap ({})",
            exec.task.ordinal, self.max_rounds
        );
        Ok(())
    }
}

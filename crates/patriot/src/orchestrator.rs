//! Orchestrator: plan -> execute/validate per task -> synthesize.
//!
//! Owns the conversation-level state for exactly one query. Tasks run
//! strictly in plan order; a task re-enters the executor until the
//! validator accepts it or its round budget runs out. All dependencies
//! are injected at construction - the backend handle and registry are
//! stateless and shared, per-query state lives here.

use std::sync::Arc;

use anyhow::Result;
use tracing::{info, warn};
use uuid::Uuid;

use patriot_common::config::PatriotConfig;
use patriot_common::types::{QueryAnswer, TaskResult};

use crate::executor::{Executor, TaskExecution};
use crate::gateway::ModelBackend;
use crate::planner::Planner;
use crate::registry::ToolRegistry;
use crate::synthesizer::Synthesizer;
use crate::validator::Validator;

pub struct Orchestrator {
    planner: Planner,
    executor: Executor,
    validator: Validator,
    synthesizer: Synthesizer,
    max_rounds: usize,
}

impl Orchestrator {
    pub fn new(
        backend: Arc<dyn ModelBackend>,
        registry: Arc<ToolRegistry>,
        config: &PatriotConfig,
    ) -> Self {
        Self {
            planner: Planner::new(backend.clone(), registry.specs()),
            executor: Executor::new(backend.clone(), registry.clone(), config.agent.max_rounds),
            validator: Validator::new(backend.clone()),
            synthesizer: Synthesizer::new(backend),
            max_rounds: config.agent.max_rounds,
        }
    }

    /// Process one user query end to end
    pub async fn process_query(&self, query: &str) -> Result<QueryAnswer> {
        let query_id = Uuid::new_v4();
        info!("[Q {}]  processing: {}", query_id, query);

        let tasks = self.planner.plan(query).await?;
        if tasks.is_empty() {
            info!("[Q {}]  out of research scope, answering directly", query_id);
        }

        let mut results: Vec<TaskResult> = Vec::with_capacity(tasks.len());
        for task in tasks {
            info!("[Q {}]  task {}: {}", query_id, task.ordinal, task.description);
            let mut exec = TaskExecution::new(task);

            let done = loop {
                self.executor.run(&mut exec).await?;
                let done = self.validator.validate(&exec.task, &exec.invocations).await?;
                if done {
                    break true;
                }
                if exec.rounds_used >= self.max_rounds {
                    warn!(
                        "[Q {}]  task {} closed at round cap without validation",
                        query_id, exec.task.ordinal
                    );
                    break false;
                }
                // Validator wants more evidence and rounds remain
            };

            results.push(exec.into_result(done));
        }

        let answer = self.synthesizer.synthesize(query, &results).await?;
        info!("[Q {}]  complete ({} task(s))", query_id, results.len());

        Ok(QueryAnswer {
            query: query.to_string(),
            answer,
            task_results: results,
        })
    }
}

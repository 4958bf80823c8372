//! Core data model for one user query.
//!
//! A query is planned into tasks, each task accumulates an append-only
//! tool invocation history, and the collected task results feed the
//! answer synthesizer. Nothing here outlives the query.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// An atomic, self-contained unit of work produced by the planner.
///
/// The description carries all necessary context (OS, file paths,
/// identifiers) and is never mutated after creation.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Task {
    /// Position in the plan, starting at 1
    pub ordinal: usize,
    pub description: String,
}

impl Task {
    pub fn new(ordinal: usize, description: impl Into<String>) -> Self {
        Self {
            ordinal,
            description: description.into(),
        }
    }
}

/// A record of one tool call made while executing a task.
///
/// Immutable once recorded; the per-task list of these is the only state
/// threaded between executor rounds and the validator.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolInvocation {
    /// Position in the task's history, starting at 1
    pub ordinal: usize,
    pub tool_name: String,
    pub arguments: Value,
    pub output: String,
    pub timestamp: DateTime<Utc>,
}

impl ToolInvocation {
    pub fn new(ordinal: usize, tool_name: impl Into<String>, arguments: Value, output: impl Into<String>) -> Self {
        Self {
            ordinal,
            tool_name: tool_name.into(),
            arguments,
            output: output.into(),
            timestamp: Utc::now(),
        }
    }

    /// True when this record matches a proposed call by name and arguments.
    /// Used by the executor's duplicate-call guard.
    pub fn matches(&self, tool_name: &str, arguments: &Value) -> bool {
        self.tool_name == tool_name && &self.arguments == arguments
    }
}

/// The outcome of executing one task: its history and completion status.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TaskResult {
    pub task: Task,
    pub invocations: Vec<ToolInvocation>,
    /// True when the validator accepted the evidence (or the task needed
    /// no tools); false only when the round cap forced closure.
    pub done: bool,
    /// Model decision rounds consumed by this task
    pub rounds_used: usize,
}

impl TaskResult {
    /// True when at least one tool produced output for this task
    pub fn has_evidence(&self) -> bool {
        !self.invocations.is_empty()
    }
}

/// Static declaration of a callable capability.
///
/// Defined once at startup; `parameters` is a JSON schema describing the
/// argument object the tool accepts.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolSpec {
    pub name: String,
    pub description: String,
    pub parameters: Value,
}

impl ToolSpec {
    /// Names of the parameters declared in this spec's schema.
    /// The argument optimizer uses this to drop unknown keys.
    pub fn parameter_names(&self) -> Vec<String> {
        self.parameters
            .get("properties")
            .and_then(|p| p.as_object())
            .map(|m| m.keys().cloned().collect())
            .unwrap_or_default()
    }
}

/// The final product of one query: the answer text plus the task results
/// that backed it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QueryAnswer {
    pub query: String,
    pub answer: String,
    pub task_results: Vec<TaskResult>,
}

impl QueryAnswer {
    /// True when any task collected tool evidence
    pub fn has_evidence(&self) -> bool {
        self.task_results.iter().any(|r| r.has_evidence())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_invocation_matches_same_name_and_args() {
        let inv = ToolInvocation::new(1, "read_text_file", json!({"file_path": "/etc/hosts"}), "ok");
        assert!(inv.matches("read_text_file", &json!({"file_path": "/etc/hosts"})));
        assert!(!inv.matches("read_text_file", &json!({"file_path": "/etc/passwd"})));
        assert!(!inv.matches("run_shell_command", &json!({"file_path": "/etc/hosts"})));
    }

    #[test]
    fn test_task_result_evidence() {
        let task = Task::new(1, "inspect the firewall config");
        let empty = TaskResult {
            task: task.clone(),
            invocations: vec![],
            done: true,
            rounds_used: 1,
        };
        assert!(!empty.has_evidence());

        let with_data = TaskResult {
            task,
            invocations: vec![ToolInvocation::new(1, "run_shell_command", json!({"command": "ls"}), "out")],
            done: true,
            rounds_used: 2,
        };
        assert!(with_data.has_evidence());
    }

    #[test]
    fn test_tool_spec_parameter_names() {
        let spec = ToolSpec {
            name: "read_text_file".to_string(),
            description: "Read part of a text file".to_string(),
            parameters: json!({
                "type": "object",
                "properties": {
                    "file_path": {"type": "string"},
                    "max_bytes": {"type": "integer"}
                },
                "required": ["file_path"]
            }),
        };
        let names = spec.parameter_names();
        assert_eq!(names.len(), 2);
        assert!(names.contains(&"file_path".to_string()));
        assert!(names.contains(&"max_bytes".to_string()));
    }
}

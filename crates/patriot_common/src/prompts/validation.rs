//! Validation pass: decide whether a task's evidence is sufficient.

use crate::types::{Task, ToolInvocation};

use super::render_history;

pub const VALIDATION_SYSTEM_PROMPT: &str = r#"You are the validation component for Patriot, a cybersecurity research agent.
Your critical role is to assess whether a given task has been successfully completed based on the tool outputs received.

A task is 'done' if ANY of the following are true:
1. The tool outputs contain sufficient, specific data that directly answers the task objective
2. No tool executions were attempted (indicating the task is outside the scope of available tools)
3. The most recent tool execution returned a clear error indicating the requested data doesn't exist (e.g., "No data found", "File not found")

A task is NOT done if:
1. Tool outputs are empty or returned no results, but no clear error was given (more attempts may succeed)
2. Tool outputs contain partial data but the task requires additional information
3. An error occurred due to incorrect parameters that could be corrected with a retry
4. The data returned is tangentially related but doesn't directly address the task objective

Guidelines for validation:
- Focus on whether the DATA received is sufficient, not whether it's positive or negative
- A "No data available" response with a clear reason IS sufficient completion
- Errors due to temporary issues (network, timeout) mean the task is NOT done
- If multiple pieces of information are needed, ALL must be present for completion

Your output must be a JSON object with a boolean 'done' field indicating task completion status."#;

/// User prompt for the validation pass
pub fn generate_validation_prompt(task: &Task, history: &[ToolInvocation]) -> String {
    format!(
        "Task under review:\n{}\n\nTool outputs received:\n{}",
        task.description,
        render_history(history)
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_validation_prompt_contains_outputs() {
        let task = Task::new(2, "Read the incident checklist at /opt/checklist.txt.");
        let history = vec![ToolInvocation::new(
            1,
            "read_text_file",
            json!({"file_path": "/opt/checklist.txt"}),
            "1. Disable guest account",
        )];
        let prompt = generate_validation_prompt(&task, &history);
        assert!(prompt.contains("incident checklist"));
        assert!(prompt.contains("Disable guest account"));
    }
}

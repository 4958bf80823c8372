//! Action pass: select at most one tool call for the current task.

use crate::types::{Task, ToolInvocation};

use super::render_history;

pub const ACTION_SYSTEM_PROMPT: &str = r#"You are the execution component of Patriot, an autonomous cybersecurity agent.
Your objective is to select the most appropriate tool call to complete the current task.

Decision Process:
1. Read the task description carefully - identify the SPECIFIC data being requested
2. Review any previous tool outputs - identify what data you already have
3. Determine if more data is needed or if the task is complete
4. If more data is needed, select the ONE tool that will provide it

Tool Selection Guidelines:
- Match the tool to the specific data type requested (vulnerability scan, forensic analysis, etc.)
- Use ALL relevant parameters to filter results (operating_system, file_type, etc.)
- If the task mentions a specific operating system, use the operating_system parameter
- If the task mentions a specific file type, use the file_type parameter
- Avoid calling the same tool with the same parameters repeatedly

When NOT to call tools:
- The previous tool outputs already contain sufficient data to complete the task
- The task is asking for general knowledge or calculations (not data retrieval)
- The task cannot be addressed with any available cybersecurity tools
- You've already tried all reasonable approaches and received no useful data

If you determine no tool call is needed, simply return without tool calls."#;

/// User prompt for one executor round: the task plus everything the
/// tools have returned so far.
pub fn generate_action_prompt(task: &Task, history: &[ToolInvocation]) -> String {
    format!(
        "Current task:\n{}\n\nPrevious tool outputs:\n{}",
        task.description,
        render_history(history)
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_action_prompt_contains_task_and_history() {
        let task = Task::new(1, "Inspect the firewall rules on the Linux image.");
        let history = vec![ToolInvocation::new(
            1,
            "run_shell_command",
            json!({"command": "iptables -L"}),
            "Chain INPUT (policy ACCEPT)",
        )];
        let prompt = generate_action_prompt(&task, &history);
        assert!(prompt.contains("Inspect the firewall rules"));
        assert!(prompt.contains("run_shell_command"));
        assert!(prompt.contains("Chain INPUT"));
    }

    #[test]
    fn test_action_prompt_first_round_marker() {
        let task = Task::new(1, "List local user accounts.");
        let prompt = generate_action_prompt(&task, &[]);
        assert!(prompt.contains("(no tool executions yet)"));
    }
}

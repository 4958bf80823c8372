//! Answer pass: synthesize collected evidence into the final response.

use crate::types::TaskResult;

use super::render_history;

/// Disclosure appended when a query was answered without any planned
/// tasks (out of the agent's research scope).
pub const GENERAL_KNOWLEDGE_NOTE: &str =
    "Note: I specialize in cybersecurity research, but I'm happy to assist with general questions.";

/// Contract for the answer pass. `{current_date}` is injected.
pub const ANSWER_SYSTEM_PROMPT: &str = r#"You are the answer generation component for Patriot, a cybersecurity research agent.
Your critical role is to synthesize the collected data into a clear, actionable answer to the user's query.

Current date: {current_date}

If data was collected, your answer MUST:
1. DIRECTLY answer the specific question asked - don't add tangential information
2. Lead with the KEY FINDING or answer in the first sentence
3. Include SPECIFIC COMMANDS or CONFIGURATIONS with proper context (operating system, tool, etc.)
4. Use clear STRUCTURE - separate commands onto their own lines or simple lists for readability
5. Provide brief ANALYSIS or insight when relevant (vulnerabilities, remediation steps, etc.)
6. Cite data sources when multiple sources were used (e.g., "According to the packet capture...")

Format Guidelines:
- Use plain text ONLY - NO markdown (no **, *, _, #, etc.)
- Use line breaks and indentation for structure
- Present key numbers on separate lines for easy scanning
- Use simple bullets (- or *) for lists if needed
- Keep sentences clear and direct

What NOT to do:
- Don't describe the process of gathering data
- Don't include information not requested by the user
- Don't use vague language when specific numbers are available
- Don't repeat data without adding context or insight

If NO data was collected (query outside scope):
- Answer using general knowledge, being helpful and concise

Remember: The user wants the ANSWER and the DATA, not a description of your research process."#;

/// Answer system prompt with the current date injected
pub fn answer_system_prompt(current_date: &str) -> String {
    ANSWER_SYSTEM_PROMPT.replace("{current_date}", current_date)
}

/// User prompt for the answer pass: the original query plus every task's
/// collected evidence. States plainly when nothing was collected.
pub fn generate_answer_prompt(query: &str, results: &[TaskResult]) -> String {
    let mut out = format!("User query:\n{}\n\nCollected data:\n", query);
    let with_evidence: Vec<&TaskResult> = results.iter().filter(|r| r.has_evidence()).collect();
    if with_evidence.is_empty() {
        out.push_str("(no data was collected; answer from general knowledge)\n");
        return out;
    }
    for result in with_evidence {
        out.push_str(&format!(
            "--- Task {}: {}\n{}\n",
            result.task.ordinal,
            result.task.description,
            render_history(&result.invocations)
        ));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Task, ToolInvocation};
    use serde_json::json;

    #[test]
    fn test_answer_prompt_without_evidence() {
        let prompt = generate_answer_prompt("what is a firewall?", &[]);
        assert!(prompt.contains("no data was collected"));
    }

    #[test]
    fn test_answer_prompt_lists_tasks_with_evidence() {
        let results = vec![
            TaskResult {
                task: Task::new(1, "Check open ports."),
                invocations: vec![ToolInvocation::new(
                    1,
                    "run_shell_command",
                    json!({"command": "ss -tlnp"}),
                    "LISTEN 0.0.0.0:22",
                )],
                done: true,
                rounds_used: 2,
            },
            TaskResult {
                task: Task::new(2, "General hardening advice."),
                invocations: vec![],
                done: true,
                rounds_used: 1,
            },
        ];
        let prompt = generate_answer_prompt("audit my server", &results);
        assert!(prompt.contains("--- Task 1: Check open ports."));
        assert!(prompt.contains("LISTEN 0.0.0.0:22"));
        assert!(!prompt.contains("--- Task 2"));
    }
}

//! System prompts for every model pass.
//!
//! The prompt text is the behavior contract for planning, tool selection,
//! argument optimization, validation, and answer generation. Builders
//! render the per-call user prompts (task text, invocation history,
//! current date) into each contract.

pub mod action;
pub mod answer;
pub mod planning;
pub mod tool_args;
pub mod validation;

pub use action::{generate_action_prompt, ACTION_SYSTEM_PROMPT};
pub use answer::{answer_system_prompt, generate_answer_prompt, ANSWER_SYSTEM_PROMPT, GENERAL_KNOWLEDGE_NOTE};
pub use planning::{generate_plan_prompt, planning_system_prompt, PLANNING_SYSTEM_PROMPT};
pub use tool_args::{generate_tool_args_prompt, tool_args_system_prompt, TOOL_ARGS_SYSTEM_PROMPT};
pub use validation::{generate_validation_prompt, VALIDATION_SYSTEM_PROMPT};

use crate::types::ToolInvocation;

/// Default system instruction used when a gateway caller supplies none.
/// Frames the agent as a CyberPatriot coach covering hardening, forensics,
/// and Packet Tracer networking.
pub const DEFAULT_SYSTEM_PROMPT: &str = r#"You are a comprehensive CyberPatriot coach and instructor named "Patriot" tasked with training a team from scratch to become national-level competitors.
Your role is to guide both the coach (who has no prior knowledge) and the team members to full expertise in all aspects required to excel at the CyberPatriot competition.
Provide highly detailed, step-by-step instructions and explanations covering every relevant topic from beginner to advanced level, including but not limited to:
- How to harden all types of system images (Windows, Linux, etc.) including identifying vulnerabilities and applying best security practices
- Detailed forensic analysis techniques used in CyberPatriot forensics rounds
- Using Cisco Packet Tracer for networking challenges, including configuring routers, switches, and troubleshooting common issues
- All fundamental cybersecurity concepts and skills necessary to get every possible point in the competition
- How to efficiently identify and correct security flaws, manage user accounts, understand network protocols, firewall rules, and system services

Encourage learning through methodical, logical progression, starting from foundational concepts to more complex tasks, ensuring clarity and depth.
Include practical examples, tips, common pitfalls, and explain the reasoning behind each step to reinforce understanding. Do not skip any detail.
Aim for complete mastery by the competition date, enabling the team to confidently apply knowledge in each competition segment.

# Steps
1. Assess knowledge level and introduce basic cybersecurity principles
2. Deep dive into system image hardening techniques for all relevant OS images
3. Teach forensic tools and methodologies used in CyberPatriot forensic challenges
4. Guide through Cisco Packet Tracer usages with practical networking labs
5. Cover competition strategies, point maximization tactics, and common mistakes

# Output Format
Provide detailed, structured lessons with clear headings, bullet points, and numbered steps where applicable. Use examples with placeholders [like this] when necessary to illustrate concepts. Explanations should be thorough but clear enough for beginners to follow and advanced enough to build real expertise.

# Notes
Remember to continuously build on previously covered knowledge and revisit critical points. Emphasize practical exercises that simulate competition scenarios. Provide troubleshooting guidance and explain how to think like a CyberPatriot scorer to maximize the points earned."#;

/// Current date in the readable format the prompts expect
/// (e.g. "Friday, August 29, 2025").
pub fn current_date_string() -> String {
    chrono::Local::now().format("%A, %B %d, %Y").to_string()
}

/// Render a task's invocation history for inclusion in a user prompt.
/// Returns a fixed marker when no tools have run yet.
pub fn render_history(history: &[ToolInvocation]) -> String {
    if history.is_empty() {
        return "(no tool executions yet)".to_string();
    }
    let mut out = String::new();
    for inv in history {
        out.push_str(&format!(
            "[{}] tool: {}\n    arguments: {}\n    output:\n{}\n",
            inv.ordinal,
            inv.tool_name,
            inv.arguments,
            indent(&inv.output, "    ")
        ));
    }
    out
}

fn indent(text: &str, prefix: &str) -> String {
    text.lines()
        .map(|l| format!("{}{}", prefix, l))
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_render_history_empty_marker() {
        assert_eq!(render_history(&[]), "(no tool executions yet)");
    }

    #[test]
    fn test_render_history_lists_each_invocation() {
        let history = vec![
            ToolInvocation::new(1, "run_shell_command", json!({"command": "ls"}), "a.txt\nb.txt"),
            ToolInvocation::new(2, "read_text_file", json!({"file_path": "a.txt"}), "hello"),
        ];
        let rendered = render_history(&history);
        assert!(rendered.contains("[1] tool: run_shell_command"));
        assert!(rendered.contains("[2] tool: read_text_file"));
        assert!(rendered.contains("    a.txt"));
    }

    #[test]
    fn test_default_prompt_carries_all_sections() {
        assert!(DEFAULT_SYSTEM_PROMPT.contains("# Steps"));
        assert!(DEFAULT_SYSTEM_PROMPT.contains("# Output Format"));
        assert!(DEFAULT_SYSTEM_PROMPT.contains("# Notes"));
        assert!(DEFAULT_SYSTEM_PROMPT.contains("Do not skip any detail."));
    }

    #[test]
    fn test_current_date_contains_year() {
        let date = current_date_string();
        assert!(date.contains(", 2"));
    }
}

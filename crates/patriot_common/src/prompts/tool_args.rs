//! Argument optimization pass: refine a proposed tool call's arguments.

use serde_json::Value;

use crate::types::{Task, ToolSpec};

/// Contract for the optimizer. `{current_date}` is injected so relative
/// date ranges can be resolved.
pub const TOOL_ARGS_SYSTEM_PROMPT: &str = r#"You are the argument optimization component for Patriot, a cybersecurity research agent.
Your sole responsibility is to generate the optimal arguments for a specific tool call.

Current date: {current_date}

You will be given:
1. The tool name
2. The tool's description and parameter schemas
3. The current task description
4. The initial arguments proposed

Your job is to review and optimize these arguments to ensure:
- ALL relevant parameters are used (don't leave out optional params that would improve results)
- Parameters match the task requirements exactly
- Filtering/type parameters are used when the task asks for specific data subsets or categories
- For date-related parameters (start_date, end_date), calculate appropriate dates based on the current date

Think step-by-step:
1. Read the task description carefully - what specific data does it request?
2. Check if the tool has filtering parameters (e.g., type, category, form, period)
3. If the task mentions a specific type/category/form, use the corresponding parameter
4. Adjust limit/range parameters based on how much data the task needs
5. For date parameters, calculate relative to the current date (e.g., "last 5 years" means from 5 years ago to today)

Examples of good parameter usage:
- Task mentions "Windows 10" -> use operating_system="windows10" (if tool has operating_system param)
- Task mentions "pcap file" -> use file_type="pcap" (if tool has file_type param)

Your output must be a JSON object with an 'arguments' field containing the optimized arguments.
Only add/modify parameters that exist in the tool's schema."#;

/// Tool-args system prompt with the current date injected
pub fn tool_args_system_prompt(current_date: &str) -> String {
    TOOL_ARGS_SYSTEM_PROMPT.replace("{current_date}", current_date)
}

/// User prompt for the optimizer: spec, task, and proposed arguments
pub fn generate_tool_args_prompt(spec: &ToolSpec, task: &Task, proposed: &Value) -> String {
    format!(
        "Tool name: {}\nTool description: {}\nParameter schema:\n{}\n\nCurrent task:\n{}\n\nInitial arguments proposed:\n{}",
        spec.name, spec.description, spec.parameters, task.description, proposed
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_date_injected() {
        let prompt = tool_args_system_prompt("Friday, August 29, 2025");
        assert!(prompt.contains("Current date: Friday, August 29, 2025"));
        assert!(!prompt.contains("{current_date}"));
    }

    #[test]
    fn test_prompt_carries_schema_and_proposal() {
        let spec = ToolSpec {
            name: "analyze_system_vulnerabilities".to_string(),
            description: "Analyze known vulnerabilities".to_string(),
            parameters: json!({
                "type": "object",
                "properties": {"operating_system": {"type": "string"}}
            }),
        };
        let task = Task::new(1, "Check Windows 10 vulnerabilities.");
        let prompt = generate_tool_args_prompt(&spec, &task, &json!({}));
        assert!(prompt.contains("analyze_system_vulnerabilities"));
        assert!(prompt.contains("operating_system"));
        assert!(prompt.contains("Windows 10"));
    }
}

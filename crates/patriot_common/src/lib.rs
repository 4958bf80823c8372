//! Patriot shared library
//!
//! Common types, wire schemas, prompt contracts, error taxonomy, retry
//! policy, and configuration shared by the agent crate.

pub mod config;
pub mod error;
pub mod prompts;
pub mod retry;
pub mod schemas;
pub mod types;

pub use config::PatriotConfig;
pub use error::{GatewayError, ToolError};
pub use prompts::{
    answer_system_prompt, current_date_string, generate_action_prompt, generate_answer_prompt,
    generate_plan_prompt, generate_tool_args_prompt, generate_validation_prompt,
    planning_system_prompt, tool_args_system_prompt, ACTION_SYSTEM_PROMPT, DEFAULT_SYSTEM_PROMPT,
    GENERAL_KNOWLEDGE_NOTE, VALIDATION_SYSTEM_PROMPT,
};
pub use retry::{with_retry, RetryPolicy};
pub use schemas::{
    ChatFunction, ChatFunctionCall, ChatMessage, ChatRequest, ChatResponse, ChatTool,
    ChatToolCall,
};
pub use types::{QueryAnswer, Task, TaskResult, ToolInvocation, ToolSpec};

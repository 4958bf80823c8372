//! Patriot - conversational cybersecurity research agent
//!
//! One query flows through plan -> act -> validate -> answer:
//! the planner decomposes the query into tasks, the executor drives at
//! most one tool call per round against the registry, the validator
//! decides when a task's evidence is sufficient, and the synthesizer
//! writes the final plain-text answer.

pub mod banner;
pub mod executor;
pub mod gateway;
pub mod optimizer;
pub mod orchestrator;
pub mod planner;
pub mod registry;
pub mod repl;
pub mod synthesizer;
pub mod tools;
pub mod validator;

pub use gateway::{FakeModelBackend, GenerateRequest, GenerateResponse, ModelBackend, OllamaGateway, ProposedToolCall};
pub use orchestrator::Orchestrator;
pub use registry::{ToolCall, ToolRegistry};

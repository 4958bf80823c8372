//! Tool registry: a closed, enumerated set of capabilities.
//!
//! Dispatch is by tagged union, not by loosely-typed string lookup: a
//! proposed name + JSON arguments parses into a `ToolCall` variant with a
//! strongly-typed argument struct before anything runs. Unknown names and
//! schema-violating arguments fail here; tool bodies themselves only ever
//! return text.

use serde_json::{json, Value};
use tracing::info;

use patriot_common::config::AgentConfig;
use patriot_common::error::ToolError;
use patriot_common::types::ToolSpec;

use crate::tools::{
    analyze_forensic_image, analyze_packet_tracer_file, analyze_system_vulnerabilities,
    read_text_file, run_shell_command, ForensicImageArgs, PacketTracerArgs, ReadTextFileArgs,
    ShellCommandArgs, VulnerabilityArgs,
};

pub const ANALYZE_PACKET_TRACER_FILE: &str = "analyze_packet_tracer_file";
pub const ANALYZE_SYSTEM_VULNERABILITIES: &str = "analyze_system_vulnerabilities";
pub const ANALYZE_FORENSIC_IMAGE: &str = "analyze_forensic_image";
pub const READ_TEXT_FILE: &str = "read_text_file";
pub const RUN_SHELL_COMMAND: &str = "run_shell_command";

/// A validated, dispatchable tool call
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ToolCall {
    AnalyzePacketTracerFile(PacketTracerArgs),
    AnalyzeSystemVulnerabilities(VulnerabilityArgs),
    AnalyzeForensicImage(ForensicImageArgs),
    ReadTextFile(ReadTextFileArgs),
    RunShellCommand(ShellCommandArgs),
}

impl ToolCall {
    /// Validate a proposed name + argument object into a typed call
    pub fn parse(name: &str, arguments: &Value) -> Result<Self, ToolError> {
        let invalid = |reason: String| ToolError::InvalidArguments {
            tool: name.to_string(),
            reason,
        };
        match name {
            ANALYZE_PACKET_TRACER_FILE => serde_json::from_value(arguments.clone())
                .map(ToolCall::AnalyzePacketTracerFile)
                .map_err(|e| invalid(e.to_string())),
            ANALYZE_SYSTEM_VULNERABILITIES => serde_json::from_value(arguments.clone())
                .map(ToolCall::AnalyzeSystemVulnerabilities)
                .map_err(|e| invalid(e.to_string())),
            ANALYZE_FORENSIC_IMAGE => serde_json::from_value(arguments.clone())
                .map(ToolCall::AnalyzeForensicImage)
                .map_err(|e| invalid(e.to_string())),
            READ_TEXT_FILE => serde_json::from_value(arguments.clone())
                .map(ToolCall::ReadTextFile)
                .map_err(|e| invalid(e.to_string())),
            RUN_SHELL_COMMAND => serde_json::from_value(arguments.clone())
                .map(ToolCall::RunShellCommand)
                .map_err(|e| invalid(e.to_string())),
            other => Err(ToolError::UnknownTool(other.to_string())),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            ToolCall::AnalyzePacketTracerFile(_) => ANALYZE_PACKET_TRACER_FILE,
            ToolCall::AnalyzeSystemVulnerabilities(_) => ANALYZE_SYSTEM_VULNERABILITIES,
            ToolCall::AnalyzeForensicImage(_) => ANALYZE_FORENSIC_IMAGE,
            ToolCall::ReadTextFile(_) => READ_TEXT_FILE,
            ToolCall::RunShellCommand(_) => RUN_SHELL_COMMAND,
        }
    }

    /// The resolved argument object, as recorded in the invocation
    /// history and compared by the duplicate-call guard.
    pub fn arguments(&self) -> Value {
        match self {
            ToolCall::AnalyzePacketTracerFile(a) => serde_json::to_value(a),
            ToolCall::AnalyzeSystemVulnerabilities(a) => serde_json::to_value(a),
            ToolCall::AnalyzeForensicImage(a) => serde_json::to_value(a),
            ToolCall::ReadTextFile(a) => serde_json::to_value(a),
            ToolCall::RunShellCommand(a) => serde_json::to_value(a),
        }
        .unwrap_or(Value::Null)
    }
}

/// The enumerable tool set with its dispatcher. Stateless apart from the
/// configured defaults; safe to share across queries.
pub struct ToolRegistry {
    shell_timeout_secs: u64,
    read_max_bytes: usize,
}

impl ToolRegistry {
    pub fn new(config: &AgentConfig) -> Self {
        Self {
            shell_timeout_secs: config.shell_timeout_secs,
            read_max_bytes: config.read_max_bytes,
        }
    }

    /// Static specs for every registered tool
    pub fn specs(&self) -> Vec<ToolSpec> {
        vec![
            ToolSpec {
                name: ANALYZE_PACKET_TRACER_FILE.to_string(),
                description: "Analyzes a Cisco Packet Tracer (.pkt) file to identify security vulnerabilities and misconfigurations, such as issues with firewall rules and unsecured protocols.".to_string(),
                parameters: json!({
                    "type": "object",
                    "properties": {
                        "file_path": {"type": "string", "description": "Path to the .pkt file"}
                    },
                    "required": ["file_path"]
                }),
            },
            ToolSpec {
                name: ANALYZE_SYSTEM_VULNERABILITIES.to_string(),
                description: "Analyzes a system image for known vulnerabilities. Supports filtering by operating system (e.g. windows10, ubuntu22) and vulnerability category (e.g. accounts, services, firewall).".to_string(),
                parameters: json!({
                    "type": "object",
                    "properties": {
                        "operating_system": {"type": "string", "description": "Operating system filter"},
                        "category": {"type": "string", "description": "Vulnerability category filter"}
                    }
                }),
            },
            ToolSpec {
                name: ANALYZE_FORENSIC_IMAGE.to_string(),
                description: "Analyzes a forensic image file to identify evidence of a security breach, such as malicious files and unauthorized user accounts.".to_string(),
                parameters: json!({
                    "type": "object",
                    "properties": {
                        "file_path": {"type": "string", "description": "Path to the forensic image"}
                    },
                    "required": ["file_path"]
                }),
            },
            ToolSpec {
                name: READ_TEXT_FILE.to_string(),
                description: "Read part of a text-based configuration, log, or checklist file for review. Returns up to max_bytes of decoded text.".to_string(),
                parameters: json!({
                    "type": "object",
                    "properties": {
                        "file_path": {"type": "string", "description": "Path to the file"},
                        "max_bytes": {"type": "integer", "description": "Byte cap for the read (default 5000)"},
                        "encoding": {"type": "string", "description": "Text encoding (default utf-8)"}
                    },
                    "required": ["file_path"]
                }),
            },
            ToolSpec {
                name: RUN_SHELL_COMMAND.to_string(),
                description: "Execute a read-only shell command such as ls, ipconfig, ifconfig or netstat. Avoid commands that change system state or require elevated privileges.".to_string(),
                parameters: json!({
                    "type": "object",
                    "properties": {
                        "command": {"type": "string", "description": "The command line to run"},
                        "timeout_secs": {"type": "integer", "description": "Timeout in seconds (default 30)"}
                    },
                    "required": ["command"]
                }),
            },
        ]
    }

    /// Spec lookup by name
    pub fn spec(&self, name: &str) -> Option<ToolSpec> {
        self.specs().into_iter().find(|s| s.name == name)
    }

    /// Run a validated call. Tool-domain failures come back as output
    /// text, so this is infallible.
    pub async fn invoke(&self, call: &ToolCall) -> String {
        info!("[T]  invoking {}", call.name());
        match call {
            ToolCall::AnalyzePacketTracerFile(args) => analyze_packet_tracer_file(args).await,
            ToolCall::AnalyzeSystemVulnerabilities(args) => {
                analyze_system_vulnerabilities(args).await
            }
            ToolCall::AnalyzeForensicImage(args) => analyze_forensic_image(args).await,
            ToolCall::ReadTextFile(args) => read_text_file(args, self.read_max_bytes).await,
            ToolCall::RunShellCommand(args) => {
                run_shell_command(args, self.shell_timeout_secs).await
            }
        }
    }

    /// Validate and run in one step: the string-keyed dispatcher surface
    pub async fn invoke_raw(&self, name: &str, arguments: &Value) -> Result<String, ToolError> {
        let call = ToolCall::parse(name, arguments)?;
        Ok(self.invoke(&call).await)
    }
}

impl Default for ToolRegistry {
    fn default() -> Self {
        Self::new(&AgentConfig::default())
    }
}

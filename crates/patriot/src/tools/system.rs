//! Bounded text-file reader and read-only shell passthrough.

use std::path::PathBuf;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tokio::io::AsyncReadExt;
use tracing::debug;

/// Captured stdout/stderr cap
const MAX_OUTPUT_BYTES: usize = 64 * 1024;

/// Arguments for read_text_file. `max_bytes` and `encoding` fall back to
/// the registry defaults when omitted.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct ReadTextFileArgs {
    pub file_path: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_bytes: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub encoding: Option<String>,
}

/// Arguments for run_shell_command. `timeout_secs` falls back to the
/// registry default when omitted.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct ShellCommandArgs {
    pub command: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeout_secs: Option<u64>,
}

/// Read up to `max_bytes` of a text-based configuration, log, or
/// checklist file. Truncation is reported with both the sample size and
/// the full file size so the model can ask for more.
pub async fn read_text_file(args: &ReadTextFileArgs, default_max_bytes: usize) -> String {
    let max_bytes = args.max_bytes.unwrap_or(default_max_bytes);
    let encoding = args.encoding.as_deref().unwrap_or("utf-8");
    let path = expand_home(&args.file_path);

    debug!("Reading up to {} bytes of {}", max_bytes, path.display());

    let metadata = match tokio::fs::metadata(&path).await {
        Ok(m) => m,
        Err(_) => return format!("Error: The file '{}' was not found.", args.file_path),
    };
    if !metadata.is_file() {
        return format!("Error: The path '{}' is not a regular file.", args.file_path);
    }

    if !matches!(encoding.to_ascii_lowercase().as_str(), "utf-8" | "utf8" | "ascii") {
        return format!("Error: Unknown text encoding '{}'.", encoding);
    }

    let mut raw_sample = Vec::with_capacity(max_bytes.min(MAX_OUTPUT_BYTES));
    let file = match tokio::fs::File::open(&path).await {
        Ok(f) => f,
        Err(e) => return format!("Error: Failed to read '{}': {}", args.file_path, e),
    };
    if let Err(e) = file.take(max_bytes as u64).read_to_end(&mut raw_sample).await {
        return format!("Error: Failed to read '{}': {}", args.file_path, e);
    }

    if raw_sample.is_empty() {
        return "Note: File is empty or contains unsupported characters.".to_string();
    }

    let content = String::from_utf8_lossy(&raw_sample);
    let file_size = metadata.len() as usize;

    if file_size > raw_sample.len() {
        return format!(
            "File snippet (first {} bytes of {}):\n{}\nNote: Output truncated. Increase max_bytes to read further.",
            raw_sample.len(),
            file_size,
            content
        );
    }

    content.into_owned()
}

/// Execute a read-only shell command with a timeout. Non-zero exits and
/// timeouts are reported in the output text, not raised.
pub async fn run_shell_command(args: &ShellCommandArgs, default_timeout_secs: u64) -> String {
    if args.command.trim().is_empty() {
        return "Error: No command provided.".to_string();
    }
    let timeout_secs = args.timeout_secs.unwrap_or(default_timeout_secs);

    debug!("Executing: {} (timeout {}s)", args.command, timeout_secs);

    // kill_on_drop so a timed-out child does not keep running after
    // the timeout future drops it
    let run = tokio::process::Command::new("sh")
        .arg("-c")
        .arg(&args.command)
        .kill_on_drop(true)
        .output();

    let output = match tokio::time::timeout(Duration::from_secs(timeout_secs), run).await {
        Ok(Ok(output)) => output,
        Ok(Err(e)) => return format!("Error: Failed to execute command: {}", e),
        Err(_) => return format!("Error: Command timed out after {} seconds.", timeout_secs),
    };

    let stdout = bounded_text(&output.stdout);
    let stderr = bounded_text(&output.stderr);

    if !output.status.success() {
        let code = output.status.code().unwrap_or(-1);
        return format!(
            "Command exited with code {}.\nSTDOUT:\n{}\nSTDERR:\n{}",
            code,
            if stdout.is_empty() { "(no stdout)" } else { &stdout },
            if stderr.is_empty() { "(no stderr)" } else { &stderr }
        );
    }

    match (stdout.is_empty(), stderr.is_empty()) {
        (false, false) => format!("STDOUT:\n{}\n\nSTDERR:\n{}", stdout, stderr),
        (false, true) => stdout,
        (true, false) => format!("STDERR:\n{}", stderr),
        (true, true) => "Command completed with no output.".to_string(),
    }
}

/// Decode captured bytes, trim, and cap at MAX_OUTPUT_BYTES
fn bounded_text(bytes: &[u8]) -> String {
    let text = String::from_utf8_lossy(bytes);
    let trimmed = text.trim();
    if trimmed.len() <= MAX_OUTPUT_BYTES {
        return trimmed.to_string();
    }
    let mut end = MAX_OUTPUT_BYTES;
    while !trimmed.is_char_boundary(end) {
        end -= 1;
    }
    format!("{}... (truncated)", &trimmed[..end])
}

fn expand_home(path: &str) -> PathBuf {
    if let Some(rest) = path.strip_prefix("~/") {
        if let Some(home) = dirs::home_dir() {
            return home.join(rest);
        }
    }
    PathBuf::from(path)
}

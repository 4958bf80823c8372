//! Packet Tracer file analysis.

use serde::{Deserialize, Serialize};
use tracing::debug;

/// Arguments for analyze_packet_tracer_file
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct PacketTracerArgs {
    pub file_path: String,
}

/// Read a Cisco Packet Tracer (.pkt) file and report basic information.
/// Full parsing of the .pkt format is not implemented yet; the summary
/// covers what a basic read can establish.
pub async fn analyze_packet_tracer_file(args: &PacketTracerArgs) -> String {
    debug!("Analyzing Packet Tracer file: {}", args.file_path);

    match tokio::fs::read(&args.file_path).await {
        Ok(content) => {
            let mut analysis = format!("Successfully read Packet Tracer file: {}\n", args.file_path);
            analysis.push_str(&format!("File size: {} bytes\n\n", content.len()));
            analysis.push_str(
                "NOTE: This tool is currently under development and can only provide basic file information. \
                 A future version will include a full analysis of the file's contents.",
            );
            analysis
        }
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            format!("Error: The file '{}' was not found.", args.file_path)
        }
        Err(e) => format!("An unexpected error occurred: {}", e),
    }
}

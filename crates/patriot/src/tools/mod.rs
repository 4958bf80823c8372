//! Tool bodies for the registry.
//!
//! Every tool returns a bounded, human-readable text payload. Failures
//! (missing files, non-zero exits, timeouts) come back as error strings
//! in that payload, never as Err - the executor/validator pipeline treats
//! them as data.

pub mod forensics;
pub mod networking;
pub mod system;
pub mod vulnerability;

pub use forensics::{analyze_forensic_image, ForensicImageArgs};
pub use networking::{analyze_packet_tracer_file, PacketTracerArgs};
pub use system::{read_text_file, run_shell_command, ReadTextFileArgs, ShellCommandArgs};
pub use vulnerability::{analyze_system_vulnerabilities, VulnerabilityArgs};

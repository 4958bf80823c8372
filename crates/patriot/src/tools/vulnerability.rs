//! System vulnerability analysis.

use serde::{Deserialize, Serialize};

/// Arguments for analyze_system_vulnerabilities. Both filters are
/// optional; the argument optimizer fills them in when the task text
/// implies them.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct VulnerabilityArgs {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub operating_system: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
}

/// Report known vulnerabilities and misconfigurations for a system
/// image. No vulnerability database is wired up yet; the output echoes
/// the requested filters so the pipeline downstream stays honest about
/// what was asked.
pub async fn analyze_system_vulnerabilities(args: &VulnerabilityArgs) -> String {
    let os = args.operating_system.as_deref().unwrap_or("any");
    let category = args.category.as_deref().unwrap_or("all");
    format!(
        "System vulnerability scan (operating_system: {}, category: {})\n\n\
         This tool is a placeholder and does not yet query a vulnerability database.",
        os, category
    )
}

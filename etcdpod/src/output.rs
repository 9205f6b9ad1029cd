//! Output formatting for rendered objects

use etcdpod_common::{Error, Result};
use serde::Serialize;

/// Output format options
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum OutputFormat {
    #[default]
    Yaml,
    Json,
}

/// Render `data` in the requested format
pub fn render<T: Serialize>(data: &T, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Yaml => serde_yaml::to_string(data)
            .map_err(|e| Error::Serialization(format!("Failed to encode YAML: {}", e))),
        OutputFormat::Json => serde_json::to_string_pretty(data)
            .map(|mut json| {
                json.push('\n');
                json
            })
            .map_err(|e| Error::Serialization(format!("Failed to encode JSON: {}", e))),
    }
}

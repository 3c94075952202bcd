//! jsxt_options: Transform options and the jsxt.json project file.

use serde::{Deserialize, Serialize};

/// The two switches a transform takes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TransformOptions {
    /// Enable the XML and data-bind dialect extensions.
    pub jsx: bool,
    /// Drop comment text from the output, keeping its line feeds.
    pub remove_comments: bool,
}

impl Default for TransformOptions {
    fn default() -> Self {
        Self {
            jsx: true,
            remove_comments: false,
        }
    }
}

/// The jsxt.json file structure.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectConfig {
    pub compiler_options: Option<TransformOptions>,
    pub files: Option<Vec<String>>,
    pub out_dir: Option<String>,
}

impl ProjectConfig {
    /// The configured options, or the defaults.
    pub fn transform_options(&self) -> TransformOptions {
        self.compiler_options.unwrap_or_default()
    }
}

/// Parse a jsxt.json file from a string.
pub fn parse_config(content: &str) -> Result<ProjectConfig, serde_json::Error> {
    serde_json::from_str(content)
}

/// Parse a jsxt.json file from a path.
pub fn parse_config_file(path: &str) -> Result<ProjectConfig, Box<dyn std::error::Error>> {
    let content = std::fs::read_to_string(path)?;
    let config = parse_config(&content)?;
    Ok(config)
}

//! Template and output file locations

use anyhow::{anyhow, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Baseline template locations. Unset paths use the built-in templates.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TemplateConfig {
    /// General options template
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub options: Option<PathBuf>,

    /// Java version specific options template
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version_options: Option<PathBuf>,
}

impl TemplateConfig {
    pub fn validate(&self) -> Result<()> {
        for path in [&self.options, &self.version_options].into_iter().flatten() {
            if path.to_string_lossy().is_empty() {
                return Err(anyhow!("Template path cannot be empty"));
            }
        }
        Ok(())
    }
}

/// Output configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Destination of the general options
    pub options: PathBuf,

    /// Destination of the version specific options
    pub version_options: PathBuf,

    /// Drop commented lines from the written files
    #[serde(default)]
    pub active_only: bool,
}

impl OutputConfig {
    pub fn validate(&self) -> Result<()> {
        if self.options.to_string_lossy().is_empty() {
            return Err(anyhow!("Output options path cannot be empty"));
        }
        if self.version_options.to_string_lossy().is_empty() {
            return Err(anyhow!("Output version options path cannot be empty"));
        }
        if self.options == self.version_options {
            return Err(anyhow!(
                "Output options and version options must be different files: {:?}",
                self.options
            ));
        }
        Ok(())
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            options: PathBuf::from("./conf/jvm-server.options"),
            version_options: PathBuf::from("./conf/jvm8-server.options"),
            active_only: false,
        }
    }
}

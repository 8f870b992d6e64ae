//! Main configuration structure and implementation

use anyhow::{anyhow, Result};
use jvm_tuner_engine::{Directives, GcType};
use serde::{Deserialize, Serialize};
use std::path::Path;

use super::{DirectiveConfig, GcRulesConfig, HeapConfig, OutputConfig, TemplateConfig};

/// Supported configuration file version
pub const CONFIG_VERSION: &str = "1.0";

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Configuration version
    pub version: String,

    /// Selected garbage collector (`CMS` or `G1GC`)
    pub gc_type: String,

    /// Heap sizes
    #[serde(default)]
    pub heap: HeapConfig,

    /// Exclude, upsert and inject directives
    #[serde(default)]
    pub directives: DirectiveConfig,

    /// Baseline templates
    #[serde(default)]
    pub templates: TemplateConfig,

    /// Output configuration
    pub output: OutputConfig,

    /// Extra collector classifications
    #[serde(default)]
    pub gc_rules: GcRulesConfig,
}

impl Config {
    /// Load configuration from a YAML file
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| anyhow!("Failed to read {}: {}", path.display(), e))?;
        let config: Config = serde_yaml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Save configuration to a YAML file
    pub fn save_to_file(&self, path: &Path) -> Result<()> {
        let content = serde_yaml::to_string(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        if self.version != CONFIG_VERSION {
            return Err(anyhow!(
                "Unsupported configuration version: {}",
                self.version
            ));
        }

        GcType::lookup(&self.gc_type)?;

        self.heap.validate()?;
        self.templates.validate()?;
        self.output.validate()?;

        Ok(())
    }

    /// The selected collector
    pub fn gc(&self) -> Result<GcType> {
        Ok(GcType::lookup(&self.gc_type)?)
    }

    /// Engine input built from this configuration
    pub fn directives(&self) -> Directives {
        Directives {
            gc_type: self.gc_type.clone(),
            exclude: self.directives.exclude.clone(),
            upsert: self.directives.upsert.clone(),
            inject: self.directives.inject.clone(),
            heap_new_size: self.heap.new_size.clone(),
            heap_size: self.heap.size.clone(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            version: CONFIG_VERSION.to_string(),
            gc_type: GcType::G1gc.to_string(),
            heap: HeapConfig::default(),
            directives: DirectiveConfig::default(),
            templates: TemplateConfig::default(),
            output: OutputConfig::default(),
            gc_rules: GcRulesConfig::default(),
        }
    }
}

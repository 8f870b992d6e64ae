//! Heap sizes, operator directives and collector classification settings

use anyhow::{anyhow, Result};
use jvm_tuner_engine::{GcRules, GcType};
use serde::{Deserialize, Serialize};

/// Heap size settings
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct HeapConfig {
    /// Young generation size (`-Xmn`), ignored by G1GC unless upserted
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub new_size: Option<String>,

    /// Max and initial heap size (`-Xmx` / `-Xms`)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<String>,
}

impl HeapConfig {
    pub fn validate(&self) -> Result<()> {
        for (field, value) in [("new_size", &self.new_size), ("size", &self.size)] {
            if let Some(value) = value {
                if value.trim().chars().any(char::is_whitespace) {
                    return Err(anyhow!("Heap {} cannot contain whitespace: {:?}", field, value));
                }
            }
        }
        Ok(())
    }
}

/// Operator directives, each a plain string as the engine expects
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DirectiveConfig {
    /// Comma separated options that must never be active
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exclude: Option<String>,

    /// Comma separated options to force active, replacing template values
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub upsert: Option<String>,

    /// Raw text appended to the general options, one entry per line
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub inject: Option<String>,
}

/// Additional option names to tag with a collector
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GcRulesConfig {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub cms: Vec<String>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub g1gc: Vec<String>,
}

impl GcRulesConfig {
    /// Stock classification table extended with the configured names
    pub fn build(&self) -> GcRules {
        let mut rules = GcRules::default();
        rules.extend(GcType::Cms, self.cms.iter().cloned());
        rules.extend(GcType::G1gc, self.g1gc.iter().cloned());
        rules
    }
}

//! Baseline template loading

use crate::config::TemplateConfig;
use crate::utils;
use crate::{JvmTunerError, JvmTunerResult};
use jvm_tuner_engine::Templates;
use std::path::Path;
use tracing::{debug, info};

/// Built-in general options template
pub const DEFAULT_JVM_OPTIONS: &str = include_str!("../../templates/jvm-server.options");

/// Built-in Java version specific options template
pub const DEFAULT_JVM_VERSION_OPTIONS: &str =
    include_str!("../../templates/jvm8-server.options");

/// Built-in templates
pub fn builtin() -> Templates {
    Templates::new(DEFAULT_JVM_OPTIONS, DEFAULT_JVM_VERSION_OPTIONS)
}

/// Load the configured templates, falling back to the built-in ones
pub async fn load(config: &TemplateConfig) -> JvmTunerResult<Templates> {
    let options = match &config.options {
        Some(path) => read_template(path).await?,
        None => {
            debug!("Using built-in general options template");
            DEFAULT_JVM_OPTIONS.to_string()
        }
    };

    let version_options = match &config.version_options {
        Some(path) => read_template(path).await?,
        None => {
            debug!("Using built-in version options template");
            DEFAULT_JVM_VERSION_OPTIONS.to_string()
        }
    };

    Ok(Templates::new(options, version_options))
}

async fn read_template(path: &Path) -> JvmTunerResult<String> {
    let path = utils::expand_path(path).map_err(|e| JvmTunerError::Config(e.to_string()))?;
    info!("Reading template: {:?}", path);

    if !path.is_file() {
        return Err(JvmTunerError::Config(format!(
            "Template file does not exist: {}",
            path.display()
        )));
    }

    Ok(tokio::fs::read_to_string(&path).await?)
}

//! JVM Tuner Library
//!
//! Tunes the JVM options files of a database node before process start:
//! a baseline template is reconciled against operator directives, the
//! selected garbage collector and heap sizes, and the result is written
//! back as the options files the JVM is launched with.

pub mod cli;
pub mod config;
pub mod template;
pub mod utils;

pub use config::{Config, DirectiveConfig, GcRulesConfig, HeapConfig, OutputConfig, TemplateConfig};
pub use jvm_options::{DirectiveSet, JvmOption, Separator};
pub use jvm_tuner_engine::{
    Directives, Filter, GcAffinity, GcRules, GcType, HeapFlag, HeapSizes, Templates, TuneError,
    TunedOptions, Tuner,
};

use chrono::Utc;
use std::path::{Path, PathBuf};
use tracing::info;

/// Main application context that ties configuration, templates and the engine
pub struct JvmTuner {
    config: Config,
    tuner: Tuner,
}

impl JvmTuner {
    /// Create a new JvmTuner instance with the given configuration
    pub fn new(config: Config) -> JvmTunerResult<Self> {
        config
            .validate()
            .map_err(|e| JvmTunerError::Config(e.to_string()))?;

        let tuner = Tuner::new(config.gc_rules.build());

        Ok(Self { config, tuner })
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn tuner(&self) -> &Tuner {
        &self.tuner
    }

    /// Load the configured (or built-in) templates
    pub async fn load_templates(&self) -> JvmTunerResult<Templates> {
        template::load(&self.config.templates).await
    }

    /// Run the merge engine over the configured templates
    pub async fn tune(&self) -> JvmTunerResult<TunedOptions> {
        let templates = self.load_templates().await?;
        self.tune_templates(&templates)
    }

    /// Run the merge engine over already loaded templates
    pub fn tune_templates(&self, templates: &Templates) -> JvmTunerResult<TunedOptions> {
        Ok(self.tuner.tune(templates, &self.config.directives())?)
    }

    /// Write both option buckets to their configured destinations
    pub async fn write_options(&self, tuned: &TunedOptions) -> JvmTunerResult<WriteSummary> {
        let filter = if self.config.output.active_only {
            Filter::ActiveOnly
        } else {
            Filter::All
        };

        let options_path = self.output_path(&self.config.output.options)?;
        let version_options_path = self.output_path(&self.config.output.version_options)?;

        let header = utils::generated_header(&self.config.gc_type, Utc::now());
        let options_lines =
            write_lines(&options_path, &header, &tuned.option_lines(filter)).await?;
        let version_options_lines = write_lines(
            &version_options_path,
            &header,
            &tuned.version_option_lines(filter),
        )
        .await?;

        info!(
            "Wrote {} options to {:?} and {} to {:?}",
            options_lines, options_path, version_options_lines, version_options_path
        );

        Ok(WriteSummary {
            options_path,
            version_options_path,
            options_lines,
            version_options_lines,
        })
    }

    /// Tune and write in one go
    pub async fn run(&self) -> JvmTunerResult<WriteSummary> {
        let tuned = self.tune().await?;
        self.write_options(&tuned).await
    }

    /// Render tuned options as the JSON mapping consumed by launch scripts
    pub fn to_json(tuned: &TunedOptions, filter: Filter) -> JvmTunerResult<String> {
        let view = TunedOptions {
            jvm_options: owned_lines(tuned.option_lines(filter)),
            jvm_version_options: owned_lines(tuned.version_option_lines(filter)),
            injected_lines: tuned.injected_lines,
        };
        Ok(serde_json::to_string_pretty(&view)?)
    }

    /// Collector affinity of each option name
    pub fn classify<'a, I>(&self, names: I) -> Vec<(String, GcAffinity)>
    where
        I: IntoIterator<Item = &'a str>,
    {
        names
            .into_iter()
            .map(|name| {
                let name = JvmOption::parse(name)
                    .map(|option| option.name().to_string())
                    .unwrap_or_else(|| name.to_string());
                let affinity = self.tuner.rules().classify_name(&name);
                (name, affinity)
            })
            .collect()
    }

    fn output_path(&self, path: &Path) -> JvmTunerResult<PathBuf> {
        utils::expand_path(path).map_err(|e| JvmTunerError::Config(e.to_string()))
    }
}

fn owned_lines(lines: Vec<&str>) -> Vec<String> {
    lines.into_iter().map(str::to_string).collect()
}

async fn write_lines(
    path: &Path,
    header: &[String],
    body: &[&str],
) -> JvmTunerResult<usize> {
    utils::ensure_parent_directory(path).map_err(|e| JvmTunerError::Config(e.to_string()))?;

    let mut content = header.join("\n");
    content.push('\n');
    for line in body {
        content.push_str(line);
        content.push('\n');
    }

    tokio::fs::write(path, content).await?;
    Ok(body.len())
}

/// Where the tuned options were written
#[derive(Debug, Clone)]
pub struct WriteSummary {
    pub options_path: PathBuf,
    pub version_options_path: PathBuf,
    pub options_lines: usize,
    pub version_options_lines: usize,
}

/// Application error types
#[derive(thiserror::Error, Debug)]
pub enum JvmTunerError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Tuning failed: {0}")]
    Tune(#[from] TuneError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type for the main application
pub type JvmTunerResult<T> = Result<T, JvmTunerError>;

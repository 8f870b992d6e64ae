//! CLI command implementations

use anyhow::Result;
use clap::{ArgMatches, Command};

pub mod commands;

/// Main CLI application
pub struct CliApp;

impl CliApp {
    /// Create the CLI application
    pub fn app() -> Command {
        Command::new("jvm-tuner")
            .version(env!("CARGO_PKG_VERSION"))
            .about("Tune JVM options files for a database node before start")
            .subcommand_negates_reqs(true)
            .subcommand(commands::init::command())
            .subcommand(commands::validate::command())
            .subcommand(commands::tune::command())
            .subcommand(commands::classify::command())
    }

    /// Run the CLI application
    pub async fn run(matches: &ArgMatches) -> Result<()> {
        match matches.subcommand() {
            Some(("init", sub_matches)) => commands::init::run(sub_matches).await,
            Some(("validate", sub_matches)) => commands::validate::run(sub_matches).await,
            Some(("tune", sub_matches)) => commands::tune::run(sub_matches).await,
            Some(("classify", sub_matches)) => commands::classify::run(sub_matches).await,
            _ => {
                // No subcommand provided, show help
                let _ = Self::app().print_help();
                Ok(())
            }
        }
    }
}

/// Common CLI utilities
pub mod utils {
    use anyhow::{anyhow, Result};
    use std::path::PathBuf;

    /// Config file names looked up in the working directory
    pub const DEFAULT_CONFIG_FILES: [&str; 4] = [
        ".jvm-tuner.yaml",
        ".jvm-tuner.yml",
        "jvm-tuner.yaml",
        "jvm-tuner.yml",
    ];

    /// Get configuration file path from arguments or use default
    pub fn get_config_path(matches: &clap::ArgMatches) -> Result<PathBuf> {
        if let Some(config_path) = matches.get_one::<String>("config") {
            return Ok(PathBuf::from(config_path));
        }

        for path in DEFAULT_CONFIG_FILES.iter().map(PathBuf::from) {
            if path.exists() {
                return Ok(path);
            }
        }

        if let Ok(config_dir) = crate::utils::get_config_dir() {
            let user_config = config_dir.join("config.yaml");
            if user_config.exists() {
                return Ok(user_config);
            }
        }

        Err(anyhow!("No configuration file found. Use --config to specify a file or create one with 'jvm-tuner init'"))
    }

    /// Load configuration from file
    pub fn load_config(matches: &clap::ArgMatches) -> Result<crate::Config> {
        let config_path = get_config_path(matches)?;
        crate::Config::from_file(&config_path)
    }

    /// Create JvmTuner instance
    pub fn create_app(config: crate::Config) -> Result<crate::JvmTuner> {
        Ok(crate::JvmTuner::new(config)?)
    }

    /// The shared `--config` argument
    pub fn config_arg() -> clap::Arg {
        clap::Arg::new("config")
            .short('c')
            .long("config")
            .help("Configuration file path")
            .value_name("FILE")
    }
}

//! Init command implementation

use crate::Config;
use anyhow::{anyhow, Result};
use clap::{ArgMatches, Command};
use std::path::PathBuf;
use tracing::info;

pub fn command() -> Command {
    Command::new("init")
        .about("Initialize a new configuration file")
        .arg(
            clap::Arg::new("output")
                .short('o')
                .long("output")
                .help("Output file path")
                .value_name("FILE")
                .default_value(".jvm-tuner.yaml"),
        )
        .arg(
            clap::Arg::new("example")
                .short('e')
                .long("example")
                .help("Create example configuration")
                .action(clap::ArgAction::SetTrue),
        )
        .arg(
            clap::Arg::new("force")
                .short('f')
                .long("force")
                .help("Overwrite an existing file")
                .action(clap::ArgAction::SetTrue),
        )
}

pub async fn run(matches: &ArgMatches) -> Result<()> {
    let output_path = matches
        .get_one::<String>("output")
        .map(PathBuf::from)
        .ok_or_else(|| anyhow!("Missing output path"))?;
    let example = matches.get_flag("example");

    if output_path.exists() && !matches.get_flag("force") {
        return Err(anyhow!(
            "{} already exists, use --force to overwrite it",
            output_path.display()
        ));
    }

    info!("Initializing configuration file: {:?}", output_path);

    let config = if example {
        create_example_config()
    } else {
        Config::default()
    };

    config.save_to_file(&output_path)?;

    info!("Configuration file created: {:?}", output_path);

    if example {
        println!("Example configuration created with sample directives.");
        println!("Edit the file to match your node before running 'jvm-tuner tune'.");
    } else {
        println!("Default configuration file created.");
        println!("Set heap sizes and directives to get started.");
    }

    Ok(())
}

pub fn create_example_config() -> Config {
    let mut config = Config::default();

    config.gc_type = "CMS".to_string();
    config.heap.new_size = Some("3G".to_string());
    config.heap.size = Some("12G".to_string());
    config.directives.exclude = Some("-XX:+UseG1GC".to_string());
    config.directives.upsert =
        Some("-XX:NumberOfGCLogFiles=20,-Dcassandra.ring_delay_ms=30000".to_string());
    config.directives.inject = Some("-Dcassandra.schema_delay_ms=60000".to_string());

    config
}

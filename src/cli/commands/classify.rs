//! Classify command implementation

use crate::cli::utils;
use crate::{Config, GcAffinity, JvmOption};
use anyhow::Result;
use clap::{ArgMatches, Command};
use tracing::{info, warn};

pub fn command() -> Command {
    Command::new("classify")
        .about("Show which garbage collector each option belongs to")
        .arg(utils::config_arg())
        .arg(
            clap::Arg::new("options")
                .help("Options to classify (defaults to every option in the templates)")
                .value_name("OPTION")
                .num_args(0..)
                .allow_hyphen_values(true),
        )
        .arg(
            clap::Arg::new("tagged-only")
                .long("tagged-only")
                .help("Only list options tied to a collector")
                .action(clap::ArgAction::SetTrue),
        )
}

pub async fn run(matches: &ArgMatches) -> Result<()> {
    let config = match utils::load_config(matches) {
        Ok(config) => config,
        Err(e) => {
            warn!("Using default configuration: {}", e);
            Config::default()
        }
    };
    let app = utils::create_app(config)?;

    let names: Vec<String> = match matches.get_many::<String>("options") {
        Some(values) => values.cloned().collect(),
        None => {
            info!("Classifying options from templates");
            let templates = app.load_templates().await?;
            template_option_names(&[
                templates.options.as_str(),
                templates.version_options.as_str(),
            ])
        }
    };

    let tagged_only = matches.get_flag("tagged-only");
    for (name, affinity) in app.classify(names.iter().map(String::as_str)) {
        if tagged_only && affinity == GcAffinity::Universal {
            continue;
        }
        println!("{affinity:>10}  {name}");
    }

    Ok(())
}

/// Distinct option names in template order
fn template_option_names(templates: &[&str]) -> Vec<String> {
    let mut names: Vec<String> = Vec::new();
    for option in templates
        .iter()
        .flat_map(|template| template.lines())
        .filter_map(JvmOption::parse)
    {
        if !names.iter().any(|name| name == option.name()) {
            names.push(option.name().to_string());
        }
    }
    names
}

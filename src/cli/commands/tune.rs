//! Tune command implementation

use crate::cli::utils;
use crate::{Config, Filter, JvmTuner, TunedOptions};
use anyhow::Result;
use clap::{ArgMatches, Command};
use tracing::info;

pub fn command() -> Command {
    Command::new("tune")
        .about("Tune the JVM options files")
        .arg(utils::config_arg())
        .arg(
            clap::Arg::new("gc-type")
                .short('g')
                .long("gc-type")
                .help("Garbage collector to tune for (CMS or G1GC)")
                .value_name("GC"),
        )
        .arg(
            clap::Arg::new("heap-size")
                .long("heap-size")
                .help("Max and initial heap size (-Xmx / -Xms)")
                .value_name("SIZE"),
        )
        .arg(
            clap::Arg::new("heap-new-size")
                .long("heap-new-size")
                .help("Young generation size (-Xmn)")
                .value_name("SIZE"),
        )
        .arg(
            clap::Arg::new("exclude")
                .long("exclude")
                .help("Comma separated options to disable")
                .value_name("OPTIONS")
                .allow_hyphen_values(true),
        )
        .arg(
            clap::Arg::new("upsert")
                .long("upsert")
                .help("Comma separated options to enable or replace")
                .value_name("OPTIONS")
                .allow_hyphen_values(true),
        )
        .arg(
            clap::Arg::new("inject")
                .long("inject")
                .help("Raw text appended to the general options")
                .value_name("TEXT")
                .allow_hyphen_values(true),
        )
        .arg(
            clap::Arg::new("dry-run")
                .long("dry-run")
                .help("Print the tuned options instead of writing files")
                .action(clap::ArgAction::SetTrue),
        )
        .arg(
            clap::Arg::new("format")
                .long("format")
                .help("Output format for --dry-run")
                .value_parser(["text", "json"])
                .default_value("text"),
        )
        .arg(
            clap::Arg::new("active-only")
                .long("active-only")
                .help("Leave commented options out of the output")
                .action(clap::ArgAction::SetTrue),
        )
}

pub async fn run(matches: &ArgMatches) -> Result<()> {
    info!("Starting JVM options tuning");

    let mut config = utils::load_config(matches)?;
    apply_overrides(&mut config, matches);

    let app = utils::create_app(config)?;
    let tuned = app.tune().await?;

    if matches.get_flag("dry-run") {
        info!("Dry run mode - no files will be written");
        let filter = if app.config().output.active_only {
            Filter::ActiveOnly
        } else {
            Filter::All
        };

        match matches.get_one::<String>("format").map(String::as_str) {
            Some("json") => println!("{}", JvmTuner::to_json(&tuned, filter)?),
            _ => print_text(&tuned, filter),
        }
        return Ok(());
    }

    let summary = app.write_options(&tuned).await?;

    println!("JVM options tuned for {}", app.config().gc()?);
    println!(
        "  {} lines -> {}",
        summary.options_lines,
        summary.options_path.display()
    );
    println!(
        "  {} lines -> {}",
        summary.version_options_lines,
        summary.version_options_path.display()
    );

    Ok(())
}

/// Command line values take precedence over the configuration file
pub fn apply_overrides(config: &mut Config, matches: &ArgMatches) {
    if let Some(gc_type) = matches.get_one::<String>("gc-type") {
        config.gc_type = gc_type.clone();
    }
    if let Some(size) = matches.get_one::<String>("heap-size") {
        config.heap.size = Some(size.clone());
    }
    if let Some(size) = matches.get_one::<String>("heap-new-size") {
        config.heap.new_size = Some(size.clone());
    }
    if let Some(exclude) = matches.get_one::<String>("exclude") {
        config.directives.exclude = Some(exclude.clone());
    }
    if let Some(upsert) = matches.get_one::<String>("upsert") {
        config.directives.upsert = Some(upsert.clone());
    }
    if let Some(inject) = matches.get_one::<String>("inject") {
        config.directives.inject = Some(inject.clone());
    }
    if matches.get_flag("active-only") {
        config.output.active_only = true;
    }
}

fn print_text(tuned: &TunedOptions, filter: Filter) {
    println!("# configuredJVMOptions");
    for line in tuned.option_lines(filter) {
        println!("{line}");
    }
    println!();
    println!("# configuredJVMVersionOptions");
    for line in tuned.version_option_lines(filter) {
        println!("{line}");
    }
}

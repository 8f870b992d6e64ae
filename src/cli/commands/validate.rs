//! Validate command implementation

use crate::cli::utils;
use crate::GcType;
use anyhow::Result;
use clap::{ArgMatches, Command};
use jvm_options::DirectiveSet;
use tracing::info;

pub fn command() -> Command {
    Command::new("validate")
        .about("Validate configuration file")
        .arg(utils::config_arg())
}

pub async fn run(matches: &ArgMatches) -> Result<()> {
    info!("Validating configuration file");

    let config = utils::load_config(matches)?;
    let exclude = DirectiveSet::parse(config.directives.exclude.as_deref());
    let upsert = DirectiveSet::parse(config.directives.upsert.as_deref());

    println!("Configuration file is valid!");
    println!("Version: {}", config.version);
    println!("GC type: {}", config.gc()?);
    println!(
        "Heap: new size {}, size {}",
        config.heap.new_size.as_deref().unwrap_or("(template)"),
        config.heap.size.as_deref().unwrap_or("(template)")
    );
    let rules = config.gc_rules.build();
    for gc in [GcType::Cms, GcType::G1gc] {
        println!("{} options: {}", gc, rules.options_for(gc).join(", "));
    }
    println!("Exclude directives: {}", exclude.len());
    println!("Upsert directives: {}", upsert.len());

    let conflicts: Vec<&str> = upsert
        .iter()
        .map(|option| option.name())
        .filter(|name| exclude.contains(name))
        .collect();
    for name in conflicts {
        println!("  - {name} is both upserted and excluded; it will stay excluded");
    }

    println!("Output: {:?}, {:?}", config.output.options, config.output.version_options);

    Ok(())
}

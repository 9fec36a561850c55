use std::path::Path;

use anyhow::{Result, bail};
use clap::Parser;

use puzzle_checker::config::{Args, Command, Config};
use puzzle_checker::family::FamilyRegistry;
use puzzle_checker::{generator, runner};

fn main() -> Result<()> {
    env_logger::init();

    let args = Args::parse();
    let config = Config::from_args(&args)?;

    match args.command {
        Command::Check { family, directory } => check(&config, &family, &directory),
        Command::Generate {
            size,
            with_result,
            output,
        } => generate(size, with_result, &output),
    }
}

fn check(config: &Config, family_name: &str, directory: &Path) -> Result<()> {
    let mut registry = FamilyRegistry::with_embedded();
    for dir in &config.family_dirs {
        registry.load_directory(dir)?;
    }

    let Some(family) = registry.get(family_name) else {
        bail!(
            "unknown family '{}' (known families: {})",
            family_name,
            registry.list().join(", ")
        );
    };

    let report = runner::run_directory(family, directory)?;
    report.print();

    if report.has_violations() {
        std::process::exit(1);
    }
    Ok(())
}

fn generate(size: usize, with_result: bool, output: &Path) -> Result<()> {
    let mut rng = rand::thread_rng();
    let chart = generator::write_instance(output, size, with_result, &mut rng)?;

    println!("Wrote a {0}x{0} instance to {1}", size, output.display());
    log::debug!("tips: rows={:?} columns={:?}", chart.rows, chart.columns);
    Ok(())
}

use anyhow::Context;
use colored::*;
use sradl::cli::{commands, Action, Cli};
use std::process;
use tracing_subscriber::EnvFilter;

fn main() {
    let cli = Cli::parse_normalized();

    // RUST_LOG wins, then SRADL_LOG, then the -v default
    let default_level = if cli.verbose { "debug" } else { "info" };
    let log_level = std::env::var("SRADL_LOG").unwrap_or_else(|_| default_level.to_string());

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&log_level)),
        )
        .with_writer(std::io::stderr)
        .init();

    if let Err(e) = run(cli) {
        eprintln!("{} {:#}", "Error:".red().bold(), e);

        let exit_code = e
            .downcast_ref::<sradl::SradlError>()
            .map(|err| err.exit_code())
            .unwrap_or(1);
        process::exit(exit_code);
    }
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let settings = sradl::load_settings(&cli.inp).context("Could not read the input file")?;

    if cli.verbose {
        commands::show_settings(&settings);
    }

    match cli.action() {
        Action::Download => commands::download::run(&settings, cli.dry_run),
        Action::Rename => commands::rename::run(&settings, &cli.dir, cli.dry_run),
    }
}

// ABOUTME: Entry point for the skylift CLI application.
// ABOUTME: Parses arguments and dispatches to appropriate command handlers.

mod cli;

use clap::Parser;
use cli::{Cli, Commands};
use skylift::config::{self, DeployConfig};
use skylift::deploy::rearrange;
use skylift::error::Result;
use skylift::output::{Output, OutputMode};
use skylift::package::{Package, StagingArea};
use std::env;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

fn main() {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("warn")
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .init();

    let mut output = Output::new(OutputMode::Normal);
    output.start_timer();

    if let Err(e) = run(cli, &output) {
        output.error(&e.to_string());
        std::process::exit(1);
    }
}

fn run(cli: Cli, output: &Output) -> Result<()> {
    match cli.command {
        Commands::Init { app_id, force } => init(app_id.as_deref(), force, output),
        Commands::Modules { package } => modules(package, output),
        Commands::Check => check(output),
    }
}

fn init(app_id: Option<&str>, force: bool, output: &Output) -> Result<()> {
    let cwd = env::current_dir()?;
    config::init_config(&cwd, app_id, force)?;
    output.success(&format!("Wrote {}", config::CONFIG_FILENAME));
    Ok(())
}

/// Rearrange a package and print its module registry.
fn modules(path: PathBuf, output: &Output) -> Result<()> {
    let package = Package::open(&path)?;
    output.progress(&format!("Rearranging {}", package.name()));

    let staging = StagingArea::new()?;
    let registry = rearrange(&package, &staging)?;

    for (name, source) in registry.iter() {
        let relative = source
            .strip_prefix(staging.root())
            .unwrap_or(source)
            .display();
        output.console(&format!("{name}\t{relative}"));
    }
    Ok(())
}

/// Validate the discovered configuration and resolve credentials.
fn check(output: &Output) -> Result<()> {
    let cwd = env::current_dir()?;
    let config = DeployConfig::discover(&cwd)?;
    config.validate()?;

    let credentials = config.resolve_credentials()?;
    let mode = match credentials {
        config::Credentials::Token(_) => "oauth2 token",
        config::Credentials::Password { .. } => "user id + password",
    };

    output.console(&format!("Server: {}", config.effective_server()));
    output.success(&format!("Configuration OK (credentials: {mode})"));
    Ok(())
}

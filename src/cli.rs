// ABOUTME: Command-line interface definition using clap derive macros.
// ABOUTME: Defines all subcommands and their arguments.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "skylift")]
#[command(about = "Deployment orchestration for App Engine-style hosting platforms")]
#[command(version)]
pub struct Cli {
    /// Enable debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Initialize a new skylift.yml configuration file
    Init {
        /// Application id to pre-fill
        #[arg(long)]
        app_id: Option<String>,

        /// Overwrite an existing configuration file
        #[arg(long)]
        force: bool,
    },

    /// List the deployable modules of a package
    Modules {
        /// Path to the exploded package directory
        package: PathBuf,
    },

    /// Validate the configuration and resolve credentials
    Check,
}

//! Command-line interface definitions.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

/// School directory server and client
#[derive(Parser, Debug)]
#[command(name = "schoolyard")]
#[command(version)]
pub struct Cli {
    /// Configuration file (defaults to ./config.toml when present)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Color output mode [auto, always, never]
    #[arg(
        long,
        global = true,
        default_value = "auto",
        hide_possible_values = true
    )]
    pub color: ColorChoice,

    /// JSON output for scripting
    #[arg(long, global = true)]
    pub json: bool,

    /// Decrease output verbosity
    #[arg(short, long, global = true)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Color output mode for terminal rendering.
#[derive(Clone, Debug, Default, clap::ValueEnum)]
pub enum ColorChoice {
    /// Detect automatically
    #[default]
    Auto,
    /// Always use colors
    Always,
    /// Never use colors
    Never,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run the HTTP API
    Serve(ServeArgs),

    /// List or register schools through a running server
    #[command(subcommand)]
    Schools(SchoolsCommand),

    /// Create or upgrade the database schema
    Migrate,

    /// Manage configuration
    #[command(subcommand)]
    Config(ConfigCommand),
}

#[derive(Args, Debug, Default)]
pub struct ServeArgs {
    /// Override `[server].host`
    #[arg(long)]
    pub host: Option<String>,

    /// Override `[server].port`
    #[arg(long)]
    pub port: Option<u16>,
}

#[derive(Subcommand, Debug)]
pub enum SchoolsCommand {
    /// Show registered schools, newest first
    List(ListArgs),
    /// Register a school
    Add(AddArgs),
}

#[derive(Args, Debug)]
pub struct ApiArg {
    /// Server URL (overrides `[client].base_url`)
    #[arg(long)]
    pub url: Option<String>,
}

#[derive(Args, Debug)]
pub struct ListArgs {
    /// Case-insensitive filter over name, city, and address
    #[arg(short, long)]
    pub search: Option<String>,

    #[command(flatten)]
    pub api: ApiArg,
}

#[derive(Args, Debug)]
pub struct AddArgs {
    #[arg(long)]
    pub name: String,

    #[arg(long)]
    pub address: String,

    #[arg(long)]
    pub city: String,

    #[arg(long)]
    pub state: String,

    /// 10-digit contact number
    #[arg(long)]
    pub contact: String,

    #[arg(long = "email")]
    pub email_id: String,

    /// Image file (jpeg, png, gif, or webp)
    #[arg(long)]
    pub image: Option<PathBuf>,

    #[command(flatten)]
    pub api: ApiArg,
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommand {
    /// Write a commented configuration file
    Init(ConfigInitArgs),
    /// Display the effective configuration with defaults applied
    Show,
    /// Validate the configuration file
    Validate,
}

#[derive(Args, Debug)]
pub struct ConfigInitArgs {
    /// Destination path
    #[arg(default_value = "config.toml")]
    pub path: PathBuf,

    /// Overwrite an existing file
    #[arg(long)]
    pub force: bool,
}

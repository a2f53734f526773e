//! Command dispatch.

use std::path::{Path, PathBuf};

use super::command::{Cli, ColorChoice, Commands, ConfigCommand, SchoolsCommand};
use super::output::{self, OutputConfig};
use super::{config, migrate, schools, serve};
use crate::error::Result;
use crate::infrastructure::config::settings::Config;

/// Config file read when `--config` is not given.
pub const DEFAULT_CONFIG_PATH: &str = "config.toml";

fn apply_color(choice: &ColorChoice) {
    match choice {
        ColorChoice::Auto => owo_colors::unset_override(),
        ColorChoice::Always => owo_colors::set_override(true),
        ColorChoice::Never => owo_colors::set_override(false),
    }
}

/// An explicit `--config` must exist; the default path is optional.
fn load_config(path: Option<&Path>) -> Result<(Config, String)> {
    match path {
        Some(path) => Ok((Config::load(path)?, path.display().to_string())),
        None => {
            let default = PathBuf::from(DEFAULT_CONFIG_PATH);
            let source = if default.exists() {
                DEFAULT_CONFIG_PATH.to_string()
            } else {
                "defaults".to_string()
            };
            Ok((Config::load_or_default(&default)?, source))
        }
    }
}

/// Run a parsed command line.
pub async fn run(cli: Cli) -> Result<()> {
    apply_color(&cli.color);
    output::configure(OutputConfig::new(cli.json, cli.quiet));

    if let Commands::Config(ConfigCommand::Init(args)) = &cli.command {
        return config::execute_init(&args.path, args.force);
    }

    let (config, source) = load_config(cli.config.as_deref())?;

    match &cli.command {
        Commands::Serve(args) => {
            config.init_logging();
            serve::execute(config, args).await
        }
        Commands::Schools(SchoolsCommand::List(args)) => {
            schools::execute_list(&config, args).await
        }
        Commands::Schools(SchoolsCommand::Add(args)) => schools::execute_add(&config, args).await,
        Commands::Migrate => {
            config.init_logging();
            migrate::execute(&config)
        }
        Commands::Config(ConfigCommand::Show) => config::execute_show(&config),
        Commands::Config(ConfigCommand::Validate) => config::execute_validate(&source),
        Commands::Config(ConfigCommand::Init(args)) => config::execute_init(&args.path, args.force),
    }
}

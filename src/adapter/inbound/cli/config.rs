//! Handler for the `config` command group.

use std::fs;
use std::path::Path;

use serde_json::json;

use crate::adapter::inbound::cli::output;
use crate::error::{ConfigError, Result};
use crate::infrastructure::config::settings::Config;

/// Default config template with documentation.
const CONFIG_TEMPLATE: &str = include_str!("../../../../config.toml.example");

/// Execute `config init`.
pub fn execute_init(path: &Path, force: bool) -> Result<()> {
    if path.exists() && !force {
        return Err(ConfigError::InvalidValue {
            field: "config",
            reason: "file already exists (use --force to overwrite)".to_string(),
        }
        .into());
    }

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }

    fs::write(path, CONFIG_TEMPLATE)?;
    if output::is_json() {
        output::document("config.init", json!({ "path": path.display().to_string() }));
        return Ok(());
    }
    output::success("Created configuration file");
    output::field("Path", path.display());
    output::note(&format!(
        "Start the server with: schoolyard serve -c {}",
        path.display()
    ));
    Ok(())
}

/// Execute `config show`.
pub fn execute_show(config: &Config) -> Result<()> {
    if output::is_json() {
        output::document(
            "config.show",
            json!({ "config": config }),
        );
        return Ok(());
    }

    output::section("Server");
    output::field("Address", config.server.socket_addr()?);
    output::field("CORS", if config.server.cors { "enabled" } else { "disabled" });

    output::section("Database");
    output::field("URL", config.database.connection_url());
    output::field("Connections", config.database.max_connections);
    output::field("Busy timeout", format!("{}ms", config.database.busy_timeout_ms));

    output::section("Uploads");
    output::field("Directory", config.uploads.dir.display());
    output::field("Public path", &config.uploads.public_path);
    output::field("Max size", format!("{} bytes", config.uploads.max_bytes));
    output::field("Types", config.uploads.allowed_types.join(", "));

    output::section("Logging");
    output::field("Level", &config.logging.level);
    output::field("Format", &config.logging.format);

    output::section("Client");
    output::field("Base URL", &config.client.base_url);
    output::field(
        "Success timeout",
        format!("{}ms", config.client.success_timeout_ms),
    );
    Ok(())
}

/// Execute `config validate`. Loading already validated; this reports it.
pub fn execute_validate(source: &str) -> Result<()> {
    if output::is_json() {
        output::document(
            "config.validate",
            json!({
                "source": source,
                "valid": true,
            }),
        );
    } else {
        output::success("Configuration is valid");
        output::field("Source", source);
    }
    Ok(())
}

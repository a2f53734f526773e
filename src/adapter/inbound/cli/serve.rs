//! Handler for `serve`.

use serde_json::json;

use crate::adapter::inbound::cli::command::ServeArgs;
use crate::adapter::inbound::cli::output;
use crate::error::Result;
use crate::infrastructure::bootstrap;
use crate::infrastructure::config::settings::Config;

/// Execute `serve`.
pub async fn execute(mut config: Config, args: &ServeArgs) -> Result<()> {
    if let Some(host) = &args.host {
        config.server.host.clone_from(host);
    }
    if let Some(port) = args.port {
        config.server.port = port;
    }
    let addr = config.server.socket_addr()?;

    if output::is_json() {
        output::document(
            "serve",
            json!({
                "address": addr.to_string(),
                "database": config.database.connection_url(),
                "uploads": config.uploads.dir.display().to_string(),
            }),
        );
    } else {
        output::banner(addr);
        output::field("Database", config.database.connection_url());
        output::field("Uploads", config.uploads.dir.display());
    }

    bootstrap::run_server(&config).await
}

//! Handler for `migrate`.

use serde_json::json;

use crate::adapter::inbound::cli::output;
use crate::error::Result;
use crate::infrastructure::bootstrap::open_database;
use crate::infrastructure::config::settings::Config;

/// Execute `migrate`.
pub fn execute(config: &Config) -> Result<()> {
    open_database(&config.database)?;

    if output::is_json() {
        output::document(
            "migrate",
            json!({
                "database": config.database.connection_url(),
            }),
        );
    } else {
        output::success("Database schema is up to date");
        output::field("Database", config.database.connection_url());
    }
    Ok(())
}

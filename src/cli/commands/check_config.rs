use colored::Colorize;

use crate::cli::{context, output};
use crate::config::app_config::{AppConfig, DataApiSource};
use crate::core::errors::Result;

/// Execute the `marketplace-admin check-config` command.
pub fn execute(api_token: Option<&str>) -> Result<()> {
    let path = context::config_path();
    let config = AppConfig::load(path)?;
    let source = config.data_api_source(api_token)?;

    output::header("Configuration");
    output::success(&format!("Loaded {}", path.display()));
    println!("  Bind: {}", config.server.bind.cyan());
    match &source {
        DataApiSource::Http {
            base_url, timeout, ..
        } => println!(
            "  Data API: {} (timeout {}s)",
            base_url.cyan(),
            timeout.as_secs()
        ),
        DataApiSource::Fixture(fixture) => {
            println!("  Data API: fixture {}", fixture.display().to_string().cyan());
            if !fixture.exists() {
                output::warning("Fixture file does not exist yet");
            }
        }
    }
    println!(
        "  Identity headers: {} / {}",
        config.identity.email_header.cyan(),
        config.identity.role_header.cyan()
    );
    Ok(())
}

use crate::adapters::clock::system_clock::SystemClock;
use crate::cli::output;
use crate::core::errors::Result;
use crate::web::router::App;
use crate::web::server;

/// Execute the `marketplace-admin serve` command.
///
/// Blocks serving requests until the process is stopped.
pub fn execute(bind: Option<&str>, api_token: Option<&str>) -> Result<()> {
    let (config, api) = super::load_and_connect(api_token)?;
    let bind = bind.unwrap_or(&config.server.bind).to_string();

    let app = App::new(api, Box::new(SystemClock), config.identity.clone())?;
    output::success(&format!("Admin listening on http://{bind}/admin"));
    server::serve(&app, &bind)
}

pub mod check_config;
pub mod export;
pub mod serve;

use crate::adapters::data_api;
use crate::cli::context;
use crate::config::app_config::AppConfig;
use crate::core::errors::Result;
use crate::core::traits::data_api::DataApiClient;

/// Load the config chosen at startup and connect to its data API.
fn load_and_connect(api_token: Option<&str>) -> Result<(AppConfig, Box<dyn DataApiClient>)> {
    let config = AppConfig::load(context::config_path())?;
    let source = config.data_api_source(api_token)?;
    let api = data_api::connect(&source)?;
    Ok((config, api))
}

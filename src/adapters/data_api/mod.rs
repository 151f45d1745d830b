pub mod fixture_client;
pub mod http_client;

use crate::config::app_config::DataApiSource;
use crate::core::errors::Result;
use crate::core::traits::data_api::DataApiClient;

use fixture_client::FixtureDataApi;
use http_client::HttpDataApi;

/// Build the data API client for a resolved source.
pub fn connect(source: &DataApiSource) -> Result<Box<dyn DataApiClient>> {
    match source {
        DataApiSource::Http {
            base_url,
            auth_token,
            timeout,
        } => {
            tracing::debug!(base_url, "using HTTP data API");
            Ok(Box::new(HttpDataApi::new(base_url, auth_token, *timeout)?))
        }
        DataApiSource::Fixture(path) => {
            tracing::debug!(path = %path.display(), "using fixture data API");
            Ok(Box::new(FixtureDataApi::load(path)?))
        }
    }
}

use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::adapters::data_api::http_client::DEFAULT_TIMEOUT;
use crate::core::errors::{AdminError, Result};

/// Default config file name, looked up in the working directory first.
pub const CONFIG_FILE_NAME: &str = "admin.toml";

/// Top-level configuration read from `admin.toml`.
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerSection,
    pub data_api: DataApiSection,
    #[serde(default)]
    pub identity: IdentitySection,
}

/// Where the data API lives, after validation.
#[derive(Debug, Clone, PartialEq)]
pub enum DataApiSource {
    Http {
        base_url: String,
        auth_token: String,
        timeout: Duration,
    },
    Fixture(PathBuf),
}

impl AppConfig {
    /// Load and validate the configuration at `path`.
    ///
    /// A relative `fixture` path is resolved against the directory the
    /// config file lives in.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(AdminError::ConfigNotFound {
                path: path.to_path_buf(),
            });
        }
        let content = std::fs::read_to_string(path)?;
        let mut config = Self::parse(&content)?;

        if let Some(fixture) = &config.data_api.fixture
            && fixture.is_relative()
            && let Some(dir) = path.parent()
        {
            config.data_api.fixture = Some(dir.join(fixture));
        }
        Ok(config)
    }

    pub fn parse(content: &str) -> Result<Self> {
        let config: Self = toml::from_str(content).map_err(|e| AdminError::InvalidConfig {
            detail: format!("Failed to parse config: {e}"),
        })?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        match (&self.data_api.base_url, &self.data_api.fixture) {
            (Some(_), Some(_)) => {
                return Err(AdminError::InvalidConfig {
                    detail: "[data_api] sets both base_url and fixture".into(),
                });
            }
            (None, None) => {
                return Err(AdminError::InvalidConfig {
                    detail: "[data_api] sets neither base_url nor fixture".into(),
                });
            }
            _ => {}
        }
        if let Some(url) = &self.data_api.base_url
            && !(url.starts_with("http://") || url.starts_with("https://"))
        {
            return Err(AdminError::InvalidConfig {
                detail: format!("[data_api] base_url '{url}' is not an http(s) URL"),
            });
        }
        if self.identity.email_header.trim().is_empty()
            || self.identity.role_header.trim().is_empty()
        {
            return Err(AdminError::InvalidConfig {
                detail: "[identity] header names must not be empty".into(),
            });
        }
        Ok(())
    }

    /// Resolve the data API source. `token_override` (from the command
    /// line or environment) wins over the file's `auth_token`.
    pub fn data_api_source(&self, token_override: Option<&str>) -> Result<DataApiSource> {
        if let Some(fixture) = &self.data_api.fixture {
            return Ok(DataApiSource::Fixture(fixture.clone()));
        }
        let base_url = self.data_api.base_url.clone().unwrap_or_default();
        let auth_token = token_override
            .map(str::to_string)
            .or_else(|| self.data_api.auth_token.clone())
            .ok_or_else(|| AdminError::InvalidConfig {
                detail: "no data API token: set [data_api] auth_token or \
                         MARKETPLACE_ADMIN_API_TOKEN"
                    .into(),
            })?;
        Ok(DataApiSource::Http {
            base_url,
            auth_token,
            timeout: Duration::from_secs(self.data_api.timeout_secs),
        })
    }
}

/// Config path to use when `--config` is not given: `./admin.toml` if it
/// exists, otherwise the per-user config directory.
pub fn default_config_path() -> PathBuf {
    let local = PathBuf::from(CONFIG_FILE_NAME);
    if local.exists() {
        return local;
    }
    dirs::config_dir()
        .map(|d| d.join("marketplace-admin").join(CONFIG_FILE_NAME))
        .unwrap_or(local)
}

/// The `[server]` section.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerSection {
    #[serde(default = "default_bind")]
    pub bind: String,
}

impl Default for ServerSection {
    fn default() -> Self {
        Self {
            bind: default_bind(),
        }
    }
}

fn default_bind() -> String {
    "127.0.0.1:8080".to_string()
}

/// The `[data_api]` section. Exactly one of `base_url` and `fixture`.
#[derive(Debug, Clone, Deserialize)]
pub struct DataApiSection {
    pub base_url: Option<String>,
    pub auth_token: Option<String>,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    pub fixture: Option<PathBuf>,
}

fn default_timeout_secs() -> u64 {
    DEFAULT_TIMEOUT.as_secs()
}

/// The `[identity]` section: request headers set by the signing-in proxy.
#[derive(Debug, Clone, Deserialize)]
pub struct IdentitySection {
    #[serde(default = "default_email_header")]
    pub email_header: String,
    #[serde(default = "default_role_header")]
    pub role_header: String,
}

impl Default for IdentitySection {
    fn default() -> Self {
        Self {
            email_header: default_email_header(),
            role_header: default_role_header(),
        }
    }
}

fn default_email_header() -> String {
    "X-Admin-Email".to_string()
}

fn default_role_header() -> String {
    "X-Admin-Role".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn minimal_http_config_uses_defaults() {
        let config = AppConfig::parse(
            "[data_api]\nbase_url = \"http://localhost:5000\"\nauth_token = \"secret\"\n",
        )
        .unwrap();

        assert_eq!(config.server.bind, "127.0.0.1:8080");
        assert_eq!(config.identity.role_header, "X-Admin-Role");
        assert_eq!(
            config.data_api_source(None).unwrap(),
            DataApiSource::Http {
                base_url: "http://localhost:5000".into(),
                auth_token: "secret".into(),
                timeout: Duration::from_secs(30),
            }
        );
    }

    #[test]
    fn token_override_wins() {
        let config = AppConfig::parse(
            "[data_api]\nbase_url = \"https://api.example\"\nauth_token = \"file\"\n",
        )
        .unwrap();
        match config.data_api_source(Some("env")).unwrap() {
            DataApiSource::Http { auth_token, .. } => assert_eq!(auth_token, "env"),
            other => panic!("unexpected source {other:?}"),
        }
    }

    #[test]
    fn http_without_token_is_rejected() {
        let config = AppConfig::parse("[data_api]\nbase_url = \"https://api.example\"\n").unwrap();
        assert!(config.data_api_source(None).is_err());
    }

    #[test]
    fn both_or_neither_source_is_invalid() {
        let both = "[data_api]\nbase_url = \"https://api\"\nfixture = \"api.json\"\n";
        let neither = "[data_api]\ntimeout_secs = 5\n";
        assert!(matches!(
            AppConfig::parse(both),
            Err(AdminError::InvalidConfig { .. })
        ));
        assert!(matches!(
            AppConfig::parse(neither),
            Err(AdminError::InvalidConfig { .. })
        ));
    }

    #[test]
    fn non_http_base_url_is_invalid() {
        let err = AppConfig::parse("[data_api]\nbase_url = \"ftp://api\"\n").unwrap_err();
        assert!(err.to_string().contains("ftp://api"));
    }

    #[test]
    fn empty_identity_header_is_invalid() {
        let content = "[data_api]\nfixture = \"api.json\"\n[identity]\nrole_header = \"\"\n";
        assert!(AppConfig::parse(content).is_err());
    }

    #[test]
    fn relative_fixture_resolves_against_config_dir() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("admin.toml");
        std::fs::write(&path, "[data_api]\nfixture = \"api.json\"\n").unwrap();

        let config = AppConfig::load(&path).unwrap();
        assert_eq!(
            config.data_api_source(None).unwrap(),
            DataApiSource::Fixture(tmp.path().join("api.json"))
        );
    }

    #[test]
    fn missing_file_is_reported() {
        let err = AppConfig::load(Path::new("/nonexistent/admin.toml")).unwrap_err();
        assert!(matches!(err, AdminError::ConfigNotFound { .. }));
    }
}

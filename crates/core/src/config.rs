//! Export configuration.
//!
//! Loaded from a small TOML file with environment overrides layered on top.
//! The service-account key must carry the Sheets, Drive, and Docs scopes;
//! acquiring tokens from it happens behind the adapters' token seam.

use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

pub const ENV_SERVICE_ACCOUNT_KEY_PATH: &str = "WAYPOINT_SERVICE_ACCOUNT_KEY_PATH";
pub const ENV_SHARE_WITH_EMAIL: &str = "WAYPOINT_SHARE_WITH_EMAIL";

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ExportConfig {
    /// Path to the service-account key JSON. Exports refuse to start any
    /// remote mutation while this is unset.
    pub service_account_key_path: Option<PathBuf>,
    /// Email granted writer access on every created file. Optional; sharing
    /// failures downgrade to warnings.
    pub share_with_email: Option<String>,
    pub endpoints: Endpoints,
}

/// Base URLs for the Google APIs, overridable for tests and proxies.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
pub struct Endpoints {
    pub docs: Option<String>,
    pub sheets: Option<String>,
    pub drive: Option<String>,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("could not read config file `{path}`: {source}")]
    ReadFile { path: PathBuf, source: std::io::Error },
    #[error("could not parse config file: {0}")]
    Parse(#[from] toml::de::Error),
}

#[derive(Debug, Default, Deserialize)]
struct ExportConfigFile {
    service_account_key_path: Option<PathBuf>,
    share_with_email: Option<String>,
    #[serde(default)]
    endpoints: Endpoints,
}

impl ExportConfig {
    pub fn from_toml_str(raw: &str) -> Result<Self, ConfigError> {
        let file: ExportConfigFile = toml::from_str(raw)?;
        Ok(Self {
            service_account_key_path: file.service_account_key_path,
            share_with_email: file.share_with_email,
            endpoints: file.endpoints,
        })
    }

    pub fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let raw = fs::read_to_string(path)
            .map_err(|source| ConfigError::ReadFile { path: path.to_path_buf(), source })?;
        Self::from_toml_str(&raw)
    }

    /// Layer process environment variables over the loaded values.
    pub fn overlay_env(self) -> Self {
        self.overlay_with(|key| env::var(key).ok())
    }

    /// Same as [`overlay_env`](Self::overlay_env) but with an injectable
    /// lookup, which keeps tests off the process environment.
    pub fn overlay_with(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        if let Some(path) = lookup(ENV_SERVICE_ACCOUNT_KEY_PATH).filter(|v| !v.is_empty()) {
            self.service_account_key_path = Some(PathBuf::from(path));
        }
        if let Some(email) = lookup(ENV_SHARE_WITH_EMAIL).filter(|v| !v.is_empty()) {
            self.share_with_email = Some(email);
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use super::{ExportConfig, ENV_SERVICE_ACCOUNT_KEY_PATH, ENV_SHARE_WITH_EMAIL};
    use std::path::PathBuf;

    #[test]
    fn parses_a_full_config_file() {
        let config = ExportConfig::from_toml_str(
            r#"
            service_account_key_path = "/etc/waypoint/key.json"
            share_with_email = "traveler@example.com"

            [endpoints]
            docs = "http://localhost:9000"
            "#,
        )
        .expect("valid toml");

        assert_eq!(
            config.service_account_key_path,
            Some(PathBuf::from("/etc/waypoint/key.json"))
        );
        assert_eq!(config.share_with_email.as_deref(), Some("traveler@example.com"));
        assert_eq!(config.endpoints.docs.as_deref(), Some("http://localhost:9000"));
        assert_eq!(config.endpoints.sheets, None);
    }

    #[test]
    fn empty_file_yields_defaults() {
        let config = ExportConfig::from_toml_str("").expect("empty toml is valid");
        assert_eq!(config, ExportConfig::default());
    }

    #[test]
    fn env_overrides_win_over_file_values() {
        let config = ExportConfig::from_toml_str(r#"share_with_email = "file@example.com""#)
            .expect("valid toml")
            .overlay_with(|key| match key {
                ENV_SERVICE_ACCOUNT_KEY_PATH => Some("/run/key.json".to_owned()),
                ENV_SHARE_WITH_EMAIL => Some("env@example.com".to_owned()),
                _ => None,
            });

        assert_eq!(config.service_account_key_path, Some(PathBuf::from("/run/key.json")));
        assert_eq!(config.share_with_email.as_deref(), Some("env@example.com"));
    }

    #[test]
    fn blank_env_values_do_not_clobber_file_values() {
        let config = ExportConfig::from_toml_str(r#"share_with_email = "file@example.com""#)
            .expect("valid toml")
            .overlay_with(|key| (key == ENV_SHARE_WITH_EMAIL).then(String::new));

        assert_eq!(config.share_with_email.as_deref(), Some("file@example.com"));
    }

    #[test]
    fn unreadable_file_reports_the_path() {
        let error = ExportConfig::load_from_file(std::path::Path::new(
            "/nonexistent/waypoint/export.toml",
        ))
        .expect_err("missing file");
        assert!(error.to_string().contains("/nonexistent/waypoint/export.toml"));
    }
}

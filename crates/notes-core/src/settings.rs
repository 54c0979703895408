//! Runtime settings loaded from a static `settings.json` resource.
//!
//! Settings are fetched on every user action; nothing is cached. The location
//! is either an `http(s)://` URL, fetched through the same `Transport` as the
//! API, or a local file path.

use std::sync::Arc;

use serde::Deserialize;
use tracing::debug;

use crate::api::transport::{HttpRequest, Transport};
use crate::error::ConfigError;

/// Settings resource location, relative to the notes page
pub const DEFAULT_SETTINGS_LOCATION: &str = "../settings.json";

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Settings {
    pub api_base_url: String,
}

impl Settings {
    pub fn new(api_base_url: impl Into<String>) -> Self {
        Self {
            api_base_url: api_base_url.into(),
        }
    }

    /// Base URL with any trailing slashes removed.
    pub fn base_url(&self) -> &str {
        self.api_base_url.trim_end_matches('/')
    }

    /// `{base}/notes`
    pub fn notes_url(&self) -> String {
        format!("{}/notes", self.base_url())
    }

    /// `{base}/notes/{id}`
    pub fn note_url(&self, id: i64) -> String {
        format!("{}/notes/{}", self.base_url(), id)
    }
}

#[derive(Clone)]
pub struct SettingsLoader {
    location: String,
    transport: Arc<dyn Transport>,
}

impl SettingsLoader {
    pub fn new(location: impl Into<String>, transport: Arc<dyn Transport>) -> Self {
        Self {
            location: location.into(),
            transport,
        }
    }

    pub fn location(&self) -> &str {
        &self.location
    }

    fn is_remote(&self) -> bool {
        self.location.starts_with("http://") || self.location.starts_with("https://")
    }

    pub async fn load_settings(&self) -> Result<Settings, ConfigError> {
        let body = if self.is_remote() {
            self.fetch().await?
        } else {
            tokio::fs::read_to_string(&self.location)
                .await
                .map_err(|source| ConfigError::Read {
                    location: self.location.clone(),
                    source,
                })?
        };

        let settings: Settings =
            serde_json::from_str(&body).map_err(|source| ConfigError::Parse {
                location: self.location.clone(),
                source,
            })?;

        if settings.base_url().trim().is_empty() {
            return Err(ConfigError::MissingBaseUrl {
                location: self.location.clone(),
            });
        }

        debug!(location = %self.location, api_base_url = %settings.api_base_url, "Loaded settings");
        Ok(settings)
    }

    async fn fetch(&self) -> Result<String, ConfigError> {
        let response = self
            .transport
            .send(HttpRequest::get(&self.location))
            .await
            .map_err(|source| ConfigError::Unreachable {
                location: self.location.clone(),
                source,
            })?;

        if !response.is_success() {
            return Err(ConfigError::Fetch {
                location: self.location.clone(),
                status: response.status.as_u16(),
            });
        }
        Ok(response.body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::StubTransport;
    use reqwest::StatusCode;

    const SETTINGS_URL: &str = "http://localhost/settings.json";

    #[test]
    fn test_urls_trim_trailing_slash() {
        let settings = Settings::new("https://api.example.com/api/");
        assert_eq!(settings.notes_url(), "https://api.example.com/api/notes");
        assert_eq!(settings.note_url(5), "https://api.example.com/api/notes/5");
    }

    #[tokio::test]
    async fn test_load_remote_settings_ignores_extra_fields() {
        let transport = Arc::new(StubTransport::new());
        transport.respond(
            "GET",
            SETTINGS_URL,
            StatusCode::OK,
            r#"{"apiBaseUrl":"https://api.example.com","theme":"dark"}"#,
        );
        let loader = SettingsLoader::new(SETTINGS_URL, transport.clone());

        let settings = loader.load_settings().await.unwrap();
        assert_eq!(settings.api_base_url, "https://api.example.com");

        let requests = transport.requests();
        assert_eq!(requests.len(), 1);
        assert!(requests[0].headers.get(reqwest::header::AUTHORIZATION).is_none());
    }

    #[tokio::test]
    async fn test_load_settings_not_found() {
        let transport = Arc::new(StubTransport::new());
        transport.respond("GET", SETTINGS_URL, StatusCode::NOT_FOUND, "");
        let loader = SettingsLoader::new(SETTINGS_URL, transport);

        let err = loader.load_settings().await.unwrap_err();
        assert!(matches!(err, ConfigError::Fetch { status: 404, .. }));
    }

    #[tokio::test]
    async fn test_load_settings_unreachable_keeps_network_cause() {
        let transport = Arc::new(StubTransport::new());
        transport.fail("GET", SETTINGS_URL, "connection refused");
        let loader = SettingsLoader::new(SETTINGS_URL, transport);

        match loader.load_settings().await {
            Err(ConfigError::Unreachable { source, .. }) => {
                assert_eq!(source.0, "connection refused");
            }
            other => panic!("expected unreachable settings, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_load_settings_bad_json() {
        let transport = Arc::new(StubTransport::new());
        transport.respond("GET", SETTINGS_URL, StatusCode::OK, "{not json");
        let loader = SettingsLoader::new(SETTINGS_URL, transport);

        assert!(matches!(
            loader.load_settings().await,
            Err(ConfigError::Parse { .. })
        ));
    }

    #[tokio::test]
    async fn test_load_settings_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        std::fs::write(&path, r#"{"apiBaseUrl":"http://127.0.0.1:5000/api"}"#).unwrap();

        let transport = Arc::new(StubTransport::new());
        let loader = SettingsLoader::new(path.to_string_lossy(), transport.clone());

        let settings = loader.load_settings().await.unwrap();
        assert_eq!(settings.notes_url(), "http://127.0.0.1:5000/api/notes");
        assert!(transport.requests().is_empty());
    }

    #[tokio::test]
    async fn test_load_settings_missing_file_and_empty_base() {
        let dir = tempfile::tempdir().unwrap();
        let transport = Arc::new(StubTransport::new());

        let missing = SettingsLoader::new(
            dir.path().join("absent.json").to_string_lossy(),
            transport.clone(),
        );
        match missing.load_settings().await {
            Err(ConfigError::Read { source, .. }) => {
                assert_eq!(source.kind(), std::io::ErrorKind::NotFound);
            }
            other => panic!("expected unreadable settings, got {:?}", other),
        }

        let path = dir.path().join("empty.json");
        std::fs::write(&path, r#"{"apiBaseUrl":"/"}"#).unwrap();
        let empty = SettingsLoader::new(path.to_string_lossy(), transport);
        assert!(matches!(
            empty.load_settings().await,
            Err(ConfigError::MissingBaseUrl { .. })
        ));
    }
}

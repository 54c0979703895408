//! Error taxonomy shared by the token guard, settings loader and notes client.
//!
//! Every notes client operation returns `NotesError`; the page controller is
//! the only place these are caught and turned into notifications.

use thiserror::Error;

pub use crate::api::ApiError;

/// The stored credential is missing or unusable.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AuthError {
    #[error("Token not found")]
    Missing,

    #[error("Token expired")]
    Expired { exp: i64 },

    #[error("Token could not be decoded: {0}")]
    Malformed(String),

    #[error("Token storage unavailable: {0}")]
    Storage(String),
}

/// `settings.json` could not be fetched or parsed.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to load settings from {location} (status {status})")]
    Fetch { location: String, status: u16 },

    #[error("Failed to read settings from {location}: {source}")]
    Read {
        location: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to load settings from {location}: {source}")]
    Unreachable {
        location: String,
        #[source]
        source: NetworkError,
    },

    #[error("Failed to parse settings from {location}: {source}")]
    Parse {
        location: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Settings at {location} have an empty apiBaseUrl")]
    MissingBaseUrl { location: String },
}

/// The request never produced an HTTP response (connect, DNS, timeout, body read).
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Network error: {0}")]
pub struct NetworkError(pub String);

impl From<reqwest::Error> for NetworkError {
    fn from(err: reqwest::Error) -> Self {
        NetworkError(err.to_string())
    }
}

#[derive(Error, Debug)]
pub enum NotesError {
    #[error(transparent)]
    Auth(#[from] AuthError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Api(#[from] ApiError),

    #[error(transparent)]
    Network(#[from] NetworkError),
}

impl NotesError {
    /// True when the backend answered `401` and the user must log in again.
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, NotesError::Api(ApiError::Unauthorized))
    }
}

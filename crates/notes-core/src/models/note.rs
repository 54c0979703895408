use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Note {
    pub id: i64,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub content: String,
}

/// Body of `POST /notes`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewNote {
    pub title: String,
    pub content: String,
}

impl NewNote {
    pub fn new(title: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            content: content.into(),
        }
    }
}

/// `{ "data": ... }` envelope used by the read endpoints.
#[derive(Debug, Clone, Deserialize)]
pub struct DataResponse<T> {
    pub data: Option<T>,
}

/// `{ "message": ... }` body returned by mutations and by most error responses.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct MessageResponse {
    #[serde(default)]
    pub message: Option<String>,
}

impl MessageResponse {
    /// Extract a non-empty `message` from a raw body, if the body is JSON and has one.
    pub fn message_from(body: &str) -> Option<String> {
        serde_json::from_str::<MessageResponse>(body)
            .ok()
            .and_then(|r| r.message)
            .filter(|m| !m.trim().is_empty())
    }
}

use reqwest::StatusCode;
use thiserror::Error;

use crate::models::MessageResponse;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    #[error("Unauthorized - token may be expired")]
    Unauthorized,

    /// Non-2xx response. `message` is the server's `message` field when the
    /// body carried one, otherwise the operation's generic fallback.
    #[error("{message}")]
    Rejected { status: u16, message: String },

    #[error("Invalid response: {0}")]
    InvalidResponse(String),
}

/// Maximum length for server-supplied messages shown to the user
const MAX_ERROR_MESSAGE_LENGTH: usize = 500;

impl ApiError {
    /// Truncate a server message to avoid flooding the notification area
    fn truncate_message(message: &str) -> String {
        if message.len() <= MAX_ERROR_MESSAGE_LENGTH {
            return message.to_string();
        }
        let mut end = MAX_ERROR_MESSAGE_LENGTH;
        while !message.is_char_boundary(end) {
            end -= 1;
        }
        format!("{}... (truncated, {} total bytes)", &message[..end], message.len())
    }

    pub fn from_status(status: StatusCode, body: &str, fallback: &str) -> Self {
        if status == StatusCode::UNAUTHORIZED {
            return ApiError::Unauthorized;
        }
        let message = MessageResponse::message_from(body)
            .map(|m| Self::truncate_message(&m))
            .unwrap_or_else(|| fallback.to_string());
        ApiError::Rejected {
            status: status.as_u16(),
            message,
        }
    }
}

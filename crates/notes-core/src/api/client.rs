//! Client for the notes REST API.
//!
//! Every operation follows the same sequence: take the token from the
//! `TokenGuard`, load settings, send one request with
//! `Authorization: Bearer <token>`, interpret the response. The guard runs
//! first, so a missing or expired token never reaches the network.

use std::sync::Arc;

use reqwest::header::{self, HeaderMap, HeaderValue};
use reqwest::Method;
use serde::de::DeserializeOwned;
use tracing::{debug, info};

use super::transport::{HttpRequest, HttpResponse, Transport};
use super::ApiError;
use crate::auth::TokenGuard;
use crate::error::{AuthError, NotesError};
use crate::models::{DataResponse, MessageResponse, NewNote, Note};
use crate::settings::{Settings, SettingsLoader};

// ============================================================================
// Constants
// ============================================================================

/// Content type the backend expects on note creation
const CREATE_CONTENT_TYPE: &str = "application/json-patch+json";

const CREATED_MESSAGE: &str = "Note created successfully";

const CREATE_FAILED: &str = "Failed to create note";
const DELETE_FAILED: &str = "Failed to delete note";
const GET_FAILED: &str = "Failed to get note";
const LIST_FAILED: &str = "Failed to get notes";

/// Query for `GET /notes`. The client always asks for the first page of 20,
/// newest first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListQuery {
    pub page_index: u32,
    pub page_size: u32,
    pub order_by: String,
    pub order_type: String,
}

impl Default for ListQuery {
    fn default() -> Self {
        Self {
            page_index: 1,
            page_size: 20,
            order_by: "id".to_string(),
            order_type: "desc".to_string(),
        }
    }
}

impl ListQuery {
    pub fn to_query_string(&self) -> String {
        format!(
            "PageIndex={}&PageSize={}&OrderBy={}&OrderType={}",
            self.page_index, self.page_size, self.order_by, self.order_type
        )
    }
}

/// Notes API client.
/// Clone is cheap - all collaborators are shared behind `Arc`.
#[derive(Clone)]
pub struct NotesClient {
    transport: Arc<dyn Transport>,
    guard: TokenGuard,
    settings: SettingsLoader,
}

impl NotesClient {
    pub fn new(transport: Arc<dyn Transport>, guard: TokenGuard, settings: SettingsLoader) -> Self {
        Self {
            transport,
            guard,
            settings,
        }
    }

    pub fn guard(&self) -> &TokenGuard {
        &self.guard
    }

    /// Token and settings, in that order.
    async fn prepare(&self) -> Result<(String, Settings), NotesError> {
        let token = self.guard.get_token()?;
        let settings = self.settings.load_settings().await?;
        Ok((token, settings))
    }

    fn auth_headers(token: &str) -> Result<HeaderMap, AuthError> {
        let mut headers = HeaderMap::new();
        let value = HeaderValue::from_str(&format!("Bearer {}", token))
            .map_err(|_| AuthError::Malformed("token is not a valid header value".to_string()))?;
        headers.insert(header::AUTHORIZATION, value);
        headers.insert(header::ACCEPT, HeaderValue::from_static("*/*"));
        Ok(headers)
    }

    async fn send(
        &self,
        method: Method,
        url: String,
        token: &str,
        body: Option<(&'static str, Vec<u8>)>,
    ) -> Result<HttpResponse, NotesError> {
        let mut request = HttpRequest::new(method, url);
        request.headers = Self::auth_headers(token)?;
        if let Some((content_type, bytes)) = body {
            request
                .headers
                .insert(header::CONTENT_TYPE, HeaderValue::from_static(content_type));
            request.body = Some(bytes);
        }

        debug!(method = %request.method, url = %request.url, "Notes API request");
        Ok(self.transport.send(request).await?)
    }

    /// Fail with the server's message (or `fallback`) unless the status is 2xx.
    fn check_response(response: HttpResponse, fallback: &str) -> Result<HttpResponse, ApiError> {
        if response.is_success() {
            Ok(response)
        } else {
            Err(ApiError::from_status(response.status, &response.body, fallback))
        }
    }

    fn parse<T: DeserializeOwned>(body: &str, what: &str) -> Result<T, ApiError> {
        serde_json::from_str(body)
            .map_err(|e| ApiError::InvalidResponse(format!("Failed to parse {}: {}", what, e)))
    }

    // ===== Operations =====

    /// `POST /notes`. Returns the server's confirmation message.
    pub async fn create(&self, note: &NewNote) -> Result<String, NotesError> {
        let (token, settings) = self.prepare().await?;
        let body = serde_json::to_vec(note)
            .map_err(|e| ApiError::InvalidResponse(format!("Failed to encode note: {}", e)))?;

        let response = self
            .send(
                Method::POST,
                settings.notes_url(),
                &token,
                Some((CREATE_CONTENT_TYPE, body)),
            )
            .await?;
        let response = Self::check_response(response, CREATE_FAILED)?;

        let message = if response.body.trim().is_empty() {
            None
        } else {
            Self::parse::<MessageResponse>(&response.body, "create response")?.message
        };

        info!(title = %note.title, "Note created");
        Ok(message.unwrap_or_else(|| CREATED_MESSAGE.to_string()))
    }

    /// `DELETE /notes/{id}`. The success body is ignored.
    pub async fn delete(&self, id: i64) -> Result<(), NotesError> {
        let (token, settings) = self.prepare().await?;
        let response = self
            .send(Method::DELETE, settings.note_url(id), &token, None)
            .await?;
        Self::check_response(response, DELETE_FAILED)?;

        info!(id, "Note deleted");
        Ok(())
    }

    /// `GET /notes/{id}`.
    pub async fn get_by_id(&self, id: i64) -> Result<Note, NotesError> {
        let (token, settings) = self.prepare().await?;
        let response = self
            .send(Method::GET, settings.note_url(id), &token, None)
            .await?;
        let response = Self::check_response(response, GET_FAILED)?;

        let envelope: DataResponse<Note> = Self::parse(&response.body, "note")?;
        envelope
            .data
            .ok_or_else(|| ApiError::InvalidResponse("note response has no data".to_string()).into())
    }

    /// `GET /notes` with the fixed first-page query.
    pub async fn list(&self) -> Result<Vec<Note>, NotesError> {
        self.list_with(&ListQuery::default()).await
    }

    pub async fn list_with(&self, query: &ListQuery) -> Result<Vec<Note>, NotesError> {
        let (token, settings) = self.prepare().await?;
        let url = format!("{}?{}", settings.notes_url(), query.to_query_string());
        let response = self.send(Method::GET, url, &token, None).await?;
        let response = Self::check_response(response, LIST_FAILED)?;

        let envelope: DataResponse<Vec<Note>> = Self::parse(&response.body, "note list")?;
        let notes = envelope.data.unwrap_or_default();
        debug!(count = notes.len(), "Listed notes");
        Ok(notes)
    }
}

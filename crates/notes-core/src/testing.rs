//! Test doubles shared by the unit tests in this crate.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use reqwest::StatusCode;

use crate::api::transport::{HttpRequest, HttpResponse, Transport};
use crate::auth::Navigator;
use crate::error::NetworkError;
use crate::models::Note;
use crate::presenter::{Notification, NotesView, Renderer};

/// Unsigned token with the given `exp` claim.
pub fn make_token(exp: i64) -> String {
    let header = URL_SAFE_NO_PAD.encode(r#"{"alg":"HS256","typ":"JWT"}"#);
    let payload = URL_SAFE_NO_PAD.encode(format!(r#"{{"sub":"user-1","exp":{}}}"#, exp));
    format!("{}.{}.c2lnbmF0dXJl", header, payload)
}

enum Canned {
    Response(StatusCode, String),
    Failure(String),
}

/// Transport answering from canned responses keyed by method and URL.
/// Unknown routes answer `404` with an empty body.
#[derive(Default)]
pub struct StubTransport {
    routes: Mutex<HashMap<(String, String), Canned>>,
    requests: Mutex<Vec<HttpRequest>>,
}

impl StubTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn respond(&self, method: &str, url: &str, status: StatusCode, body: &str) {
        self.routes.lock().unwrap().insert(
            (method.to_string(), url.to_string()),
            Canned::Response(status, body.to_string()),
        );
    }

    pub fn fail(&self, method: &str, url: &str, reason: &str) {
        self.routes.lock().unwrap().insert(
            (method.to_string(), url.to_string()),
            Canned::Failure(reason.to_string()),
        );
    }

    pub fn requests(&self) -> Vec<HttpRequest> {
        self.requests.lock().unwrap().clone()
    }

    /// Number of recorded requests matching method and URL.
    pub fn count(&self, method: &str, url: &str) -> usize {
        self.requests
            .lock()
            .unwrap()
            .iter()
            .filter(|r| r.method.as_str() == method && r.url == url)
            .count()
    }
}

#[async_trait]
impl Transport for StubTransport {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, NetworkError> {
        let key = (request.method.as_str().to_string(), request.url.clone());
        self.requests.lock().unwrap().push(request);

        match self.routes.lock().unwrap().get(&key) {
            Some(Canned::Response(status, body)) => Ok(HttpResponse {
                status: *status,
                body: body.clone(),
            }),
            Some(Canned::Failure(reason)) => Err(NetworkError(reason.clone())),
            None => Ok(HttpResponse {
                status: StatusCode::NOT_FOUND,
                body: String::new(),
            }),
        }
    }
}

#[derive(Default)]
pub struct RecordingNavigator {
    redirects: AtomicUsize,
}

impl RecordingNavigator {
    pub fn redirects(&self) -> usize {
        self.redirects.load(Ordering::SeqCst)
    }
}

impl Navigator for RecordingNavigator {
    fn redirect_to_login(&self) {
        self.redirects.fetch_add(1, Ordering::SeqCst);
    }
}

/// Renderer that keeps what a page would currently show.
#[derive(Default)]
pub struct RecordingRenderer {
    pub views: Mutex<Vec<NotesView>>,
    pub details: Mutex<Vec<Note>>,
    pub notification: Mutex<Option<Notification>>,
    pub clears: AtomicUsize,
}

impl RecordingRenderer {
    pub fn last_view(&self) -> Option<NotesView> {
        self.views.lock().unwrap().last().cloned()
    }

    pub fn view_count(&self) -> usize {
        self.views.lock().unwrap().len()
    }

    pub fn notification(&self) -> Option<Notification> {
        self.notification.lock().unwrap().clone()
    }
}

impl Renderer for RecordingRenderer {
    fn render_notes(&self, view: &NotesView) {
        self.views.lock().unwrap().push(view.clone());
    }

    fn render_note(&self, note: &Note) {
        self.details.lock().unwrap().push(note.clone());
    }

    fn notify(&self, notification: Notification) {
        *self.notification.lock().unwrap() = Some(notification);
    }

    fn clear_notifications(&self) {
        self.clears.fetch_add(1, Ordering::SeqCst);
        *self.notification.lock().unwrap() = None;
    }
}

//! The notes page: the boundary where user actions run and errors stop.
//!
//! Each action runs one `NotesClient` operation to completion. Errors never
//! leave this module: a `401` sends the user back to login, anything else
//! becomes a single error notification. Successful mutations are followed by
//! exactly one list refresh, so the displayed list always reflects the server.

use std::sync::Arc;

use tracing::{error, warn};

use crate::api::NotesClient;
use crate::error::NotesError;
use crate::models::NewNote;
use crate::presenter::{NotesView, Notification, Renderer};

const DELETED_MESSAGE: &str = "Note deleted successfully";

/// How a user action ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Completed,
    /// An error notification was shown.
    Failed,
    /// The backend rejected the token; the user was sent to login.
    Reauthenticate,
}

#[derive(Clone)]
pub struct NotesPage {
    client: NotesClient,
    renderer: Arc<dyn Renderer>,
}

impl NotesPage {
    pub fn new(client: NotesClient, renderer: Arc<dyn Renderer>) -> Self {
        Self { client, renderer }
    }

    /// Fetch the list and render it, or the empty placeholder.
    pub async fn load_notes(&self) -> Outcome {
        match self.client.list().await {
            Ok(notes) => {
                self.renderer.render_notes(&NotesView::from_notes(&notes));
                Outcome::Completed
            }
            Err(e) => self.fail("list", e),
        }
    }

    pub async fn create_note(&self, title: &str, content: &str) -> Outcome {
        let note = NewNote::new(title, content);
        match self.client.create(&note).await {
            Ok(message) => {
                self.renderer.notify(Notification::success(message));
                self.load_notes().await
            }
            Err(e) => self.fail("create", e),
        }
    }

    pub async fn delete_note(&self, id: i64) -> Outcome {
        match self.client.delete(id).await {
            Ok(()) => {
                self.renderer.notify(Notification::success(DELETED_MESSAGE));
                self.load_notes().await
            }
            Err(e) => self.fail("delete", e),
        }
    }

    pub async fn view_note(&self, id: i64) -> Outcome {
        match self.client.get_by_id(id).await {
            Ok(note) => {
                self.renderer.render_note(&note);
                Outcome::Completed
            }
            Err(e) => self.fail("view", e),
        }
    }

    fn fail(&self, action: &'static str, err: NotesError) -> Outcome {
        if err.is_unauthorized() {
            warn!(action, "Backend rejected token, redirecting to login");
            self.client.guard().invalidate();
            return Outcome::Reauthenticate;
        }

        error!(action, error = %err, "Notes action failed");
        self.renderer.clear_notifications();
        self.renderer.notify(Notification::error(err.to_string()));
        Outcome::Failed
    }
}

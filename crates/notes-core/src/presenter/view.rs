use serde::Serialize;

use crate::models::Note;

/// Shown in place of the list when the backend returns no notes
pub const EMPTY_PLACEHOLDER: &str = "There are no notes";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NoteAction {
    View,
    Delete,
}

impl NoteAction {
    pub fn label(&self) -> &'static str {
        match self {
            NoteAction::View => "View",
            NoteAction::Delete => "Delete",
        }
    }
}

/// One note as displayed, with the actions bound to its id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NoteCard {
    pub id: i64,
    pub title: String,
    pub content: String,
    pub actions: Vec<NoteAction>,
}

impl From<&Note> for NoteCard {
    fn from(note: &Note) -> Self {
        Self {
            id: note.id,
            title: note.title.clone(),
            content: note.content.clone(),
            actions: vec![NoteAction::View, NoteAction::Delete],
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum NotesView {
    Empty { placeholder: String },
    Notes { cards: Vec<NoteCard> },
}

impl NotesView {
    /// Map notes to cards, keeping the server's order.
    pub fn from_notes(notes: &[Note]) -> Self {
        if notes.is_empty() {
            return NotesView::Empty {
                placeholder: EMPTY_PLACEHOLDER.to_string(),
            };
        }
        NotesView::Notes {
            cards: notes.iter().map(NoteCard::from).collect(),
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, NotesView::Empty { .. })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NotificationKind {
    Success,
    Danger,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notification {
    pub kind: NotificationKind,
    pub title: String,
    pub message: String,
}

impl Notification {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            kind: NotificationKind::Success,
            title: "Success:".to_string(),
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            kind: NotificationKind::Danger,
            title: "Error:".to_string(),
            message: message.into(),
        }
    }
}

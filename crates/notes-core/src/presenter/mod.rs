//! Presentation of notes and notifications.
//!
//! `NotesView` is a pure mapping from notes to what should be displayed;
//! a `Renderer` puts it on screen. Keeping the two apart lets the list,
//! empty and error states be tested without any output device.

pub mod view;

pub use view::{NoteAction, NoteCard, NotesView, Notification, NotificationKind, EMPTY_PLACEHOLDER};

use crate::models::Note;

pub trait Renderer: Send + Sync {
    /// Replace the displayed list with `view`.
    fn render_notes(&self, view: &NotesView);

    /// Show a single note in detail.
    fn render_note(&self, note: &Note);

    /// Show `notification`, replacing any notification currently shown.
    fn notify(&self, notification: Notification);

    fn clear_notifications(&self);
}

//! Terminal output for the notes page.

use notes_core::presenter::{NotesView, Notification, NotificationKind, Renderer};
use notes_core::{Navigator, Note};

/// Prints views and notifications to stdout, as text or JSON lines.
pub struct TerminalRenderer {
    json: bool,
}

impl TerminalRenderer {
    pub fn new(json: bool) -> Self {
        Self { json }
    }

    fn print_json<T: serde::Serialize>(value: &T) {
        match serde_json::to_string(value) {
            Ok(line) => println!("{}", line),
            Err(e) => tracing::error!(error = %e, "Failed to encode output"),
        }
    }
}

pub fn format_view(view: &NotesView) -> String {
    match view {
        NotesView::Empty { placeholder } => placeholder.clone(),
        NotesView::Notes { cards } => cards
            .iter()
            .map(|card| {
                let actions: Vec<String> = card
                    .actions
                    .iter()
                    .map(|a| format!("[{} {}]", a.label(), card.id))
                    .collect();
                format!(
                    "#{}  {}\n     {}\n     {}",
                    card.id,
                    card.title,
                    card.content,
                    actions.join(" ")
                )
            })
            .collect::<Vec<_>>()
            .join("\n"),
    }
}

pub fn format_notification(notification: &Notification) -> String {
    format!("{} {}", notification.title, notification.message)
}

impl Renderer for TerminalRenderer {
    fn render_notes(&self, view: &NotesView) {
        if self.json {
            Self::print_json(view);
        } else {
            println!("{}", format_view(view));
        }
    }

    fn render_note(&self, note: &Note) {
        if self.json {
            Self::print_json(note);
        } else {
            println!("#{}  {}\n\n{}", note.id, note.title, note.content);
        }
    }

    fn notify(&self, notification: Notification) {
        if self.json {
            Self::print_json(&notification);
            return;
        }
        match notification.kind {
            NotificationKind::Danger => eprintln!("{}", format_notification(&notification)),
            NotificationKind::Success => println!("{}", format_notification(&notification)),
        }
    }

    // Printed lines cannot be taken back
    fn clear_notifications(&self) {}
}

/// Tells the user how to get a fresh token.
pub struct TerminalNavigator {
    login_location: String,
}

impl TerminalNavigator {
    pub fn new(login_location: impl Into<String>) -> Self {
        Self {
            login_location: login_location.into(),
        }
    }
}

impl Navigator for TerminalNavigator {
    fn redirect_to_login(&self) {
        eprintln!(
            "Not logged in or session expired. Sign in at {} and run `notes login`.",
            self.login_location
        );
    }
}

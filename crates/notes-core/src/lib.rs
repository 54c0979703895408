//! notes-core - client library for a notes REST API.
//!
//! The pieces, in dependency order:
//!
//! - [`auth`]: `TokenGuard` checks the stored token before every request
//! - [`settings`]: `SettingsLoader` reads the API base URL from `settings.json`
//! - [`api`]: `NotesClient` performs create / delete / get / list
//! - [`presenter`]: `NotesView` and the `Renderer` seam
//! - [`page`]: `NotesPage`, where user actions run and errors are turned into notifications

pub mod api;
pub mod auth;
pub mod error;
pub mod models;
pub mod page;
pub mod presenter;
pub mod settings;

#[cfg(test)]
mod testing;

pub use api::{ApiError, NotesClient, ReqwestTransport, Transport};
pub use auth::{CredentialStore, Navigator, TokenGuard};
pub use error::{AuthError, ConfigError, NetworkError, NotesError};
pub use models::{NewNote, Note};
pub use page::{NotesPage, Outcome};
pub use presenter::{NotesView, Notification, Renderer};
pub use settings::{Settings, SettingsLoader};

//! REST client module for the notes backend.
//!
//! This module provides the `NotesClient` for the four note operations
//! (create, delete, get by id, list) and the `Transport` seam it sends
//! requests through.
//!
//! Every request carries the stored token as a JWT bearer credential.

pub mod client;
pub mod error;
pub mod transport;

pub use client::{ListQuery, NotesClient};
pub use error::ApiError;
pub use transport::{HttpRequest, HttpResponse, ReqwestTransport, Transport};

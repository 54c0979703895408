//! Data models for the notes API.
//!
//! - `Note`: a note record as returned by the backend
//! - `NewNote`: request body for creating a note
//! - Response envelopes: `DataResponse`, `MessageResponse`

pub mod note;

pub use note::{DataResponse, MessageResponse, NewNote, Note};

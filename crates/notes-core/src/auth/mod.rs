//! Authentication module for the stored bearer token.
//!
//! This module provides:
//! - `TokenGuard`: validates the stored token's `exp` claim before every request
//! - `CredentialStore`: injectable token storage (file, OS keychain, memory)
//! - `Navigator`: the redirect-to-login side effect
//!
//! Tokens are issued elsewhere; this crate only stores, checks and clears them.

pub mod credentials;
pub mod navigator;
pub mod session;
pub mod token;

pub use credentials::{CredentialStore, KeyringCredentialStore, MemoryCredentialStore, TOKEN_KEY};
pub use navigator::{Navigator, DEFAULT_LOGIN_LOCATION};
pub use session::FileCredentialStore;
pub use token::{check_at, decode_claims, Claims, TokenGuard, TokenStatus};

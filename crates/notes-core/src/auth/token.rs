//! Token guard: the gate every protected request passes through.
//!
//! The token is a compact `header.payload.signature` string. Only the payload
//! is decoded, for its `exp` claim. The signature is NOT verified: the client
//! trusts `exp` as-is and relies on the backend to reject forged tokens.

use std::sync::Arc;

use base64::alphabet;
use base64::engine::{DecodePaddingMode, GeneralPurpose, GeneralPurposeConfig};
use base64::Engine;
use chrono::{DateTime, TimeZone, Utc};
use serde::Deserialize;
use tracing::{debug, warn};

use super::credentials::CredentialStore;
use super::navigator::Navigator;
use crate::error::AuthError;

/// Base64url decoder that accepts the payload with or without `=` padding.
const PAYLOAD_ENGINE: GeneralPurpose = GeneralPurpose::new(
    &alphabet::URL_SAFE,
    GeneralPurposeConfig::new().with_decode_padding_mode(DecodePaddingMode::Indifferent),
);

/// Claims read from the token payload. Unknown claims are ignored.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Claims {
    /// Expiry, seconds since the Unix epoch.
    pub exp: i64,
    #[serde(default)]
    pub sub: Option<String>,
}

impl Claims {
    pub fn expires_at(&self) -> Option<DateTime<Utc>> {
        Utc.timestamp_opt(self.exp, 0).single()
    }
}

/// Side-effect free view of the stored token, for display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TokenStatus {
    Missing,
    Invalid(AuthError),
    Valid(Claims),
}

/// Decode the payload segment of a compact token.
///
/// The token is checked exactly as stored: it must be usable verbatim as a
/// bearer header value, so whitespace or control characters anywhere reject it.
pub fn decode_claims(token: &str) -> Result<Claims, AuthError> {
    if !token.bytes().all(|b| b.is_ascii_graphic()) {
        return Err(AuthError::Malformed(
            "token contains whitespace or non-printable characters".to_string(),
        ));
    }

    let parts: Vec<&str> = token.split('.').collect();
    if parts.len() != 3 {
        return Err(AuthError::Malformed(format!(
            "expected 3 segments, found {}",
            parts.len()
        )));
    }

    // Tolerate the standard alphabet as well as base64url
    let payload = parts[1].replace('+', "-").replace('/', "_");
    let bytes = PAYLOAD_ENGINE
        .decode(payload.as_bytes())
        .map_err(|e| AuthError::Malformed(format!("payload is not base64url: {}", e)))?;

    serde_json::from_slice::<Claims>(&bytes)
        .map_err(|e| AuthError::Malformed(format!("payload is not a JSON claim set: {}", e)))
}

/// Check that `token` decodes and expires strictly after `now`.
pub fn check_at(token: &str, now: DateTime<Utc>) -> Result<Claims, AuthError> {
    let claims = decode_claims(token)?;
    if claims.exp <= now.timestamp() {
        return Err(AuthError::Expired { exp: claims.exp });
    }
    Ok(claims)
}

/// Reads the stored token and refuses to hand out one that is missing,
/// undecodable or expired. Refusal clears the store and redirects to login.
#[derive(Clone)]
pub struct TokenGuard {
    store: Arc<dyn CredentialStore>,
    navigator: Arc<dyn Navigator>,
}

impl TokenGuard {
    pub fn new(store: Arc<dyn CredentialStore>, navigator: Arc<dyn Navigator>) -> Self {
        Self { store, navigator }
    }

    /// Return the raw stored token if it is still valid.
    pub fn get_token(&self) -> Result<String, AuthError> {
        self.get_token_at(Utc::now())
    }

    pub fn get_token_at(&self, now: DateTime<Utc>) -> Result<String, AuthError> {
        let token = match self.store.get() {
            Ok(Some(token)) if !token.trim().is_empty() => token,
            Ok(_) => return Err(self.reject(AuthError::Missing)),
            Err(e) => return Err(self.reject(AuthError::Storage(format!("{:#}", e)))),
        };

        match check_at(&token, now) {
            Ok(claims) => {
                debug!(exp = claims.exp, "Token accepted");
                Ok(token)
            }
            Err(e) => Err(self.reject(e)),
        }
    }

    /// Drop the stored token and send the user to login.
    pub fn invalidate(&self) {
        if let Err(e) = self.store.clear() {
            warn!(error = %format!("{:#}", e), "Failed to clear stored token");
        }
        self.navigator.redirect_to_login();
    }

    pub fn status(&self) -> TokenStatus {
        self.status_at(Utc::now())
    }

    pub fn status_at(&self, now: DateTime<Utc>) -> TokenStatus {
        match self.store.get() {
            Ok(Some(token)) if !token.trim().is_empty() => match check_at(&token, now) {
                Ok(claims) => TokenStatus::Valid(claims),
                Err(e) => TokenStatus::Invalid(e),
            },
            Ok(_) => TokenStatus::Missing,
            Err(e) => TokenStatus::Invalid(AuthError::Storage(format!("{:#}", e))),
        }
    }

    fn reject(&self, err: AuthError) -> AuthError {
        warn!(reason = %err, "Rejecting stored token");
        self.invalidate();
        err
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::MemoryCredentialStore;
    use crate::testing::{make_token, RecordingNavigator};
    use chrono::Duration;

    fn guard_with(token: Option<&str>) -> (TokenGuard, Arc<MemoryCredentialStore>, Arc<RecordingNavigator>) {
        let store = Arc::new(match token {
            Some(t) => MemoryCredentialStore::with_token(t),
            None => MemoryCredentialStore::new(),
        });
        let navigator = Arc::new(RecordingNavigator::default());
        let guard = TokenGuard::new(store.clone(), navigator.clone());
        (guard, store, navigator)
    }

    #[test]
    fn test_decode_claims() {
        let token = make_token(1_900_000_000);
        let claims = decode_claims(&token).unwrap();
        assert_eq!(claims.exp, 1_900_000_000);
        assert_eq!(claims.sub.as_deref(), Some("user-1"));
    }

    #[test]
    fn test_decode_claims_accepts_padded_payload() {
        let payload = base64::engine::general_purpose::URL_SAFE.encode(r#"{"exp":42}"#);
        assert!(payload.ends_with('='));
        let token = format!("e30.{}.sig", payload);
        assert_eq!(decode_claims(&token).unwrap().exp, 42);
    }

    #[test]
    fn test_decode_claims_rejects_malformed() {
        let no_pad = base64::engine::general_purpose::URL_SAFE_NO_PAD;
        let cases = vec![
            String::new(),
            "not-a-token".to_string(),
            "a.b".to_string(),
            "a.b.c.d".to_string(),
            "e30.!!!.sig".to_string(),
            format!("e30.{}.sig", no_pad.encode("not json")),
            format!("e30.{}.sig", no_pad.encode(r#"{"sub":"x"}"#)),
            format!("e30.{}.sig", no_pad.encode(r#"{"exp":"soon"}"#)),
            format!("e30.{}.sig", no_pad.encode(r#"{"exp":1.5}"#)),
        ];
        for token in cases {
            assert!(
                matches!(decode_claims(&token), Err(AuthError::Malformed(_))),
                "expected malformed: {:?}",
                token
            );
        }
    }

    #[test]
    fn test_check_at_boundary() {
        let now = Utc.timestamp_opt(1_800_000_000, 0).unwrap();
        assert!(check_at(&make_token(1_800_000_001), now).is_ok());
        assert_eq!(
            check_at(&make_token(1_800_000_000), now),
            Err(AuthError::Expired { exp: 1_800_000_000 })
        );
        assert!(check_at(&make_token(1_700_000_000), now).is_err());
    }

    #[test]
    fn test_get_token_returns_raw_token_unchanged() {
        let token = make_token((Utc::now() + Duration::hours(1)).timestamp());
        let (guard, store, navigator) = guard_with(Some(&token));

        assert_eq!(guard.get_token().unwrap(), token);
        assert_eq!(store.get().unwrap().as_deref(), Some(token.as_str()));
        assert_eq!(navigator.redirects(), 0);
    }

    #[test]
    fn test_get_token_expired_clears_and_redirects() {
        let token = make_token((Utc::now() - Duration::minutes(1)).timestamp());
        let (guard, store, navigator) = guard_with(Some(&token));

        assert!(matches!(guard.get_token(), Err(AuthError::Expired { .. })));
        assert_eq!(store.get().unwrap(), None);
        assert_eq!(navigator.redirects(), 1);
    }

    #[test]
    fn test_get_token_missing_redirects() {
        let (guard, _store, navigator) = guard_with(None);
        assert_eq!(guard.get_token(), Err(AuthError::Missing));
        assert_eq!(navigator.redirects(), 1);
    }

    #[test]
    fn test_get_token_garbage_clears_and_redirects() {
        let (guard, store, navigator) = guard_with(Some("garbage"));
        assert!(matches!(guard.get_token(), Err(AuthError::Malformed(_))));
        assert_eq!(store.get().unwrap(), None);
        assert_eq!(navigator.redirects(), 1);
    }

    #[test]
    fn test_get_token_rejects_surrounding_whitespace() {
        let token = make_token((Utc::now() + Duration::hours(1)).timestamp());
        let (guard, store, navigator) = guard_with(Some(&format!("{}\n", token)));

        assert!(matches!(guard.get_token(), Err(AuthError::Malformed(_))));
        assert_eq!(store.get().unwrap(), None);
        assert_eq!(navigator.redirects(), 1);

        assert!(matches!(
            decode_claims(&format!(" {}", token)),
            Err(AuthError::Malformed(_))
        ));
    }

    #[test]
    fn test_status_has_no_side_effects() {
        let token = make_token((Utc::now() - Duration::minutes(1)).timestamp());
        let (guard, store, navigator) = guard_with(Some(&token));

        assert!(matches!(guard.status(), TokenStatus::Invalid(AuthError::Expired { .. })));
        assert!(store.get().unwrap().is_some());
        assert_eq!(navigator.redirects(), 0);

        store.clear().unwrap();
        assert_eq!(guard.status(), TokenStatus::Missing);
    }
}

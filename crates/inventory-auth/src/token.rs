//! Unverified JWT payload inspection.
//!
//! The portal never holds the signing key; these checks only decide where
//! to route a browser. The backend re-validates every token it receives.

use base64::Engine;
use base64::engine::general_purpose::{STANDARD_NO_PAD, URL_SAFE_NO_PAD};
use chrono::Utc;
use serde::Deserialize;

/// Role assumed when the payload carries none.
pub const DEFAULT_ROLE: &str = "USER";

/// Outcome of inspecting a token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TokenStatus {
    /// Well-formed and not expired.
    Valid {
        /// Role claim, or [`DEFAULT_ROLE`].
        role: String,
        /// Expiry as a unix timestamp, if present.
        expires_at: Option<i64>,
    },
    /// Well-formed but past its `exp` claim.
    Expired,
    /// Not a three-part JWT or the payload is not JSON.
    Malformed,
}

impl TokenStatus {
    /// Whether the token may be used.
    pub fn is_valid(&self) -> bool {
        matches!(self, Self::Valid { .. })
    }

    /// The role claim of a valid token.
    pub fn role(&self) -> Option<&str> {
        match self {
            Self::Valid { role, .. } => Some(role),
            _ => None,
        }
    }
}

#[derive(Debug, Deserialize)]
struct Payload {
    #[serde(default)]
    role: Option<String>,
    #[serde(default)]
    exp: Option<i64>,
}

/// Decodes JWT payloads without verifying signatures.
#[derive(Debug, Clone, Copy, Default)]
pub struct TokenInspector;

impl TokenInspector {
    /// Inspects `token` against the current time.
    pub fn inspect(token: &str) -> TokenStatus {
        Self::inspect_at(token, Utc::now().timestamp())
    }

    /// Inspects `token` against the unix timestamp `now`.
    pub fn inspect_at(token: &str, now: i64) -> TokenStatus {
        let Some(payload) = decode_payload(token) else {
            return TokenStatus::Malformed;
        };

        match payload.exp {
            Some(exp) if exp < now => TokenStatus::Expired,
            expires_at => TokenStatus::Valid {
                role: payload
                    .role
                    .filter(|r| !r.is_empty())
                    .unwrap_or_else(|| DEFAULT_ROLE.to_string()),
                expires_at,
            },
        }
    }

    /// Whether `token` is expired or unreadable.
    pub fn is_expired(token: &str) -> bool {
        !Self::inspect(token).is_valid()
    }
}

fn decode_payload(token: &str) -> Option<Payload> {
    let parts: Vec<&str> = token.split('.').collect();
    if parts.len() != 3 {
        return None;
    }

    let segment = parts[1].trim_end_matches('=');
    let bytes = URL_SAFE_NO_PAD
        .decode(segment)
        .or_else(|_| STANDARD_NO_PAD.decode(segment))
        .ok()?;
    serde_json::from_slice(&bytes).ok()
}

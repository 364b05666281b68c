use std::fmt;

use jsonwebtoken::{Algorithm, EncodingKey, Header};
use serde::Serialize;
use tracing::error;
use uuid::Uuid;

use crate::error::AppError;
use crate::services::auth::{SharedSecret, TokenClaims};

/// Signs identity tokens with the shared secret (HS256).
///
/// The gate never issues tokens; this exists for the bundled authenticator
/// and so that issuance and verification provably agree on the key.
#[derive(Clone)]
pub struct TokenIssuer {
    ttl_seconds: u64,
    encoding_key: EncodingKey,
}

impl fmt::Debug for TokenIssuer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TokenIssuer")
            .field("ttl_seconds", &self.ttl_seconds)
            .finish_non_exhaustive()
    }
}

impl TokenIssuer {
    pub fn new(secret: &SharedSecret, ttl_seconds: u64) -> Self {
        Self {
            ttl_seconds,
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
        }
    }

    pub fn ttl_seconds(&self) -> u64 {
        self.ttl_seconds
    }

    /// Issue a token for `login`, valid from now for `ttl_seconds`.
    pub fn issue(&self, login: &str) -> Result<String, AppError> {
        let now = chrono::Utc::now().timestamp();
        let mut claims = TokenClaims::new(login, now, self.ttl_seconds);
        claims.jti = Some(Uuid::new_v4().to_string());

        self.sign(&claims)
    }

    pub fn sign<T: Serialize>(&self, claims: &T) -> Result<String, AppError> {
        let mut header = Header::new(Algorithm::HS256);
        header.typ = Some("JWT".to_string());
        jsonwebtoken::encode(&header, claims, &self.encoding_key).map_err(|e| {
            error!(error = %e, "failed to sign JWT");
            AppError::Internal
        })
    }
}

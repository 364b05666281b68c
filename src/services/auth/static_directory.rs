//! In-memory authenticator for development and tests.

use std::collections::HashMap;

use async_trait::async_trait;
use axum::http::StatusCode;
use serde_json::json;

use crate::services::auth::{AuthReply, Authenticator, TokenIssuer};

const INVALID_CREDENTIALS: &str = "Invalid login credentials";

/// Authenticates against a fixed `login -> password` table for one realm.
pub struct StaticAuthenticator {
    realm: String,
    users: HashMap<String, String>,
    issuer: TokenIssuer,
}

impl std::fmt::Debug for StaticAuthenticator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // Do not print passwords
        f.debug_struct("StaticAuthenticator")
            .field("realm", &self.realm)
            .field("users", &self.users.len())
            .finish()
    }
}

impl StaticAuthenticator {
    pub fn new<I>(realm: impl Into<String>, users: I, issuer: TokenIssuer) -> Self
    where
        I: IntoIterator<Item = (String, String)>,
    {
        Self {
            realm: realm.into(),
            users: users.into_iter().collect(),
            issuer,
        }
    }

    fn rejected() -> AuthReply {
        AuthReply::new(
            StatusCode::UNAUTHORIZED,
            json!({"status": "error", "message": INVALID_CREDENTIALS}),
        )
    }
}

#[async_trait]
impl Authenticator for StaticAuthenticator {
    async fn authenticate(&self, login: &str, password: &str, realm: &str) -> AuthReply {
        if realm != self.realm {
            tracing::warn!(realm = %realm, "login attempted against unknown realm");
            return Self::rejected();
        }

        let matches = self
            .users
            .get(login)
            .is_some_and(|expected| expected == password);
        if !matches {
            tracing::info!(login = %login, "login rejected");
            return Self::rejected();
        }

        match self.issuer.issue(login) {
            Ok(token) => {
                tracing::info!(login = %login, "login accepted");
                AuthReply::new(
                    StatusCode::OK,
                    json!({
                        "status": "ok",
                        "message": "Logged In",
                        "login": login,
                        "token": token,
                        "expires_in": self.issuer.ttl_seconds(),
                    }),
                )
            }
            Err(_) => AuthReply::new(
                StatusCode::INTERNAL_SERVER_ERROR,
                json!({"status": "error", "message": "internal server error"}),
            ),
        }
    }
}

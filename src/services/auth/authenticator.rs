//! Seam to the credential store.
//!
//! Turning a login/password pair into a token is somebody else's job (LDAP,
//! a user directory, ...). The login handler only talks to this trait and
//! writes back whatever it returns.

use async_trait::async_trait;
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::Value;

/// Reply produced by an [`Authenticator`]: status plus JSON body, sent as-is.
#[derive(Debug, Clone, PartialEq)]
pub struct AuthReply {
    pub status: StatusCode,
    pub body: Value,
}

impl AuthReply {
    pub fn new(status: StatusCode, body: Value) -> Self {
        Self { status, body }
    }
}

impl IntoResponse for AuthReply {
    fn into_response(self) -> Response {
        (self.status, Json(self.body)).into_response()
    }
}

/// Verifies credentials against a directory selected by `realm`.
///
/// Implementations decide the reply for both outcomes. A failure reply must
/// not reveal whether the login or the password was wrong.
#[async_trait]
pub trait Authenticator: Send + Sync {
    async fn authenticate(&self, login: &str, password: &str, realm: &str) -> AuthReply;
}

/*
 * Responsibility
 * - the type handlers see for "this request is authenticated as ..."
 * - the auth gate verifies the token and stores this in request extensions;
 *   handlers only ever receive this type
 *
 * Notes
 * - stored by type, so no other extension writer can collide with it
 * - lives for exactly one request
 */

/// Identity attached to a request that passed token validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthenticatedIdentity {
    pub login: String,
}

impl AuthenticatedIdentity {
    pub fn new(login: impl Into<String>) -> Self {
        Self {
            login: login.into(),
        }
    }

    pub fn login(&self) -> &str {
        &self.login
    }
}

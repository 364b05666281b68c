/*
 * Responsibility
 * - shared context attached to the Router (AppState)
 * - cheap to Clone (Arc inside)
 */
use std::sync::Arc;

use crate::services::auth::Authenticator;

#[derive(Clone)]
pub struct AppState {
    authenticator: Arc<dyn Authenticator>,
    realm: Arc<str>,
}

impl AppState {
    pub fn new(authenticator: Arc<dyn Authenticator>, realm: impl Into<Arc<str>>) -> Self {
        Self {
            authenticator,
            realm: realm.into(),
        }
    }

    pub fn authenticator(&self) -> &dyn Authenticator {
        self.authenticator.as_ref()
    }

    /// Realm hint forwarded on every login.
    pub fn realm(&self) -> &str {
        &self.realm
    }
}

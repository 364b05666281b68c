//! Factory: build auth services from application `Config`.
use std::sync::Arc;

use crate::config::Config;
use crate::services::auth::{Authenticator, StaticAuthenticator, TokenIssuer, TokenVerifier};

pub fn build_token_verifier(config: &Config) -> Arc<TokenVerifier> {
    Arc::new(TokenVerifier::new(
        &config.token_secret,
        config.token_leeway_seconds,
    ))
}

pub fn build_static_authenticator(config: &Config) -> Arc<dyn Authenticator> {
    if config.static_users.is_empty() {
        tracing::warn!("AUTH_USERS is empty; every login will be rejected");
    }

    let issuer = TokenIssuer::new(&config.token_secret, config.token_ttl_seconds);

    Arc::new(StaticAuthenticator::new(
        config.auth_realm.clone(),
        config.static_users.iter().cloned(),
        issuer,
    ))
}

//! Authentication gate: bypass list → bearer token → identity in extensions.
//!
//! Checks run in a fixed order and the first failure wins:
//! 1. path on the bypass list: forwarded with no identity
//! 2. no `Authorization` header: `MissingToken`
//! 3. header is not exactly `<scheme> <token>`: `MalformedHeader`
//! 4. token does not parse / signature mismatch: `MalformedToken`
//! 5. token parses but is expired, not yet valid, etc.: `InvalidToken`
//! 6. otherwise the `login` claim becomes an `AuthenticatedIdentity`
//!
//! Every failure is answered with 403 and the downstream handler is not run.

use std::sync::Arc;

use axum::{
    Router,
    extract::{OriginalUri, Request, State},
    http::{HeaderMap, header},
    middleware::{self, Next},
    response::Response,
};

use crate::api::v1::extractors::AuthenticatedIdentity;
use crate::config::Config;
use crate::error::AppError;
use crate::middleware::auth::BypassList;
use crate::services::auth::{TokenVerifier, build_token_verifier};

/// Outcome of a request that passed the gate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GateDecision {
    Bypass,
    Authenticated(AuthenticatedIdentity),
}

#[derive(Clone, Debug)]
pub struct AuthGate {
    verifier: Arc<TokenVerifier>,
    bypass: Arc<BypassList>,
}

impl AuthGate {
    pub fn new(verifier: Arc<TokenVerifier>, bypass: BypassList) -> Self {
        Self {
            verifier,
            bypass: Arc::new(bypass),
        }
    }

    /// Gate with the login endpoint plus `AUTH_BYPASS_PATHS` exempted.
    pub fn from_config(config: &Config) -> Self {
        let bypass = std::iter::once(Config::login_path())
            .chain(config.bypass_paths.iter().cloned())
            .collect::<BypassList>();

        Self::new(build_token_verifier(config), bypass)
    }

    pub fn bypass_list(&self) -> &BypassList {
        &self.bypass
    }

    /// Wrap every route of `router` (and its fallback) in the gate.
    ///
    /// Apply this to the outermost router so the bypass list sees full paths.
    pub fn apply<S>(&self, router: Router<S>) -> Router<S>
    where
        S: Clone + Send + Sync + 'static,
    {
        router.layer(middleware::from_fn_with_state(self.clone(), gate_middleware))
    }

    /// Classify a request from its path and headers alone.
    pub fn authenticate(&self, path: &str, headers: &HeaderMap) -> Result<GateDecision, AppError> {
        if self.bypass.contains(path) {
            return Ok(GateDecision::Bypass);
        }

        let value = headers
            .get(header::AUTHORIZATION)
            .ok_or(AppError::MissingToken)?
            .to_str()
            .map_err(|_| AppError::MalformedHeader)?;

        let (scheme, token) = split_authorization(value).ok_or(AppError::MalformedHeader)?;

        // Only the shape is enforced; the scheme itself is not checked.
        if !scheme.eq_ignore_ascii_case("bearer") {
            tracing::debug!(scheme = %scheme, "authorization scheme is not Bearer");
        }

        let verified = self.verifier.verify(token).map_err(|err| {
            tracing::debug!(error = %err, "token verification failed");
            AppError::from(err)
        })?;

        Ok(GateDecision::Authenticated(AuthenticatedIdentity::new(
            verified.login,
        )))
    }
}

// `<scheme> <token>` split on single spaces; any other field count is rejected.
fn split_authorization(value: &str) -> Option<(&str, &str)> {
    let mut fields = value.split(' ');
    match (fields.next(), fields.next(), fields.next()) {
        (Some(scheme), Some(token), None) => Some((scheme, token)),
        _ => None,
    }
}

async fn gate_middleware(
    State(gate): State<AuthGate>,
    mut req: Request,
    next: Next,
) -> Result<Response, AppError> {
    // Nested routers see a stripped URI; the bypass list holds full paths.
    let decision = {
        let path = match req.extensions().get::<OriginalUri>() {
            Some(OriginalUri(uri)) => uri.path(),
            None => req.uri().path(),
        };

        gate.authenticate(path, req.headers()).inspect_err(|err| {
            tracing::warn!(path = %path, reason = %err, "request rejected by auth gate");
        })?
    };

    if let GateDecision::Authenticated(identity) = decision {
        tracing::debug!(login = %identity.login, "request authenticated");
        // middleware → extractor
        req.extensions_mut().insert(identity);
    }

    Ok(next.run(req).await)
}

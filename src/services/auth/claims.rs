use serde::{Deserialize, Serialize};

/// Claim set carried by an identity token.
///
/// Timestamps are Unix epoch seconds. `exp` is required by the verifier;
/// `nbf` is honoured when present.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenClaims {
    pub login: String,
    pub exp: i64,
    pub iat: i64,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nbf: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub jti: Option<String>,
}

impl TokenClaims {
    /// Claims for `login` issued at `now`, valid for `ttl_seconds`.
    pub fn new(login: impl Into<String>, now: i64, ttl_seconds: u64) -> Self {
        Self {
            login: login.into(),
            exp: now.saturating_add(i64::try_from(ttl_seconds).unwrap_or(i64::MAX)),
            iat: now,
            nbf: None,
            jti: None,
        }
    }
}

use std::fmt;

use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{Algorithm, DecodingKey, Validation};
use serde::Deserialize;
use thiserror::Error;

use crate::error::AppError;
use crate::services::auth::SharedSecret;

/// Algorithms a token header may name. Anything else fails the validity check.
const ACCEPTED_ALGORITHMS: [Algorithm; 3] = [Algorithm::HS256, Algorithm::HS384, Algorithm::HS512];

/// Errors returned by token verification.
///
/// The split mirrors what the gate reports to clients:
/// `Malformed` when the token cannot be parsed or its signature does not
/// match, `Invalid`/`EmptyClaim` when it parses but fails the validity rules.
#[derive(Debug, Error)]
pub enum TokenError {
    #[error("malformed token: {0}")]
    Malformed(#[source] jsonwebtoken::errors::Error),

    #[error("token failed validation: {0}")]
    Invalid(#[source] jsonwebtoken::errors::Error),

    #[error("empty '{0}' claim")]
    EmptyClaim(&'static str),
}

impl From<jsonwebtoken::errors::Error> for TokenError {
    fn from(e: jsonwebtoken::errors::Error) -> Self {
        match e.kind() {
            ErrorKind::ExpiredSignature
            | ErrorKind::ImmatureSignature
            | ErrorKind::InvalidAlgorithm
            | ErrorKind::MissingRequiredClaim(_) => Self::Invalid(e),
            _ => Self::Malformed(e),
        }
    }
}

impl From<TokenError> for AppError {
    fn from(e: TokenError) -> Self {
        match e {
            TokenError::Malformed(_) => AppError::MalformedToken,
            TokenError::Invalid(_) | TokenError::EmptyClaim(_) => AppError::InvalidToken,
        }
    }
}

// Only what the gate needs; `exp`/`nbf` are checked by jsonwebtoken itself.
#[derive(Debug, Clone, Deserialize)]
struct DecodedClaims {
    #[serde(default)]
    login: String,
    #[serde(default)]
    jti: Option<String>,
}

/// Result of a successful verification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerifiedToken {
    pub login: String,
    pub jti: Option<String>,
}

/// HMAC token verifier bound to the shared secret.
#[derive(Clone)]
pub struct TokenVerifier {
    decoding_key: DecodingKey,
    validation: Validation,
}

impl fmt::Debug for TokenVerifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Do not print key material
        f.debug_struct("TokenVerifier")
            .field("validation", &self.validation)
            .finish()
    }
}

impl TokenVerifier {
    pub fn new(secret: &SharedSecret, leeway_seconds: u64) -> Self {
        let decoding_key = DecodingKey::from_secret(secret.as_bytes());

        let mut validation = Validation::new(Algorithm::HS256);
        validation.algorithms = ACCEPTED_ALGORITHMS.to_vec();
        validation.leeway = leeway_seconds;
        validation.validate_exp = true;
        validation.validate_nbf = true;
        validation.validate_aud = false;
        validation.set_required_spec_claims(&["exp"]);

        Self {
            decoding_key,
            validation,
        }
    }

    /// Verify signature + validity window, then require a non-empty `login`.
    pub fn verify(&self, token: &str) -> Result<VerifiedToken, TokenError> {
        let data =
            jsonwebtoken::decode::<DecodedClaims>(token, &self.decoding_key, &self.validation)?;

        if data.claims.login.trim().is_empty() {
            return Err(TokenError::EmptyClaim("login"));
        }

        Ok(VerifiedToken {
            login: data.claims.login,
            jti: data.claims.jti,
        })
    }
}

#[cfg(test)]
mod tests {
    use base64::{Engine, engine::general_purpose::URL_SAFE_NO_PAD};
    use serde_json::json;

    use super::*;
    use crate::services::auth::{TokenClaims, TokenIssuer};

    fn secret(raw: &str) -> SharedSecret {
        SharedSecret::new(raw).unwrap()
    }

    fn now() -> i64 {
        chrono::Utc::now().timestamp()
    }

    #[test]
    fn accepts_token_from_issuer_with_same_secret() {
        let issuer = TokenIssuer::new(&secret("k1"), 300);
        let verifier = TokenVerifier::new(&secret("k1"), 0);

        let token = issuer.issue("bob").unwrap();
        let verified = verifier.verify(&token).unwrap();

        assert_eq!(verified.login, "bob");
        assert!(verified.jti.is_some());
    }

    #[test]
    fn garbage_is_malformed() {
        let verifier = TokenVerifier::new(&secret("k1"), 0);
        for raw in ["", "garbage", "a.b.c", "a.b"] {
            let err = verifier.verify(raw).unwrap_err();
            assert!(matches!(err, TokenError::Malformed(_)), "{raw}: {err:?}");
        }
    }

    #[test]
    fn wrong_secret_is_malformed() {
        let token = TokenIssuer::new(&secret("other"), 300).issue("bob").unwrap();
        let err = TokenVerifier::new(&secret("k1"), 0)
            .verify(&token)
            .unwrap_err();
        assert!(matches!(err, TokenError::Malformed(_)), "{err:?}");
    }

    #[test]
    fn expired_token_is_invalid() {
        let issuer = TokenIssuer::new(&secret("k1"), 300);
        let claims = TokenClaims {
            login: "alice".into(),
            exp: now() - 3600,
            iat: now() - 7200,
            nbf: None,
            jti: None,
        };
        let token = issuer.sign(&claims).unwrap();

        let err = TokenVerifier::new(&secret("k1"), 60)
            .verify(&token)
            .unwrap_err();
        assert!(matches!(err, TokenError::Invalid(_)), "{err:?}");
    }

    #[test]
    fn leeway_tolerates_small_clock_skew() {
        let issuer = TokenIssuer::new(&secret("k1"), 300);
        let claims = TokenClaims {
            login: "alice".into(),
            exp: now() - 5,
            iat: now() - 300,
            nbf: None,
            jti: None,
        };
        let token = issuer.sign(&claims).unwrap();

        let verified = TokenVerifier::new(&secret("k1"), 60).verify(&token).unwrap();
        assert_eq!(verified.login, "alice");
    }

    #[test]
    fn not_yet_valid_token_is_invalid() {
        let issuer = TokenIssuer::new(&secret("k1"), 300);
        let mut claims = TokenClaims::new("alice", now(), 7200);
        claims.nbf = Some(now() + 3600);
        let token = issuer.sign(&claims).unwrap();

        let err = TokenVerifier::new(&secret("k1"), 60)
            .verify(&token)
            .unwrap_err();
        assert!(matches!(err, TokenError::Invalid(_)), "{err:?}");
    }

    #[test]
    fn missing_exp_is_invalid() {
        let issuer = TokenIssuer::new(&secret("k1"), 300);
        let token = issuer.sign(&json!({"login": "alice"})).unwrap();

        let err = TokenVerifier::new(&secret("k1"), 0)
            .verify(&token)
            .unwrap_err();
        assert!(matches!(err, TokenError::Invalid(_)), "{err:?}");
    }

    #[test]
    fn empty_login_is_invalid() {
        let issuer = TokenIssuer::new(&secret("k1"), 300);
        let token = issuer.sign(&TokenClaims::new("  ", now(), 300)).unwrap();

        let err = TokenVerifier::new(&secret("k1"), 0)
            .verify(&token)
            .unwrap_err();
        assert!(matches!(err, TokenError::EmptyClaim("login")), "{err:?}");
        assert_eq!(AppError::from(err), AppError::InvalidToken);
    }

    #[test]
    fn foreign_algorithm_is_invalid() {
        let header = URL_SAFE_NO_PAD.encode(br#"{"alg":"RS256","typ":"JWT"}"#);
        let payload = URL_SAFE_NO_PAD.encode(
            json!({"login": "alice", "exp": now() + 600})
                .to_string()
                .as_bytes(),
        );
        let token = format!("{header}.{payload}.c2lnbmF0dXJl");

        let err = TokenVerifier::new(&secret("k1"), 0)
            .verify(&token)
            .unwrap_err();
        assert!(matches!(err, TokenError::Invalid(_)), "{err:?}");
    }

    #[test]
    fn debug_hides_key() {
        let verifier = TokenVerifier::new(&secret("hunter2"), 0);
        assert!(!format!("{verifier:?}").contains("hunter2"));
    }
}

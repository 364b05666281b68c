pub mod authenticator;
pub mod claims;
pub mod factory;
pub mod issuer;
pub mod secret;
pub mod static_directory;
pub mod verifier;

pub use authenticator::{AuthReply, Authenticator};
pub use claims::TokenClaims;
pub use factory::{build_static_authenticator, build_token_verifier};
pub use issuer::TokenIssuer;
pub use secret::SharedSecret;
pub use static_directory::StaticAuthenticator;
pub use verifier::{TokenError, TokenVerifier, VerifiedToken};

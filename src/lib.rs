//! Request-authentication gate for an axum service.
//!
//! Every request passes through [`middleware::auth::AuthGate`]: paths on the
//! bypass list go straight through, everything else must carry a bearer token
//! signed with the shared secret. Verified identities are exposed to handlers
//! through [`api::v1::extractors::Identity`].

pub mod api;
pub mod app;
pub mod config;
pub mod error;
pub mod middleware;
pub mod services;
pub mod state;

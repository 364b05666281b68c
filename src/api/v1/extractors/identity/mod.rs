/*!
 * Authenticated identity extractor
 *
 * Responsibility:
 * - hand the identity verified by the auth gate (AuthenticatedIdentity) to handlers
 * - keep the axum-specific part in core and the type in types
 *
 * Public API:
 * - AuthenticatedIdentity
 * - Identity
 */

mod core;
mod types;

pub use self::core::Identity;
pub use types::AuthenticatedIdentity;

/*
 * Responsibility
 * - extractors handlers use to read what middleware put on the request
 */
pub mod identity;

pub use identity::{AuthenticatedIdentity, Identity};

/*
 * Responsibility
 * - public interface of the middleware (re-exports)
 * - auth: the authentication gate, http: transport-level layers
 */
pub mod auth;
pub mod http;

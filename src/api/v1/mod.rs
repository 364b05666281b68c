/*
 * Responsibility
 * - public surface of v1 (routes() and the pieces handlers share)
 */
pub mod dto;
pub mod extractors;
pub mod handlers;
mod routes;

pub use routes::routes;

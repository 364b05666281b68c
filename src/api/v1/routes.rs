/*
 * Responsibility
 * - URL layout of v1
 * - authentication is applied around the whole router in app.rs, not here
 */
use axum::{
    Router,
    routing::{get, post},
};

use crate::api::v1::handlers::{login::login, whoami::whoami};
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/login", post(login))
        .route("/whoami", get(whoami))
}

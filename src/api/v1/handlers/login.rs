/*
 * Responsibility
 * - POST /login
 * - parse Credentials, hand them to the Authenticator, return its reply untouched
 * - body read failures are answered with the JSON error body too
 */
use axum::{
    body::Bytes,
    extract::{State, rejection::BytesRejection},
    http::StatusCode,
};

use crate::api::v1::dto::credentials::Credentials;
use crate::error::AppError;
use crate::services::auth::AuthReply;
use crate::state::AppState;

pub async fn login(
    State(state): State<AppState>,
    body: Result<Bytes, BytesRejection>,
) -> Result<AuthReply, AppError> {
    let body = body.map_err(|rejection| {
        tracing::debug!(error = %rejection, "login body could not be read");
        if rejection.status() == StatusCode::PAYLOAD_TOO_LARGE {
            AppError::PayloadTooLarge
        } else {
            AppError::InvalidRequestBody
        }
    })?;

    let creds = Credentials::from_body(&body).map_err(|err| {
        tracing::debug!(error = %err, "login body rejected");
        AppError::InvalidRequestBody
    })?;

    let reply = state
        .authenticator()
        .authenticate(&creds.login, &creds.password, state.realm())
        .await;

    Ok(reply)
}

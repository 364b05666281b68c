/*
 * Responsibility
 * - GET /whoami
 * - echo the identity the auth gate attached to this request
 */
use axum::Json;

use crate::api::v1::dto::whoami::WhoAmIResponse;
use crate::api::v1::extractors::Identity;

pub async fn whoami(Identity(identity): Identity) -> Json<WhoAmIResponse> {
    Json(WhoAmIResponse {
        login: identity.login,
    })
}

use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct WhoAmIResponse {
    pub login: String,
}

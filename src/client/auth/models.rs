use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize)]
pub struct TokenAuthRequest {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Deserialize)]
pub struct TokenAuthResponse {
    pub token: Option<String>,
}

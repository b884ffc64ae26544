use crate::client::auth::models::{TokenAuthRequest, TokenAuthResponse};
use crate::client::http::ApiClient;
use crate::error::{ApiError, ApiResult};

/// Exchanges credentials for a bearer token and returns a client carrying it.
pub async fn login(client: &ApiClient, username: &str, password: &str) -> ApiResult<ApiClient> {
    let request_data = TokenAuthRequest {
        username: username.to_string(),
        password: password.to_string(),
    };
    tracing::info!("logging in as {}", username);

    let response: TokenAuthResponse = client.post("auth/login", &request_data).await?;
    match response.token {
        Some(token) if !token.is_empty() => Ok(client.clone().with_token(token)),
        _ => Err(ApiError::Unauthorized),
    }
}

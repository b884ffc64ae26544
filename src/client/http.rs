use reqwest::header::{AUTHORIZATION, CONTENT_TYPE, HeaderMap, HeaderValue};
use reqwest::multipart::Form;
use reqwest::{Method, RequestBuilder, Response, StatusCode};
use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::config::Config;
use crate::error::{ApiError, ApiResult};

/// Responses come either bare or wrapped as `{"data": ...}`.
#[derive(serde::Deserialize)]
#[serde(untagged)]
enum Envelope<T> {
    Wrapped { data: T },
    Bare(T),
}

impl<T> Envelope<T> {
    fn into_inner(self) -> T {
        match self {
            Envelope::Wrapped { data } => data,
            Envelope::Bare(value) => value,
        }
    }
}

/// The one HTTP client every view-model shares. Cloning is cheap.
#[derive(Clone, Debug)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
    token: Option<String>,
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        ApiClient {
            http: reqwest::Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            token: None,
        }
    }

    pub fn from_config(config: &Config) -> Self {
        let client = ApiClient::new(config.api_base_url.clone());
        match &config.api_token {
            Some(token) => client.with_token(token.clone()),
            None => client,
        }
    }

    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    fn headers(&self) -> ApiResult<HeaderMap> {
        let mut headers = HeaderMap::new();
        if let Some(token) = &self.token {
            headers.insert(AUTHORIZATION, HeaderValue::from_str(&format!("Bearer {}", token))?);
        }
        Ok(headers)
    }

    fn request(&self, method: Method, path: &str) -> ApiResult<RequestBuilder> {
        let url = self.url(path);
        tracing::debug!("{} {}", method, url);
        Ok(self.http.request(method, url).headers(self.headers()?))
    }

    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> ApiResult<T> {
        let res = self.request(Method::GET, path)?.send().await?;
        read_json(res).await
    }

    pub async fn get_with_query<Q, T>(&self, path: &str, query: &Q) -> ApiResult<T>
    where
        Q: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let res = self.request(Method::GET, path)?.query(query).send().await?;
        read_json(res).await
    }

    pub async fn post<B, T>(&self, path: &str, body: &B) -> ApiResult<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        self.send_json(Method::POST, path, body).await
    }

    /// A 2xx create is a success whatever the body says. Some handlers echo
    /// the record, others only answer `{"success":true,"message":...}`.
    pub async fn post_created<B, T>(&self, path: &str, body: &B) -> ApiResult<Option<T>>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let value: serde_json::Value = self.post(path, body).await?;
        match serde_json::from_value(value) {
            Ok(created) => Ok(Some(created)),
            Err(e) => {
                tracing::debug!("POST {} succeeded without a record: {}", path, e);
                Ok(None)
            }
        }
    }

    pub async fn put<B, T>(&self, path: &str, body: &B) -> ApiResult<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        self.send_json(Method::PUT, path, body).await
    }

    pub async fn delete(&self, path: &str) -> ApiResult<()> {
        let res = self.request(Method::DELETE, path)?.send().await?;
        read_json::<serde_json::Value>(res).await.map(|_| ())
    }

    pub async fn post_multipart<T: DeserializeOwned>(&self, path: &str, form: Form) -> ApiResult<T> {
        let res = self.request(Method::POST, path)?.multipart(form).send().await?;
        read_json(res).await
    }

    async fn send_json<B, T>(&self, method: Method, path: &str, body: &B) -> ApiResult<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let res = self
            .request(method, path)?
            .header(CONTENT_TYPE, HeaderValue::from_static("application/json"))
            .json(body)
            .send()
            .await?;
        read_json(res).await
    }
}

async fn read_json<T: DeserializeOwned>(res: Response) -> ApiResult<T> {
    let status = res.status();
    let url = res.url().to_string();

    if status == StatusCode::UNAUTHORIZED {
        tracing::warn!("{} answered 401", url);
        return Err(ApiError::Unauthorized);
    }

    let body = res.text().await?;
    if !status.is_success() {
        tracing::error!("{} answered {}: {}", url, status, body);
        return Err(ApiError::Status { status, body });
    }

    decode_body(&body)
}

/// Empty bodies decode as JSON `null`, which suits `()`-like and `Option` targets.
pub(crate) fn decode_body<T: DeserializeOwned>(body: &str) -> ApiResult<T> {
    let text = if body.trim().is_empty() { "null" } else { body };
    let envelope: Envelope<T> = serde_json::from_str(text)?;
    Ok(envelope.into_inner())
}

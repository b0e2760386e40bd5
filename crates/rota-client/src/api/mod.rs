//! Typed access to the roster backend.
//!
//! Requests carry the session cookie set by the backend at login; JSON in,
//! JSON out. Non-success responses are classified by [`ApiError::from_error_body`].

mod admin;
mod org;
mod shifts;
mod templates;

pub use shifts::ReassignBody;

use reqwest::{Method, RequestBuilder, Response, Url};
use rota_core::config::ApiConfig;
use rota_core::error::CoreError;
use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::error::{ApiError, ApiResult};

/// Cloneable handle to the backend API.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: Url,
}

impl ApiClient {
    /// ## Summary
    /// Builds a client with a cookie store and the configured timeout.
    ///
    /// ## Errors
    /// Returns an error if the base URL is invalid or the HTTP client cannot
    /// be constructed.
    pub fn new(config: &ApiConfig) -> ApiResult<Self> {
        let http = reqwest::Client::builder()
            .timeout(config.timeout())
            .cookie_store(true)
            .build()?;
        Self::with_http(http, &config.base_url)
    }

    /// ## Summary
    /// Wraps an existing `reqwest::Client`.
    ///
    /// ## Errors
    /// Returns `CoreError::ConfigError` if `base_url` is not an absolute URL.
    pub fn with_http(http: reqwest::Client, base_url: &str) -> ApiResult<Self> {
        let base_url = Url::parse(base_url).map_err(|e| {
            CoreError::ConfigError(format!("invalid API base URL {base_url:?}: {e}"))
        })?;
        Ok(Self { http, base_url })
    }

    #[must_use]
    pub const fn base_url(&self) -> &Url {
        &self.base_url
    }

    pub(crate) fn url(&self, path: &str) -> ApiResult<Url> {
        self.base_url
            .join(path)
            .map_err(|e| CoreError::InvalidInput(format!("invalid API path {path:?}: {e}")).into())
    }

    fn request(&self, method: Method, url: Url) -> RequestBuilder {
        self.http
            .request(method, url)
            .header(reqwest::header::ACCEPT, "application/json")
    }

    pub(crate) async fn get_json<T: DeserializeOwned>(&self, url: Url) -> ApiResult<T> {
        let response = self.request(Method::GET, url).send().await?;
        decode(response).await
    }

    pub(crate) async fn send_json<B, T>(&self, method: Method, url: Url, body: &B) -> ApiResult<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let response = self.request(method, url).json(body).send().await?;
        decode(response).await
    }

    pub(crate) async fn send_empty(&self, method: Method, url: Url) -> ApiResult<()> {
        let response = self.request(method, url).send().await?;
        expect_success(response).await.map(|_body| ())
    }
}

async fn expect_success(response: Response) -> ApiResult<String> {
    let status = response.status();
    let body = response.text().await?;
    if status.is_success() {
        Ok(body)
    } else {
        tracing::debug!(status = status.as_u16(), "Backend rejected request");
        Err(ApiError::from_error_body(status.as_u16(), &body))
    }
}

async fn decode<T: DeserializeOwned>(response: Response) -> ApiResult<T> {
    let body = expect_success(response).await?;
    Ok(serde_json::from_str(&body)?)
}

use reqwest::{Method, RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::config::PortalConfig;
use crate::errors::ApiError;

/// Shared HTTP client for the portal API. Owns the base URL and the bearer
/// token; every store talks to the backend through one of these.
pub struct ApiClient {
    base_url: String,
    auth_token: Option<String>,
    client: reqwest::Client,
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>, auth_token: Option<String>) -> Self {
        let mut base_url = base_url.into();
        while base_url.ends_with('/') {
            base_url.pop();
        }
        Self {
            base_url,
            auth_token,
            client: reqwest::Client::new(),
        }
    }

    pub fn from_config(config: &PortalConfig) -> Self {
        Self::new(config.api_base.clone(), config.auth_token.clone())
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let url = format!("{}{}", self.base_url, path);
        let builder = self.client.request(method, url);
        match &self.auth_token {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }

    pub async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<T, ApiError> {
        let resp = self
            .request(Method::GET, path)
            .query(query)
            .send()
            .await?;
        parse_json(resp).await
    }

    pub async fn post_json<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, ApiError> {
        let resp = self.request(Method::POST, path).json(body).send().await?;
        parse_json(resp).await
    }

    pub async fn patch_json<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, ApiError> {
        let resp = self.request(Method::PATCH, path).json(body).send().await?;
        parse_json(resp).await
    }

    pub async fn delete(&self, path: &str) -> Result<(), ApiError> {
        let resp = self.request(Method::DELETE, path).send().await?;
        check_status(resp).await.map(|_| ())
    }

    /// Raw body download for CSV/blob export endpoints.
    pub async fn get_bytes(&self, path: &str) -> Result<Vec<u8>, ApiError> {
        let resp = self.request(Method::GET, path).send().await?;
        let resp = check_status(resp).await?;
        Ok(resp.bytes().await?.to_vec())
    }

    /// Multipart upload, used for profile picture changes.
    pub async fn post_multipart<T: DeserializeOwned>(
        &self,
        path: &str,
        form: reqwest::multipart::Form,
    ) -> Result<T, ApiError> {
        let resp = self
            .request(Method::POST, path)
            .multipart(form)
            .send()
            .await?;
        parse_json(resp).await
    }
}

/// Turn a non-2xx response into the portal error taxonomy; pass 2xx through.
async fn check_status(resp: Response) -> Result<Response, ApiError> {
    let status = resp.status();
    if status.is_success() {
        return Ok(resp);
    }
    let body = resp.json::<serde_json::Value>().await.ok();
    if status == StatusCode::UNAUTHORIZED || status.as_u16() >= 500 {
        tracing::warn!(status = status.as_u16(), "portal api call failed");
    }
    Err(ApiError::from_status_body(status.as_u16(), body))
}

async fn parse_json<T: DeserializeOwned>(resp: Response) -> Result<T, ApiError> {
    let resp = check_status(resp).await?;
    Ok(resp.json::<T>().await?)
}

//! HTTP client for the `/products` API.

use crate::domain::product::{Product, ProductFields, ProductId};
use crate::infra::config;
use crate::transport::http::types::ErrorBody;
use reqwest::{Response, StatusCode, Url};
use serde::de::DeserializeOwned;
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, instrument};

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("invalid base url '{0}'")]
    InvalidBaseUrl(String),
    #[error("request timed out")]
    Timeout,
    #[error("request failed: {0}")]
    Transport(reqwest::Error),
    #[error("server answered {status}: {message}")]
    Status { status: StatusCode, message: String },
}

impl From<reqwest::Error> for ClientError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            ClientError::Timeout
        } else {
            ClientError::Transport(e)
        }
    }
}

impl ClientError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, ClientError::Status { status, .. } if *status == StatusCode::NOT_FOUND)
    }
}

#[derive(Clone)]
pub struct ProductApi {
    http: reqwest::Client,
    base_url: Url,
}

impl ProductApi {
    /// Every request is bounded by `timeout`, so a caller is never left waiting forever.
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, ClientError> {
        let base_url =
            Url::parse(base_url).map_err(|_| ClientError::InvalidBaseUrl(base_url.to_string()))?;
        if base_url.cannot_be_a_base() {
            return Err(ClientError::InvalidBaseUrl(base_url.to_string()));
        }
        let http = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self { http, base_url })
    }

    /// Like [`ProductApi::new`], with the timeout taken from `CLIENT_TIMEOUT_SECS`.
    pub fn from_env(base_url: &str) -> anyhow::Result<Self> {
        Ok(Self::new(base_url, config::client_timeout()?)?)
    }

    fn endpoint(&self, id: Option<&ProductId>) -> Result<Url, ClientError> {
        let mut url = self.base_url.clone();
        {
            let mut segments = url
                .path_segments_mut()
                .map_err(|_| ClientError::InvalidBaseUrl(self.base_url.to_string()))?;
            segments.pop_if_empty().push("products");
            if let Some(id) = id {
                segments.push(id.as_str());
            }
        }
        Ok(url)
    }

    #[instrument(skip(self))]
    pub async fn list(&self) -> Result<Vec<Product>, ClientError> {
        let resp = self.http.get(self.endpoint(None)?).send().await?;
        decode(resp).await
    }

    #[instrument(skip(self, draft))]
    pub async fn create(&self, draft: &ProductFields) -> Result<Product, ClientError> {
        let resp = self.http.post(self.endpoint(None)?).json(draft).send().await?;
        decode(resp).await
    }

    /// Sends the whole product; the server takes the id from the path.
    #[instrument(skip(self, product), fields(product_id = %product.id))]
    pub async fn update(&self, product: &Product) -> Result<Product, ClientError> {
        let resp = self
            .http
            .put(self.endpoint(Some(&product.id))?)
            .json(product)
            .send()
            .await?;
        decode(resp).await
    }

    #[instrument(skip(self, id), fields(product_id = %id))]
    pub async fn delete(&self, id: &ProductId) -> Result<(), ClientError> {
        let resp = self.http.delete(self.endpoint(Some(id))?).send().await?;
        check_status(resp).await.map(|_| ())
    }
}

async fn check_status(resp: Response) -> Result<Response, ClientError> {
    let status = resp.status();
    if status.is_success() {
        return Ok(resp);
    }
    let text = resp.text().await.unwrap_or_default();
    let message = serde_json::from_str::<ErrorBody>(&text)
        .map(|b| b.error)
        .unwrap_or(text);
    debug!(%status, %message, "request failed");
    Err(ClientError::Status { status, message })
}

async fn decode<T: DeserializeOwned>(resp: Response) -> Result<T, ClientError> {
    let resp = check_status(resp).await?;
    Ok(resp.json::<T>().await?)
}

//! HTTP access to the activities API
//!
//! [`ActivityApi`] is the seam the board talks through. [`HttpActivityApi`]
//! is the real reqwest-backed client; tests substitute scripted fakes.

use async_trait::async_trait;
use reqwest::{Client, StatusCode};

use crate::error::ApiError;
use crate::models::{ApiReply, Catalog};

/// A signup/unregister response, successful or rejected
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiResponse {
    pub status: u16,
    pub reply: ApiReply,
}

impl ApiResponse {
    pub fn new(status: u16, reply: ApiReply) -> Self {
        Self { status, reply }
    }

    /// True for any 2xx status
    pub fn is_ok(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Operations the board needs from the server.
///
/// A rejected request (non-2xx) is an `Ok` carrying the server's reply;
/// `Err` means the server could not be reached or answered with something
/// that is not the expected JSON.
#[async_trait]
pub trait ActivityApi: Send + Sync {
    async fn fetch_catalog(&self) -> Result<Catalog, ApiError>;
    async fn signup(&self, activity: &str, email: &str) -> Result<ApiResponse, ApiError>;
    async fn unregister(&self, activity: &str, email: &str) -> Result<ApiResponse, ApiError>;
}

pub struct HttpActivityApi {
    client: Client,
    base_url: String,
}

impl HttpActivityApi {
    pub fn new(base_url: impl Into<String>) -> Result<Self, ApiError> {
        let client = Client::builder()
            .build()
            .map_err(|e| ApiError::ClientBuild(e.to_string()))?;
        Ok(Self {
            client,
            base_url: base_url.into(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn catalog_url(&self) -> String {
        format!("{}/activities", self.base_url)
    }

    async fn read_reply(response: reqwest::Response) -> Result<ApiResponse, ApiError> {
        let status = response.status();
        let body = response.text().await?;

        let reply = ApiReply::from_body(&body).map_err(|e| {
            ApiError::InvalidResponse(format!("{} with unparseable body: {}", status, e))
        })?;

        Ok(ApiResponse::new(status.as_u16(), reply))
    }
}

/// Build `{base}/activities/{activity}/signup?email={email}` with both values
/// percent-encoded
pub fn signup_url(base_url: &str, activity: &str, email: &str) -> String {
    format!(
        "{}/activities/{}/signup?email={}",
        base_url,
        urlencoding::encode(activity),
        urlencoding::encode(email)
    )
}

#[async_trait]
impl ActivityApi for HttpActivityApi {
    async fn fetch_catalog(&self) -> Result<Catalog, ApiError> {
        let url = self.catalog_url();
        tracing::debug!(%url, "fetching activities");

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| ApiError::ConnectionFailed(e.to_string()))?;

        let status = response.status();
        let body = response.text().await?;

        // The status is not checked: any body that parses as a catalog is shown.
        let catalog: Catalog = serde_json::from_str(&body).map_err(|e| {
            ApiError::InvalidResponse(format!("{} with unparseable catalog: {}", status, e))
        })?;

        tracing::debug!(activities = catalog.len(), "fetched activities");
        Ok(catalog)
    }

    async fn signup(&self, activity: &str, email: &str) -> Result<ApiResponse, ApiError> {
        let url = signup_url(&self.base_url, activity, email);
        tracing::debug!(%url, "POST signup");

        let response = self
            .client
            .post(&url)
            .send()
            .await
            .map_err(|e| ApiError::ConnectionFailed(e.to_string()))?;

        Self::read_reply(response).await
    }

    async fn unregister(&self, activity: &str, email: &str) -> Result<ApiResponse, ApiError> {
        let url = signup_url(&self.base_url, activity, email);
        tracing::debug!(%url, "DELETE signup");

        let response = self
            .client
            .delete(&url)
            .send()
            .await
            .map_err(|e| ApiError::ConnectionFailed(e.to_string()))?;

        Self::read_reply(response).await
    }
}

/// Convenience for logging a rejected response
pub fn status_text(status: u16) -> String {
    StatusCode::from_u16(status)
        .map(|s| s.to_string())
        .unwrap_or_else(|_| status.to_string())
}

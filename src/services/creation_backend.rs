//! Creation backend for the Briefkasten dashboard.
//!
//! `CreationBackend` is the seam the creation pipeline submits through;
//! `HttpCreationBackend` talks to the bookmarks API over `reqwest`.

use std::future::Future;
use std::time::Duration;

use reqwest::StatusCode;
use tracing::debug;

use crate::types::bookmark::Bookmark;
use crate::types::creation::{CreateBookmarkRequest, CreateBookmarkResponse};
use crate::types::errors::CreateError;
use crate::types::settings::DashboardConfig;

/// Trait defining the bookmark creation transport.
pub trait CreationBackend {
    /// Submits `request` and resolves to the bookmark the backend created.
    fn create(
        &self,
        request: &CreateBookmarkRequest,
    ) -> impl Future<Output = Result<Bookmark, CreateError>> + Send;
}

/// Creation backend posting JSON to `{base}/api/bookmarks`.
#[derive(Debug, Clone)]
pub struct HttpCreationBackend {
    client: reqwest::Client,
    endpoint: String,
}

impl HttpCreationBackend {
    /// Creates a backend for the API rooted at `base_url`.
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, CreateError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| CreateError::Transport(format!("Failed to build HTTP client: {}", e)))?;
        Ok(Self {
            client,
            endpoint: format!("{}/api/bookmarks", base_url.trim_end_matches('/')),
        })
    }

    pub fn from_config(config: &DashboardConfig) -> Result<Self, CreateError> {
        Self::new(
            &config.api_base_url,
            Duration::from_secs(config.request_timeout_secs),
        )
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

impl CreationBackend for HttpCreationBackend {
    /// Only HTTP 200 counts as success; every other status is a rejection.
    async fn create(&self, request: &CreateBookmarkRequest) -> Result<Bookmark, CreateError> {
        debug!(endpoint = %self.endpoint, url = %request.url, "posting bookmark");
        let response = self
            .client
            .post(&self.endpoint)
            .json(request)
            .send()
            .await
            .map_err(|e| CreateError::Transport(e.to_string()))?;

        let status = response.status();
        if status != StatusCode::OK {
            return Err(CreateError::Status(status.as_u16()));
        }

        let body: CreateBookmarkResponse = response
            .json()
            .await
            .map_err(|e| CreateError::MalformedResponse(e.to_string()))?;
        Ok(body.data)
    }
}

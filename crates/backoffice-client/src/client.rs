// API client: status checking and decoding on top of a Transport

use backoffice_core::{
    BlogCategories, Bloggers, Blogs, Commentaries, ErrorBody, JobApplications, Resource, Tags,
    Users,
};
use serde::de::DeserializeOwned;
use std::sync::Arc;

use crate::config::{ClientConfig, TransportMode};
use crate::error::{ClientError, Result};
use crate::service::{AuthService, ResourceService};
use crate::transport::{ApiRequest, ApiResponse, FakeTransport, HttpTransport, Transport};

/// Shared handle to the backend. Cheap to clone.
#[derive(Clone)]
pub struct ApiClient {
    transport: Arc<dyn Transport>,
    token: Option<String>,
}

impl ApiClient {
    pub fn new(transport: Arc<dyn Transport>) -> Self {
        Self {
            transport,
            token: None,
        }
    }

    /// Build the transport selected by `config`
    pub fn from_config(config: &ClientConfig) -> Result<Self> {
        config.validate()?;
        let transport: Arc<dyn Transport> = match config.transport {
            TransportMode::Http => Arc::new(HttpTransport::new(&config.api_url)),
            TransportMode::Fake => Arc::new(FakeTransport::demo()),
        };
        tracing::debug!(transport = transport.name(), api_url = %config.api_url, "API client configured");

        Ok(Self {
            transport,
            token: config.api_token.clone(),
        })
    }

    /// Attach a bearer token to every request
    pub fn with_token(mut self, token: Option<String>) -> Self {
        self.token = token;
        self
    }

    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    pub fn transport_name(&self) -> &'static str {
        self.transport.name()
    }

    // ------------------------------------------------------------------------
    // Per-resource services
    // ------------------------------------------------------------------------

    pub fn blogs(&self) -> ResourceService<Blogs> {
        self.service()
    }

    pub fn blog_categories(&self) -> ResourceService<BlogCategories> {
        self.service()
    }

    pub fn tags(&self) -> ResourceService<Tags> {
        self.service()
    }

    pub fn commentaries(&self) -> ResourceService<Commentaries> {
        self.service()
    }

    pub fn bloggers(&self) -> ResourceService<Bloggers> {
        self.service()
    }

    pub fn job_applications(&self) -> ResourceService<JobApplications> {
        self.service()
    }

    pub fn users(&self) -> ResourceService<Users> {
        self.service()
    }

    pub fn auth(&self) -> AuthService {
        AuthService::new(self.clone())
    }

    /// Service for any resource
    pub fn service<R: Resource>(&self) -> ResourceService<R> {
        ResourceService::new(self.clone())
    }

    // ------------------------------------------------------------------------
    // Request execution
    // ------------------------------------------------------------------------

    /// Send a request and decode a JSON body. On a non-success status the
    /// error carries the server's `message`, or `fallback()` when absent.
    pub async fn fetch_json<T, F>(&self, request: ApiRequest, fallback: F) -> Result<T>
    where
        T: DeserializeOwned,
        F: FnOnce() -> String,
    {
        let response = self.round_trip(request, fallback).await?;
        let body = serde_json::from_slice(&response.body)?;
        Ok(body)
    }

    /// Send a request whose success body is empty or irrelevant
    pub async fn fetch_empty<F>(&self, request: ApiRequest, fallback: F) -> Result<()>
    where
        F: FnOnce() -> String,
    {
        self.round_trip(request, fallback).await.map(|_| ())
    }

    async fn round_trip<F>(&self, request: ApiRequest, fallback: F) -> Result<ApiResponse>
    where
        F: FnOnce() -> String,
    {
        let method = request.method;
        let path = request.path.clone();
        let request = request.with_bearer(self.token.clone());

        let response = self.transport.send(request).await.inspect_err(|e| {
            tracing::warn!(%method, %path, error = %e, "API request failed to send");
        })?;
        tracing::debug!(%method, %path, status = response.status, "API request");

        if response.is_success() {
            return Ok(response);
        }

        let message = ErrorBody::message_from(&response.body).unwrap_or_else(fallback);
        tracing::warn!(%method, %path, status = response.status, %message, "API request rejected");
        Err(ClientError::Api {
            status: response.status,
            message,
        })
    }
}

impl std::fmt::Debug for ApiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiClient")
            .field("transport", &self.transport.name())
            .field("authenticated", &self.token.is_some())
            .finish()
    }
}

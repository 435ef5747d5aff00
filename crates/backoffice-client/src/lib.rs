// Backoffice API client
//
// Typed services over the Backoffice REST API.
//
// Key design decisions:
// - Transport is a trait; HttpTransport and FakeTransport are interchangeable
//   and chosen by ClientConfig, never installed globally
// - ApiClient owns the status/error contract so every transport behaves alike
// - ResourceService<R> is generic over backoffice_core::Resource, giving each
//   resource list/get/create/update/delete without per-resource duplication
// - No retries, timeouts, deduplication or caching

pub mod client;
pub mod config;
pub mod error;
pub mod service;
pub mod transport;

pub use client::ApiClient;
pub use config::{ClientConfig, TransportMode, DEFAULT_API_URL};
pub use error::{ClientError, Result};
pub use service::{AuthService, ResourceService};
pub use transport::{ApiRequest, ApiResponse, FakeTransport, HttpTransport, Method, Transport};

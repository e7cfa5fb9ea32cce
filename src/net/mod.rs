//! Networking for the backend REST API and the upload CDN.
//!
//! SYSTEM CONTEXT
//! ==============
//! `transport` defines the seam, `api` layers base URL, bearer header and
//! envelope handling on top, and the feature-gated modules provide concrete
//! transports.

pub mod api;
#[cfg(feature = "hydrate")]
pub mod gloo_transport;
#[cfg(feature = "native")]
pub mod reqwest_transport;
pub mod transport;

pub use api::ApiClient;
#[cfg(feature = "hydrate")]
pub use gloo_transport::GlooTransport;
#[cfg(feature = "native")]
pub use reqwest_transport::ReqwestTransport;
pub use transport::{ApiRequest, ApiResponse, ApiTransport, Method, UploadRequest};

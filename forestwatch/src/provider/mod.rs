//! Satellite tile provider abstraction
//!
//! This module provides the [`TileProvider`] trait used by the grid acquirer
//! and a URL-template implementation for XYZ tile services.
//!
//! ```ignore
//! use forestwatch::provider::{ReqwestClient, TemplateProvider};
//!
//! let http_client = ReqwestClient::with_timeout(30)?;
//! let provider = TemplateProvider::tomtom(http_client, api_key);
//! ```

mod http;
mod template;
mod types;

pub use http::{HttpClient, ReqwestClient, DEFAULT_TIMEOUT_SECS};
pub use template::{
    TemplateProvider, TOMTOM_SATELLITE_ENDPOINT, TOMTOM_SATELLITE_EXTENSION,
    TOMTOM_SATELLITE_MAX_ZOOM,
};
pub use types::{ProviderError, TileProvider};

#[cfg(test)]
pub use http::tests::MockHttpClient;

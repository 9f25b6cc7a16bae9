//! HTTP-specific error types for the Power BI API client.
//!
//! - [`HttpResponseError`]: a response whose status is outside {200, 201, 204}
//! - [`InvalidHttpRequestError`]: a request rejected before it is sent
//! - [`HttpError`]: unified error type for every connector failure
//!
//! # Example
//!
//! ```rust,ignore
//! use powerbi_api::clients::{HttpError, HttpMethod, HttpRequest};
//!
//! match client.request(request).await {
//!     Ok(body) => println!("Success: {body:?}"),
//!     Err(HttpError::Response(e)) => println!("API error {} from {}", e.code, e.url),
//!     Err(HttpError::InvalidRequest(e)) => println!("Invalid request: {e}"),
//!     Err(e) => println!("Transport failure: {e}"),
//! }
//! ```

use std::path::PathBuf;

use thiserror::Error;

/// Error returned when a request receives a non-successful response.
///
/// # Example
///
/// ```rust
/// use powerbi_api::clients::HttpResponseError;
///
/// let error = HttpResponseError {
///     code: 404,
///     body: r#"{"error":{"code":"ItemNotFound"}}"#.to_string(),
///     url: "https://api.powerbi.com/v1.0/myorg/admin/apps".to_string(),
/// };
///
/// assert!(error.to_string().contains("404"));
/// ```
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("Request to {url} failed with status {code}: {body}")]
pub struct HttpResponseError {
    /// The HTTP status code of the response.
    pub code: u16,
    /// The response body, decoded lossily as UTF-8.
    pub body: String,
    /// The URL the request was sent to.
    pub url: String,
}

/// Error returned when a request fails validation before it is sent.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum InvalidHttpRequestError {
    /// The HTTP method is not one of get/post/patch/put/delete.
    #[error("Invalid Http method {method}.")]
    InvalidMethod {
        /// The invalid method that was provided.
        method: String,
    },

    /// A file upload was requested with a verb other than post.
    #[error("Files can only be uploaded via post, not {method}.")]
    UploadRequiresPost {
        /// The HTTP method that was used.
        method: String,
    },

    /// A file upload was combined with a JSON body.
    #[error("Cannot send a JSON body together with a file upload; use form fields instead.")]
    JsonBodyWithUpload,
}

/// Unified error type for all connector errors.
#[derive(Debug, Error)]
pub enum HttpError {
    /// The service answered with a non-success status code.
    #[error(transparent)]
    Response(#[from] HttpResponseError),

    /// Request validation failed; nothing was sent.
    #[error(transparent)]
    InvalidRequest(#[from] InvalidHttpRequestError),

    /// Network or connection error.
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// Reading an upload or writing a download failed.
    #[error("I/O error on {}: {source}", .path.display())]
    Io {
        /// The local file involved.
        path: PathBuf,
        /// The underlying I/O error.
        source: std::io::Error,
    },

    /// A download requested as JSON did not contain valid JSON.
    #[error("Invalid JSON payload: {0}")]
    Json(#[from] serde_json::Error),
}

// Verify HttpError is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<HttpError>();
};

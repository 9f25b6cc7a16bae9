//! HTTP client types for Power BI API communication.
//!
//! This module provides the connector layer every resource call goes
//! through: query encoding, request validation, response parsing and file
//! transfer.
//!
//! # Overview
//!
//! The main types in this module are:
//!
//! - [`HttpClient`]: The async connector bound to one host and bearer token
//! - [`HttpRequest`]: A request to be sent to the API
//! - [`ResponseBody`]: A parsed successful response
//! - [`HttpMethod`]: Supported HTTP methods (GET, POST, PATCH, PUT, DELETE)
//! - [`QueryParams`] / [`QueryValue`]: Ordered query parameters
//! - [`HttpError`]: Unified error type for every connector failure
//!
//! # Example
//!
//! ```rust,ignore
//! use powerbi_api::clients::{HttpClient, HttpMethod, HttpRequest, DownloadFormat};
//!
//! let request = HttpRequest::builder(HttpMethod::Get, "admin/activityevents")
//!     .query_param("startDateTime", "'2024-01-01T00:00:00.000Z'")
//!     .download("events.json", DownloadFormat::Json)
//!     .build()?;
//!
//! client.request(request).await?;
//! ```
//!
//! # Retry Behavior
//!
//! None. Each call performs exactly one HTTP exchange and every failure is
//! returned to the caller immediately.

mod errors;
mod http_client;
mod http_request;
mod http_response;
mod query;

pub use errors::{HttpError, HttpResponseError, InvalidHttpRequestError};
pub use http_client::{HttpClient, SDK_VERSION};
pub use http_request::{
    DownloadFormat, HttpMethod, HttpRequest, HttpRequestBuilder, RequestBody, Transfer,
};
pub use http_response::{is_success, parse_response, ResponseBody, SUCCESS_CODES};
pub use query::{build_query_string, QueryParams, QueryValue, UNESCAPED_PARAMETER};

//! Response parsing for the Power BI API client.
//!
//! Statuses 200, 201 and 204 are successful; anything else becomes an
//! [`HttpResponseError`]. A successful body is classified as empty, JSON, or
//! raw bytes. A JSON decode failure on a successful response is never an
//! error; the bytes are returned as-is.

use crate::clients::errors::HttpResponseError;

/// Status codes treated as success.
pub const SUCCESS_CODES: [u16; 3] = [200, 201, 204];

/// A successfully parsed response body.
///
/// # Example
///
/// ```rust
/// use powerbi_api::clients::{parse_response, ResponseBody};
///
/// let body = parse_response(200, "https://host/admin/apps", br#"{"value":[]}"#).unwrap();
/// assert!(matches!(body, ResponseBody::Json(_)));
///
/// let body = parse_response(204, "https://host/admin/apps", b"").unwrap();
/// assert_eq!(body, ResponseBody::Empty);
/// ```
#[derive(Clone, Debug, PartialEq)]
pub enum ResponseBody {
    /// No content.
    Empty,
    /// A decoded JSON document.
    Json(serde_json::Value),
    /// A body that is not JSON, returned verbatim.
    Raw(Vec<u8>),
}

impl ResponseBody {
    /// Returns the JSON document, if this body holds one.
    #[must_use]
    pub const fn as_json(&self) -> Option<&serde_json::Value> {
        match self {
            Self::Json(value) => Some(value),
            _ => None,
        }
    }

    /// Consumes the body and returns the JSON document, if any.
    #[must_use]
    pub fn into_json(self) -> Option<serde_json::Value> {
        match self {
            Self::Json(value) => Some(value),
            _ => None,
        }
    }

    /// Returns true for [`ResponseBody::Empty`].
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        matches!(self, Self::Empty)
    }

    /// Short name of the variant, used in error messages.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Empty => "empty",
            Self::Json(_) => "json",
            Self::Raw(_) => "raw",
        }
    }
}

/// Returns true if `code` is one of [`SUCCESS_CODES`].
#[must_use]
pub fn is_success(code: u16) -> bool {
    SUCCESS_CODES.contains(&code)
}

/// Parses a completed response.
///
/// # Errors
///
/// Returns [`HttpResponseError`] carrying the status, the body text and `url`
/// when `code` is not a success code.
pub fn parse_response(code: u16, url: &str, body: &[u8]) -> Result<ResponseBody, HttpResponseError> {
    if !is_success(code) {
        return Err(HttpResponseError {
            code,
            body: String::from_utf8_lossy(body).into_owned(),
            url: url.to_string(),
        });
    }

    if body.is_empty() {
        return Ok(ResponseBody::Empty);
    }

    Ok(serde_json::from_slice(body).map_or_else(
        |_| ResponseBody::Raw(body.to_vec()),
        ResponseBody::Json,
    ))
}

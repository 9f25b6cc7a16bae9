//! HTTP request types for the Power BI API client.
//!
//! This module provides the [`HttpRequest`] type and its builder for
//! constructing requests against the Power BI REST API.

use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use crate::clients::errors::InvalidHttpRequestError;
use crate::clients::query::{QueryParams, QueryValue};

/// HTTP methods supported by the connector.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HttpMethod {
    /// HTTP GET method for retrieving resources.
    Get,
    /// HTTP POST method for creating resources and uploading files.
    Post,
    /// HTTP PATCH method for partial updates.
    Patch,
    /// HTTP PUT method for updating resources.
    Put,
    /// HTTP DELETE method for removing resources.
    Delete,
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Get => write!(f, "get"),
            Self::Post => write!(f, "post"),
            Self::Patch => write!(f, "patch"),
            Self::Put => write!(f, "put"),
            Self::Delete => write!(f, "delete"),
        }
    }
}

impl FromStr for HttpMethod {
    type Err = InvalidHttpRequestError;

    /// Parses a method name case-insensitively.
    ///
    /// # Example
    ///
    /// ```rust
    /// use powerbi_api::clients::HttpMethod;
    ///
    /// assert_eq!("PATCH".parse::<HttpMethod>().unwrap(), HttpMethod::Patch);
    /// assert!("fetch".parse::<HttpMethod>().is_err());
    /// ```
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "get" => Ok(Self::Get),
            "post" => Ok(Self::Post),
            "patch" => Ok(Self::Patch),
            "put" => Ok(Self::Put),
            "delete" => Ok(Self::Delete),
            _ => Err(InvalidHttpRequestError::InvalidMethod {
                method: s.to_string(),
            }),
        }
    }
}

impl From<HttpMethod> for reqwest::Method {
    fn from(method: HttpMethod) -> Self {
        match method {
            HttpMethod::Get => Self::GET,
            HttpMethod::Post => Self::POST,
            HttpMethod::Patch => Self::PATCH,
            HttpMethod::Put => Self::PUT,
            HttpMethod::Delete => Self::DELETE,
        }
    }
}

/// The body of a request.
#[derive(Clone, Debug, PartialEq)]
pub enum RequestBody {
    /// URL-encoded form fields; sent as text parts alongside an upload.
    Form(Vec<(String, String)>),
    /// A JSON document.
    Json(serde_json::Value),
}

/// How a downloaded body is written to disk.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum DownloadFormat {
    /// Body bytes are copied verbatim.
    Raw,
    /// Body is decoded as JSON and written re-serialized.
    #[default]
    Json,
}

/// A file transfer attached to a request.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Transfer {
    /// Stream the response body to `path`.
    Download {
        /// Destination file.
        path: PathBuf,
        /// Output format.
        format: DownloadFormat,
    },
    /// Send the file at `path` as the multipart part named `file`.
    Upload {
        /// Source file.
        path: PathBuf,
    },
}

/// An HTTP request to be sent to the Power BI API.
///
/// Use [`HttpRequest::builder`] to construct requests with the builder
/// pattern, or [`HttpRequest::upload`] for file uploads.
///
/// # Example
///
/// ```rust
/// use powerbi_api::clients::{HttpMethod, HttpRequest};
/// use serde_json::json;
///
/// // GET request with query parameters
/// let get_request = HttpRequest::builder(HttpMethod::Get, "admin/groups")
///     .query_param("$top", 100)
///     .build()
///     .unwrap();
///
/// // PATCH request with a JSON body
/// let patch_request = HttpRequest::builder(HttpMethod::Patch, "groups/abc")
///     .json(json!({"name": "Finance"}))
///     .build()
///     .unwrap();
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct HttpRequest {
    /// The HTTP method for this request.
    pub http_method: HttpMethod,
    /// The path, relative to the connector host.
    pub path: String,
    /// The request body, if any.
    pub body: Option<RequestBody>,
    /// Query parameters to append to the URL.
    pub query: QueryParams,
    /// An optional upload or download.
    pub transfer: Option<Transfer>,
}

impl HttpRequest {
    /// Creates a new builder for constructing an `HttpRequest`.
    #[must_use]
    pub fn builder(method: HttpMethod, path: impl Into<String>) -> HttpRequestBuilder {
        HttpRequestBuilder::new(method, path)
    }

    /// Creates a builder for a POST that uploads `file` as a multipart form.
    ///
    /// # Example
    ///
    /// ```rust
    /// use powerbi_api::clients::{HttpMethod, HttpRequest};
    ///
    /// let request = HttpRequest::upload("imports", "report.pbix")
    ///     .query_param("datasetDisplayName", "Sales")
    ///     .build()
    ///     .unwrap();
    ///
    /// assert_eq!(request.http_method, HttpMethod::Post);
    /// ```
    #[must_use]
    pub fn upload(path: impl Into<String>, file: impl Into<PathBuf>) -> HttpRequestBuilder {
        let mut builder = HttpRequestBuilder::new(HttpMethod::Post, path);
        builder.transfer = Some(Transfer::Upload { path: file.into() });
        builder
    }

    /// Validates the request.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidHttpRequestError`] if:
    /// - an upload is attached to a method other than `Post`
    /// - an upload is combined with a JSON body
    pub fn verify(&self) -> Result<(), InvalidHttpRequestError> {
        if let Some(Transfer::Upload { .. }) = self.transfer {
            if self.http_method != HttpMethod::Post {
                return Err(InvalidHttpRequestError::UploadRequiresPost {
                    method: self.http_method.to_string(),
                });
            }
            if matches!(self.body, Some(RequestBody::Json(_))) {
                return Err(InvalidHttpRequestError::JsonBodyWithUpload);
            }
        }

        Ok(())
    }
}

/// Builder for constructing [`HttpRequest`] instances.
#[derive(Debug)]
pub struct HttpRequestBuilder {
    http_method: HttpMethod,
    path: String,
    body: Option<RequestBody>,
    query: QueryParams,
    transfer: Option<Transfer>,
}

impl HttpRequestBuilder {
    fn new(method: HttpMethod, path: impl Into<String>) -> Self {
        Self {
            http_method: method,
            path: path.into(),
            body: None,
            query: QueryParams::new(),
            transfer: None,
        }
    }

    /// Sets a JSON body, replacing any form fields.
    #[must_use]
    pub fn json(mut self, body: impl Into<serde_json::Value>) -> Self {
        self.body = Some(RequestBody::Json(body.into()));
        self
    }

    /// Adds a single form field, replacing a JSON body if one was set.
    #[must_use]
    pub fn form_field(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        let pair = (key.into(), value.into());
        match &mut self.body {
            Some(RequestBody::Form(fields)) => fields.push(pair),
            _ => self.body = Some(RequestBody::Form(vec![pair])),
        }
        self
    }

    /// Sets all query parameters at once.
    #[must_use]
    pub fn query(mut self, query: QueryParams) -> Self {
        self.query = query;
        self
    }

    /// Adds a single query parameter.
    #[must_use]
    pub fn query_param(mut self, key: impl Into<String>, value: impl Into<QueryValue>) -> Self {
        self.query.insert(key, value);
        self
    }

    /// Streams the response body to `file` instead of parsing it.
    #[must_use]
    pub fn download(mut self, file: impl Into<PathBuf>, format: DownloadFormat) -> Self {
        self.transfer = Some(Transfer::Download {
            path: file.into(),
            format,
        });
        self
    }

    /// Builds the [`HttpRequest`], validating it in the process.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidHttpRequestError`] if the request fails validation.
    pub fn build(self) -> Result<HttpRequest, InvalidHttpRequestError> {
        let request = HttpRequest {
            http_method: self.http_method,
            path: self.path,
            body: self.body,
            query: self.query,
            transfer: self.transfer,
        };
        request.verify()?;
        Ok(request)
    }
}

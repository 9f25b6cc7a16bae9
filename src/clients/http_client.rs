//! HTTP client for Power BI API communication.
//!
//! This module provides the [`HttpClient`] type, the single connector every
//! resource call goes through. Each call issues exactly one HTTP exchange;
//! nothing is retried.

use std::path::Path;

use reqwest::header::{ACCEPT, AUTHORIZATION};
use reqwest::multipart::{Form, Part};
use tokio::io::AsyncWriteExt;

use crate::clients::errors::{HttpError, HttpResponseError};
use crate::clients::http_request::{DownloadFormat, HttpMethod, HttpRequest, RequestBody, Transfer};
use crate::clients::http_response::{is_success, parse_response, ResponseBody};
use crate::clients::query::{build_query_string, QueryParams};
use crate::config::{BearerToken, PowerBiConfig};

/// Library version from Cargo.toml.
pub const SDK_VERSION: &str = env!("CARGO_PKG_VERSION");

/// HTTP client for making requests to the Power BI API.
///
/// The client handles:
/// - URL composition from the configured host, request path and query
/// - The `Authorization: Bearer` and `User-Agent` headers
/// - Form, JSON and multipart bodies
/// - Streaming downloads to a local file
/// - Echoing composed requests through `tracing` when debug is enabled
///
/// # Thread Safety
///
/// `HttpClient` is `Send + Sync`, making it safe to share across async tasks.
///
/// # Example
///
/// ```rust,ignore
/// use powerbi_api::{BearerToken, HttpClient, PowerBiConfig};
/// use powerbi_api::clients::QueryParams;
///
/// let config = PowerBiConfig::default();
/// let token = BearerToken::new("eyJ0eXAi...")?;
/// let client = HttpClient::new(&config, &token)?;
///
/// let apps = client.get("admin/apps", QueryParams::new().with("$top", 10)).await?;
/// ```
#[derive(Debug)]
pub struct HttpClient {
    client: reqwest::Client,
    host: String,
    token: BearerToken,
    user_agent: String,
    debug: bool,
    verify_tls: bool,
}

// Verify HttpClient is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<HttpClient>();
};

impl HttpClient {
    /// Creates a new client for `config.host()` authenticated with `token`.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError::Network`] if the underlying reqwest client cannot
    /// be created (e.g., TLS initialization failure).
    pub fn new(config: &PowerBiConfig, token: &BearerToken) -> Result<Self, HttpError> {
        let user_agent_prefix = config
            .user_agent_prefix()
            .map_or(String::new(), |prefix| format!("{prefix} | "));
        let rust_version = env!("CARGO_PKG_RUST_VERSION");
        let user_agent =
            format!("{user_agent_prefix}Power BI API Library v{SDK_VERSION} | Rust {rust_version}");

        let mut builder = reqwest::Client::builder()
            .use_rustls_tls()
            .user_agent(user_agent.clone())
            .danger_accept_invalid_certs(!config.verify_tls());
        if let Some(timeout) = config.timeout() {
            builder = builder.timeout(timeout);
        }
        let client = builder.build()?;

        tracing::debug!(
            "Created Power BI client for {} (verify_tls: {})",
            config.host().as_ref(),
            config.verify_tls()
        );

        Ok(Self {
            client,
            host: config.host().as_ref().to_string(),
            token: token.clone(),
            user_agent,
            debug: config.debug(),
            verify_tls: config.verify_tls(),
        })
    }

    /// Returns the host every request path is joined to.
    #[must_use]
    pub fn host(&self) -> &str {
        &self.host
    }

    /// Returns the user agent sent with every request.
    #[must_use]
    pub fn user_agent(&self) -> &str {
        &self.user_agent
    }

    /// Returns whether composed requests are echoed to the log.
    #[must_use]
    pub const fn debug(&self) -> bool {
        self.debug
    }

    /// Returns whether TLS certificates are verified.
    #[must_use]
    pub const fn verify_tls(&self) -> bool {
        self.verify_tls
    }

    /// Composes the full URL for `request`: `{host}/{path}{query}`.
    #[must_use]
    pub fn url_for(&self, request: &HttpRequest) -> String {
        format!(
            "{}/{}{}",
            self.host,
            request.path.trim_start_matches('/'),
            build_query_string(&request.query)
        )
    }

    /// Sends an HTTP request to the Power BI API.
    ///
    /// Downloads return [`ResponseBody::Empty`] once the body has been
    /// written; every other request returns the parsed response body.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError`] if:
    /// - Request validation fails (`InvalidRequest`); nothing is sent
    /// - Network error occurs (`Network`)
    /// - The status is not 200, 201 or 204 (`Response`)
    /// - An upload cannot be read or a download cannot be written (`Io`)
    /// - A JSON download does not contain JSON (`Json`)
    pub async fn request(&self, request: HttpRequest) -> Result<ResponseBody, HttpError> {
        request.verify()?;

        let url = self.url_for(&request);
        let HttpRequest {
            http_method,
            body,
            transfer,
            ..
        } = request;

        if self.debug {
            tracing::info!("{} {}", http_method, url);
            match &body {
                Some(RequestBody::Json(value)) => tracing::info!("Body: {}", value),
                Some(RequestBody::Form(fields)) => tracing::info!("Form: {:?}", fields),
                None => {}
            }
        }

        let mut req_builder = self.authorized(http_method, &url);

        if let Some(Transfer::Upload { path }) = &transfer {
            req_builder = req_builder.multipart(Self::multipart_form(path, body).await?);
        } else {
            match body {
                Some(RequestBody::Form(fields)) => req_builder = req_builder.form(&fields),
                Some(RequestBody::Json(value)) => req_builder = req_builder.json(&value),
                None => {}
            }
        }

        let res = req_builder.send().await?;

        if let Some(Transfer::Download { path, format }) = transfer {
            return Self::download(res, &url, &path, format).await;
        }

        let code = res.status().as_u16();
        let bytes = res.bytes().await?;
        Ok(parse_response(code, &url, &bytes)?)
    }

    /// Sends a bodiless request to an already-formed URL.
    ///
    /// Used for continuation links returned by paginated endpoints.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError::Network`] on transport failure and
    /// [`HttpError::Response`] on a non-success status.
    pub async fn simple_request(
        &self,
        method: HttpMethod,
        url: &str,
    ) -> Result<ResponseBody, HttpError> {
        if self.debug {
            tracing::info!("{} {}", method, url);
        }

        let res = self.authorized(method, url).send().await?;
        let code = res.status().as_u16();
        let bytes = res.bytes().await?;
        Ok(parse_response(code, url, &bytes)?)
    }

    /// Sends a GET request for `path` with `query`.
    ///
    /// # Errors
    ///
    /// See [`request`](Self::request).
    pub async fn get(
        &self,
        path: impl Into<String>,
        query: QueryParams,
    ) -> Result<ResponseBody, HttpError> {
        let request = HttpRequest::builder(HttpMethod::Get, path)
            .query(query)
            .build()?;
        self.request(request).await
    }

    fn authorized(&self, method: HttpMethod, url: &str) -> reqwest::RequestBuilder {
        self.client
            .request(method.into(), url)
            .header(AUTHORIZATION, self.token.authorization_header())
            .header(ACCEPT, "application/json")
    }

    /// Builds the multipart form for an upload: the file part plus any form
    /// fields as text parts.
    async fn multipart_form(file: &Path, body: Option<RequestBody>) -> Result<Form, HttpError> {
        let contents = tokio::fs::read(file)
            .await
            .map_err(|source| HttpError::Io {
                path: file.to_path_buf(),
                source,
            })?;
        let file_name = file
            .file_name()
            .map_or_else(|| "file".to_string(), |name| name.to_string_lossy().into_owned());

        let mut form = Form::new().part("file", Part::bytes(contents).file_name(file_name));
        if let Some(RequestBody::Form(fields)) = body {
            for (key, value) in fields {
                form = form.text(key, value);
            }
        }
        Ok(form)
    }

    async fn download(
        mut res: reqwest::Response,
        url: &str,
        path: &Path,
        format: DownloadFormat,
    ) -> Result<ResponseBody, HttpError> {
        let code = res.status().as_u16();
        if !is_success(code) {
            let body = res.bytes().await?;
            return Err(HttpResponseError {
                code,
                body: String::from_utf8_lossy(&body).into_owned(),
                url: url.to_string(),
            }
            .into());
        }

        let io_error = |source| HttpError::Io {
            path: path.to_path_buf(),
            source,
        };

        match format {
            DownloadFormat::Raw => {
                let mut file = tokio::fs::File::create(path).await.map_err(io_error)?;
                while let Some(chunk) = res.chunk().await? {
                    file.write_all(&chunk).await.map_err(io_error)?;
                }
                file.flush().await.map_err(io_error)?;
            }
            DownloadFormat::Json => {
                let bytes = res.bytes().await?;
                let value: serde_json::Value = serde_json::from_slice(&bytes)?;
                let serialized = serde_json::to_vec(&value)?;
                tokio::fs::write(path, serialized).await.map_err(io_error)?;
            }
        }

        tracing::debug!("Downloaded {} to {}", url, path.display());
        Ok(ResponseBody::Empty)
    }
}

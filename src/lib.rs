//! # Power BI Admin API Rust Client
//!
//! A Rust client for the admin surface of the Power BI REST API, providing
//! type-safe configuration, Azure AD authentication and typed projections of
//! tenants, workspaces, datasets, apps, users and activity events.
//!
//! ## Overview
//!
//! This crate provides:
//! - Type-safe configuration via [`PowerBiConfig`] and [`PowerBiConfigBuilder`]
//! - Validated newtypes for credentials and host URLs
//! - Credentials from a YAML file, a bearer token, or a service principal
//! - OAuth 2.0 client credentials exchange via [`auth`]
//! - An async HTTP connector with form, JSON, upload and download support
//! - Typed resources in [`resources`] and tenant-level admin operations on
//!   [`Tenant`]
//!
//! ## Quick Start
//!
//! ```rust
//! use powerbi_api::{HostUrl, PowerBiConfig};
//!
//! // Create configuration using the builder pattern
//! let config = PowerBiConfig::builder()
//!     .host(HostUrl::new("https://api.powerbi.com/v1.0/myorg").unwrap())
//!     .debug(false)
//!     .build();
//! ```
//!
//! ## Connecting a Tenant
//!
//! ```rust,ignore
//! use powerbi_api::{Credentials, PowerBiConfig, Tenant};
//!
//! let config = PowerBiConfig::default();
//!
//! // A pre-issued bearer token
//! let tenant = Tenant::connect(&Credentials::token("eyJ0eXAi...")?, &config).await?;
//!
//! // Or a service principal; the token is minted on connect
//! let credentials = Credentials::service_principal("contoso.onmicrosoft.com", "client-id", "secret")?;
//! let tenant = Tenant::connect(&credentials, &config).await?;
//!
//! // Or a YAML credential file holding either of the above
//! let tenant = Tenant::authenticate_by_file("powerbi.yml", &config).await?;
//! ```
//!
//! ## Admin Listings
//!
//! ```rust,ignore
//! use powerbi_api::tenant::AppNameParams;
//!
//! let apps = tenant.get_apps_as_admin(Tenant::DEFAULT_TOP).await?;
//! let sales = tenant
//!     .get_apps_by_names(&["Sales"], AppNameParams { include_dev: true, include_test: false })
//!     .await?;
//! for app in sales {
//!     let users = app.get_app_users(tenant.client()).await?;
//!     println!("{}: {} users", app.name, users.len());
//! }
//! ```
//!
//! ## Making Raw Requests
//!
//! ```rust,ignore
//! use powerbi_api::clients::{DownloadFormat, HttpMethod, HttpRequest};
//!
//! let request = HttpRequest::builder(HttpMethod::Get, "admin/groups")
//!     .query_param("$top", 10)
//!     .download("groups.json", DownloadFormat::Json)
//!     .build()?;
//!
//! tenant.client().request(request).await?;
//! ```
//!
//! ## Design Principles
//!
//! - **No global state**: Configuration is instance-based and passed explicitly
//! - **Fail-fast validation**: All newtypes validate on construction
//! - **Thread-safe**: All types are `Send + Sync`
//! - **One exchange per call**: No retries, no hidden pagination

pub mod auth;
pub mod clients;
pub mod config;
pub mod error;
pub mod resources;
pub mod tenant;

// Re-export public types at crate root for convenience
pub use config::{
    BearerToken, ClientId, ClientSecret, Credentials, HostUrl, PowerBiConfig,
    PowerBiConfigBuilder, ServicePrincipal, TenantId,
};
pub use error::ConfigError;

// Re-export HTTP client types
pub use clients::{
    HttpClient, HttpError, HttpMethod, HttpRequest, HttpRequestBuilder, HttpResponseError,
    InvalidHttpRequestError, QueryParams, QueryValue, ResponseBody,
};

// Re-export auth, resource and tenant types
pub use auth::{generate_bearer_token, AuthError};
pub use resources::{ActivityEvent, App, Dataset, ResourceError, User, Workspace};
pub use tenant::{AppNameParams, Tenant};

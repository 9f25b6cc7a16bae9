//! Configuration types for the Power BI API client.
//!
//! # Overview
//!
//! - [`PowerBiConfig`]: connection settings shared by every request
//! - [`PowerBiConfigBuilder`]: fluent builder for [`PowerBiConfig`]
//! - [`Credentials`]: a bearer token or a service principal, optionally
//!   loaded from a YAML file
//! - [`HostUrl`], [`TenantId`], [`ClientId`], [`ClientSecret`],
//!   [`BearerToken`]: validated newtypes
//!
//! # Example
//!
//! ```rust
//! use powerbi_api::{HostUrl, PowerBiConfig};
//!
//! let config = PowerBiConfig::builder()
//!     .host(HostUrl::new("https://api.powerbi.com/v1.0/myorg").unwrap())
//!     .debug(true)
//!     .build();
//!
//! assert!(config.debug());
//! assert!(config.verify_tls());
//! ```

mod credentials;
mod newtypes;

pub use credentials::{Credentials, ServicePrincipal};
pub use newtypes::{BearerToken, ClientId, ClientSecret, HostUrl, TenantId};

use std::time::Duration;

/// Default REST root for the Power BI service.
pub const DEFAULT_HOST: &str = "https://api.powerbi.com/v1.0/myorg";

/// Default Azure AD authority used to mint bearer tokens.
pub const DEFAULT_AUTHORITY_HOST: &str = "https://login.microsoftonline.com";

// Parts of the defaults above
const POWER_BI_HOST_NAME: &str = "api.powerbi.com";
const POWER_BI_ROOT_PATH: &str = "/v1.0/myorg";
const AUTHORITY_HOST_NAME: &str = "login.microsoftonline.com";

/// Connection settings for the Power BI API client.
///
/// `PowerBiConfig` is `Clone`, `Send` and `Sync`.
///
/// # Defaults
///
/// - `host`: [`DEFAULT_HOST`]
/// - `authority_host`: [`DEFAULT_AUTHORITY_HOST`]
/// - `debug`: `false`
/// - `verify_tls`: `true`
/// - `timeout`: `None`
/// - `user_agent_prefix`: `None`
#[derive(Clone, Debug)]
pub struct PowerBiConfig {
    host: HostUrl,
    authority_host: HostUrl,
    debug: bool,
    verify_tls: bool,
    timeout: Option<Duration>,
    user_agent_prefix: Option<String>,
}

impl PowerBiConfig {
    /// Creates a new builder for constructing a `PowerBiConfig`.
    #[must_use]
    pub fn builder() -> PowerBiConfigBuilder {
        PowerBiConfigBuilder::new()
    }

    /// Returns the REST root every request path is joined to.
    #[must_use]
    pub const fn host(&self) -> &HostUrl {
        &self.host
    }

    /// Returns the Azure AD authority used for client-credentials exchange.
    #[must_use]
    pub const fn authority_host(&self) -> &HostUrl {
        &self.authority_host
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

    /// Returns the per-request timeout, if one is configured.
    #[must_use]
    pub const fn timeout(&self) -> Option<Duration> {
        self.timeout
    }

    /// Returns the user agent prefix, if configured.
    #[must_use]
    pub fn user_agent_prefix(&self) -> Option<&str> {
        self.user_agent_prefix.as_deref()
    }
}

impl Default for PowerBiConfig {
    fn default() -> Self {
        PowerBiConfigBuilder::new().build()
    }
}

// Verify PowerBiConfig is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<PowerBiConfig>();
};

/// Builder for constructing [`PowerBiConfig`] instances.
///
/// Every field is optional; unset fields take the defaults listed on
/// [`PowerBiConfig`].
///
/// # Example
///
/// ```rust
/// use std::time::Duration;
/// use powerbi_api::PowerBiConfig;
///
/// let config = PowerBiConfig::builder()
///     .verify_tls(false)
///     .timeout(Duration::from_secs(60))
///     .user_agent_prefix("nightly-audit/1.0")
///     .build();
///
/// assert!(!config.verify_tls());
/// assert_eq!(config.timeout(), Some(Duration::from_secs(60)));
/// ```
#[derive(Debug, Default)]
pub struct PowerBiConfigBuilder {
    host: Option<HostUrl>,
    authority_host: Option<HostUrl>,
    debug: Option<bool>,
    verify_tls: Option<bool>,
    timeout: Option<Duration>,
    user_agent_prefix: Option<String>,
}

impl PowerBiConfigBuilder {
    /// Creates a new builder with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the REST root (e.g., a mock server in tests).
    #[must_use]
    pub fn host(mut self, host: HostUrl) -> Self {
        self.host = Some(host);
        self
    }

    /// Sets the Azure AD authority used to mint bearer tokens.
    #[must_use]
    pub fn authority_host(mut self, host: HostUrl) -> Self {
        self.authority_host = Some(host);
        self
    }

    /// Enables echoing of composed URLs and bodies before each request.
    #[must_use]
    pub const fn debug(mut self, debug: bool) -> Self {
        self.debug = Some(debug);
        self
    }

    /// Sets whether TLS certificates are verified.
    #[must_use]
    pub const fn verify_tls(mut self, verify: bool) -> Self {
        self.verify_tls = Some(verify);
        self
    }

    /// Sets a per-request timeout.
    #[must_use]
    pub const fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Sets the user agent prefix for HTTP requests.
    #[must_use]
    pub fn user_agent_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.user_agent_prefix = Some(prefix.into());
        self
    }

    /// Builds the [`PowerBiConfig`].
    #[must_use]
    pub fn build(self) -> PowerBiConfig {
        PowerBiConfig {
            host: self.host.unwrap_or_else(default_host),
            authority_host: self.authority_host.unwrap_or_else(default_authority_host),
            debug: self.debug.unwrap_or(false),
            verify_tls: self.verify_tls.unwrap_or(true),
            timeout: self.timeout,
            user_agent_prefix: self.user_agent_prefix,
        }
    }
}

fn default_host() -> HostUrl {
    HostUrl::from_https_parts(POWER_BI_HOST_NAME, POWER_BI_ROOT_PATH)
}

fn default_authority_host() -> HostUrl {
    HostUrl::from_https_parts(AUTHORITY_HOST_NAME, "")
}

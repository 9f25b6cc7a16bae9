//! Authentication error types for the Power BI API client.
//!
//! # Example
//!
//! ```rust
//! use powerbi_api::auth::AuthError;
//!
//! let error = AuthError::ClientCredentialsFailed {
//!     status: 401,
//!     message: "AADSTS7000215: Invalid client secret provided.".to_string(),
//! };
//! assert!(error.to_string().contains("401"));
//! ```

use crate::clients::HttpError;
use crate::error::ConfigError;
use thiserror::Error;

/// Errors that can occur while obtaining a bearer token or connecting a
/// tenant.
///
/// # Thread Safety
///
/// `AuthError` is `Send + Sync`, making it safe to use across async boundaries.
#[derive(Debug, Error)]
pub enum AuthError {
    /// The authority rejected the client credentials, or answered with a
    /// body that holds no access token.
    #[error("Client credentials exchange failed with status {status}: {message}")]
    ClientCredentialsFailed {
        /// The HTTP status code returned.
        status: u16,
        /// The error message from the response.
        message: String,
    },

    /// Credentials or configuration were invalid.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Wrapped HTTP client error.
    #[error(transparent)]
    Http(#[from] HttpError),
}

// Verify AuthError is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<AuthError>();
};

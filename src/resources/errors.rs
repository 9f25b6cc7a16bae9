//! Resource-specific error types.
//!
//! Resource operations fail for one of three reasons:
//!
//! - **Transport or status**: [`ResourceError::Http`] wraps the connector error
//! - **Shape**: [`ResourceError::Decode`] when a JSON payload is missing a
//!   required key or holds the wrong type
//! - **Body kind**: [`ResourceError::UnexpectedBody`] when the service answers
//!   with no content or non-JSON bytes where a JSON document was expected
//!
//! # Example
//!
//! ```rust,ignore
//! use powerbi_api::resources::ResourceError;
//!
//! match tenant.get_workspaces(100).await {
//!     Ok(workspaces) => println!("{} workspaces", workspaces.len()),
//!     Err(ResourceError::Decode { resource, source }) => {
//!         eprintln!("Malformed {resource}: {source}");
//!     }
//!     Err(e) => eprintln!("Request failed: {e}"),
//! }
//! ```

use crate::clients::HttpError;
use thiserror::Error;

/// Error type for resource operations.
#[derive(Debug, Error)]
pub enum ResourceError {
    /// An HTTP-level error occurred.
    #[error(transparent)]
    Http(#[from] HttpError),

    /// The JSON payload did not match the resource's shape.
    #[error("Failed to decode {resource}: {source}")]
    Decode {
        /// The type name of the resource (e.g., "Workspace").
        resource: &'static str,
        /// The underlying serde error, naming the offending key.
        source: serde_json::Error,
    },

    /// The response body was not the JSON document the operation expects.
    #[error("Unexpected response for {resource}: {reason}")]
    UnexpectedBody {
        /// The type name of the resource.
        resource: &'static str,
        /// What was received instead.
        reason: String,
    },
}

// Verify ResourceError is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<ResourceError>();
};

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clients::HttpResponseError;

    #[test]
    fn test_decode_error_names_resource() {
        let source = serde_json::from_str::<u32>("\"x\"").unwrap_err();
        let error = ResourceError::Decode {
            resource: "Dataset",
            source,
        };
        assert!(error.to_string().starts_with("Failed to decode Dataset"));
    }

    #[test]
    fn test_unexpected_body_message() {
        let error = ResourceError::UnexpectedBody {
            resource: "App",
            reason: "empty body".to_string(),
        };
        assert_eq!(error.to_string(), "Unexpected response for App: empty body");
    }

    #[test]
    fn test_http_error_is_transparent() {
        let error: ResourceError = HttpError::Response(HttpResponseError {
            code: 401,
            body: "Unauthorized".to_string(),
            url: "https://example.test/admin/apps".to_string(),
        })
        .into();

        assert!(error.to_string().contains("401"));
        assert!(matches!(error, ResourceError::Http(_)));
    }
}

//! Error types for the Power BI API client.
//!
//! This module contains the configuration and credential errors used by
//! [`PowerBiConfig`](crate::PowerBiConfig), the validated newtypes and
//! [`Credentials`](crate::Credentials).
//!
//! # Example
//!
//! ```rust
//! use powerbi_api::{ClientId, ConfigError};
//!
//! let result = ClientId::new("");
//! assert!(matches!(result, Err(ConfigError::EmptyValue { field: "client_id" })));
//! ```

use thiserror::Error;

/// Errors that can occur while building configuration or loading credentials.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// A credential or configuration value was empty.
    #[error("Value for '{field}' cannot be empty.")]
    EmptyValue {
        /// The name of the empty field.
        field: &'static str,
    },

    /// A required credential field is missing.
    #[error("Missing required field: '{field}'. Provide either 'token' or all of 'tenant_id', 'client_id' and 'client_secret'.")]
    MissingRequiredField {
        /// The name of the missing field.
        field: &'static str,
    },

    /// Host URL is invalid.
    #[error("Invalid host URL '{url}'. Expected an http or https URL (e.g., 'https://api.powerbi.com/v1.0/myorg').")]
    InvalidHostUrl {
        /// The invalid URL that was provided.
        url: String,
    },

    /// The credentials file could not be read or parsed.
    #[error("Failed to load credentials from '{path}': {reason}")]
    CredentialsFile {
        /// The path of the credentials file.
        path: String,
        /// Why loading failed.
        reason: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_value_error_message() {
        let error = ConfigError::EmptyValue { field: "tenant_id" };
        assert_eq!(error.to_string(), "Value for 'tenant_id' cannot be empty.");
    }

    #[test]
    fn test_missing_required_field_error_message() {
        let error = ConfigError::MissingRequiredField {
            field: "client_secret",
        };
        let message = error.to_string();
        assert!(message.contains("client_secret"));
        assert!(message.contains("token"));
    }

    #[test]
    fn test_credentials_file_error_includes_path_and_reason() {
        let error = ConfigError::CredentialsFile {
            path: "/tmp/creds.yml".to_string(),
            reason: "No such file or directory".to_string(),
        };
        let message = error.to_string();
        assert!(message.contains("/tmp/creds.yml"));
        assert!(message.contains("No such file"));
    }

    #[test]
    fn test_error_implements_std_error() {
        let error = ConfigError::EmptyValue { field: "token" };
        let _: &dyn std::error::Error = &error;
    }
}

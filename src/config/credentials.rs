//! Credentials for authenticating against the Power BI service.
//!
//! Credentials are either a pre-issued bearer token or a service principal
//! (tenant id, client id and client secret) that is exchanged for a token via
//! [`generate_bearer_token`](crate::auth::generate_bearer_token).
//!
//! # Credential files
//!
//! A credential file is YAML with the optional keys `token`, `tenant_id`,
//! `client_id` and `client_secret`:
//!
//! ```yaml
//! tenant_id: contoso.onmicrosoft.com
//! client_id: 00000000-0000-0000-0000-000000000000
//! client_secret: my-secret
//! ```
//!
//! When `token` is present it is used as-is and the other keys are ignored.
//! Otherwise all three service principal keys are required.

use std::path::Path;

use serde::Deserialize;

use crate::config::{BearerToken, ClientId, ClientSecret, TenantId};
use crate::error::ConfigError;

/// A service principal registered in Azure AD.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ServicePrincipal {
    /// The directory the principal belongs to.
    pub tenant_id: TenantId,
    /// The application (client) id.
    pub client_id: ClientId,
    /// The client secret.
    pub client_secret: ClientSecret,
}

/// The credentials used to obtain an authenticated connection.
///
/// # Example
///
/// ```rust
/// use powerbi_api::Credentials;
///
/// let credentials = Credentials::from_yaml_str("token: abc123").unwrap();
/// assert!(matches!(credentials, Credentials::Token(_)));
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Credentials {
    /// A pre-issued bearer token.
    Token(BearerToken),
    /// A service principal whose secret is exchanged for a token.
    ServicePrincipal(ServicePrincipal),
}

/// Raw shape of a credential file.
#[derive(Debug, Default, Deserialize)]
struct CredentialsFile {
    token: Option<String>,
    tenant_id: Option<String>,
    client_id: Option<String>,
    client_secret: Option<String>,
}

impl Credentials {
    /// Creates token credentials.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::EmptyValue`] if the token is empty.
    pub fn token(token: impl Into<String>) -> Result<Self, ConfigError> {
        Ok(Self::Token(BearerToken::new(token)?))
    }

    /// Creates service principal credentials.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::EmptyValue`] if any value is empty.
    pub fn service_principal(
        tenant_id: impl Into<String>,
        client_id: impl Into<String>,
        client_secret: impl Into<String>,
    ) -> Result<Self, ConfigError> {
        Ok(Self::ServicePrincipal(ServicePrincipal {
            tenant_id: TenantId::new(tenant_id)?,
            client_id: ClientId::new(client_id)?,
            client_secret: ClientSecret::new(client_secret)?,
        }))
    }

    /// Parses credentials from YAML text.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::CredentialsFile`] if the YAML is malformed and
    /// [`ConfigError::MissingRequiredField`] if neither a token nor a complete
    /// service principal is present.
    pub fn from_yaml_str(yaml: &str) -> Result<Self, ConfigError> {
        Self::parse(yaml, "<inline>")
    }

    /// Loads credentials from a YAML file.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::CredentialsFile`] if the file cannot be read or
    /// parsed, and [`ConfigError::MissingRequiredField`] if neither a token
    /// nor a complete service principal is present.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let origin = path.display().to_string();
        tracing::debug!("Loading credentials from {}", origin);

        let contents =
            std::fs::read_to_string(path).map_err(|e| ConfigError::CredentialsFile {
                path: origin.clone(),
                reason: e.to_string(),
            })?;

        Self::parse(&contents, &origin)
    }

    fn parse(yaml: &str, origin: &str) -> Result<Self, ConfigError> {
        // An empty document deserializes to unit, not to a mapping
        let file: CredentialsFile = if yaml.trim().is_empty() {
            CredentialsFile::default()
        } else {
            serde_yaml::from_str(yaml).map_err(|e| ConfigError::CredentialsFile {
                path: origin.to_string(),
                reason: e.to_string(),
            })?
        };

        if let Some(token) = file.token {
            if file.tenant_id.is_some() || file.client_id.is_some() || file.client_secret.is_some() {
                tracing::warn!(
                    "Credentials in {} carry a token; service principal fields are ignored",
                    origin
                );
            }
            return Self::token(token);
        }

        let tenant_id = file
            .tenant_id
            .ok_or(ConfigError::MissingRequiredField { field: "tenant_id" })?;
        let client_id = file
            .client_id
            .ok_or(ConfigError::MissingRequiredField { field: "client_id" })?;
        let client_secret = file
            .client_secret
            .ok_or(ConfigError::MissingRequiredField {
                field: "client_secret",
            })?;

        Self::service_principal(tenant_id, client_id, client_secret)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_token_only_yaml() {
        let credentials = Credentials::from_yaml_str("token: abc123\n").unwrap();
        assert_eq!(
            credentials,
            Credentials::Token(BearerToken::new("abc123").unwrap())
        );
    }

    #[test]
    fn test_token_takes_precedence_over_service_principal() {
        let yaml = "token: abc\ntenant_id: t\nclient_id: c\nclient_secret: s\n";
        let credentials = Credentials::from_yaml_str(yaml).unwrap();
        assert!(matches!(credentials, Credentials::Token(_)));
    }

    #[test]
    fn test_service_principal_yaml() {
        let yaml = "tenant_id: contoso\nclient_id: app-1\nclient_secret: shh\n";
        let credentials = Credentials::from_yaml_str(yaml).unwrap();

        match credentials {
            Credentials::ServicePrincipal(principal) => {
                assert_eq!(principal.tenant_id.as_ref(), "contoso");
                assert_eq!(principal.client_id.as_ref(), "app-1");
                assert_eq!(principal.client_secret.as_ref(), "shh");
            }
            Credentials::Token(_) => panic!("Expected service principal credentials"),
        }
    }

    #[test]
    fn test_missing_client_secret_is_reported() {
        let yaml = "tenant_id: contoso\nclient_id: app-1\n";
        assert_eq!(
            Credentials::from_yaml_str(yaml),
            Err(ConfigError::MissingRequiredField {
                field: "client_secret"
            })
        );
    }

    #[test]
    fn test_empty_document_reports_missing_tenant() {
        assert_eq!(
            Credentials::from_yaml_str(""),
            Err(ConfigError::MissingRequiredField { field: "tenant_id" })
        );
    }

    #[test]
    fn test_malformed_yaml_is_a_credentials_file_error() {
        let result = Credentials::from_yaml_str("token: [unterminated");
        assert!(matches!(result, Err(ConfigError::CredentialsFile { .. })));
    }

    #[test]
    fn test_from_file_reads_yaml() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "token: from-file").unwrap();

        let credentials = Credentials::from_file(file.path()).unwrap();
        assert_eq!(
            credentials,
            Credentials::Token(BearerToken::new("from-file").unwrap())
        );
    }

    #[test]
    fn test_from_file_missing_file() {
        let result = Credentials::from_file("/definitely/not/here/creds.yml");
        match result {
            Err(ConfigError::CredentialsFile { path, .. }) => {
                assert!(path.contains("creds.yml"));
            }
            other => panic!("Expected CredentialsFile error, got {other:?}"),
        }
    }
}

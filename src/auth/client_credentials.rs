//! OAuth 2.0 Client Credentials Grant against Azure AD.
//!
//! A service principal exchanges its client id and secret for a bearer token
//! scoped to the Power BI API. No user interaction is involved.
//!
//! The token is requested from `{authority}/{tenant_id}/oauth2/token` with a
//! URL-encoded form. The authority defaults to
//! [`DEFAULT_AUTHORITY_HOST`](crate::config::DEFAULT_AUTHORITY_HOST) and can
//! be overridden through [`PowerBiConfig`].
//!
//! # Example
//!
//! ```rust,ignore
//! use powerbi_api::{ClientId, ClientSecret, PowerBiConfig, TenantId};
//! use powerbi_api::auth::generate_bearer_token;
//!
//! let token = generate_bearer_token(
//!     &PowerBiConfig::default(),
//!     &TenantId::new("contoso.onmicrosoft.com")?,
//!     &ClientId::new("00000000-0000-0000-0000-000000000000")?,
//!     &ClientSecret::new("secret")?,
//! )
//! .await?;
//! ```

use serde::{Deserialize, Serialize};

use crate::auth::AuthError;
use crate::clients::HttpError;
use crate::config::{BearerToken, ClientId, ClientSecret, PowerBiConfig, TenantId};

/// Grant type for client credentials.
const CLIENT_CREDENTIALS_GRANT_TYPE: &str = "client_credentials";

/// Resource the issued token is scoped to.
pub const POWER_BI_RESOURCE: &str = "https://analysis.windows.net/powerbi/api";

/// Form body for the client credentials exchange.
#[derive(Debug, Serialize)]
struct ClientCredentialsRequest<'a> {
    client_id: &'a str,
    grant_type: &'a str,
    resource: &'a str,
    response_mode: &'a str,
    client_secret: &'a str,
}

/// Successful token response. Only the token itself is used.
#[derive(Debug, Deserialize)]
struct AccessTokenResponse {
    access_token: String,
}

/// Returns the token endpoint for `tenant_id` under `config.authority_host()`.
#[must_use]
pub fn token_url(config: &PowerBiConfig, tenant_id: &TenantId) -> String {
    format!(
        "{}/{}/oauth2/token",
        config.authority_host().as_ref(),
        tenant_id.as_ref()
    )
}

/// Exchanges service principal credentials for a bearer token.
///
/// # Errors
///
/// - [`AuthError::Http`] on network failure
/// - [`AuthError::ClientCredentialsFailed`] if the authority rejects the
///   credentials or its response carries no usable `access_token`
pub async fn generate_bearer_token(
    config: &PowerBiConfig,
    tenant_id: &TenantId,
    client_id: &ClientId,
    client_secret: &ClientSecret,
) -> Result<BearerToken, AuthError> {
    // Step 1: Build the token URL
    let token_url = token_url(config, tenant_id);
    tracing::debug!("Requesting bearer token from {}", token_url);

    // Step 2: Create the request body
    let request_body = ClientCredentialsRequest {
        client_id: client_id.as_ref(),
        grant_type: CLIENT_CREDENTIALS_GRANT_TYPE,
        resource: POWER_BI_RESOURCE,
        response_mode: "query",
        client_secret: client_secret.as_ref(),
    };

    // Step 3: Send the POST request
    let mut builder = reqwest::Client::builder()
        .use_rustls_tls()
        .danger_accept_invalid_certs(!config.verify_tls());
    if let Some(timeout) = config.timeout() {
        builder = builder.timeout(timeout);
    }
    let client = builder.build().map_err(HttpError::from)?;

    let response = client
        .post(&token_url)
        .form(&request_body)
        .send()
        .await
        .map_err(HttpError::from)?;

    let status = response.status().as_u16();

    // Step 4: Handle error responses
    if !response.status().is_success() {
        let error_body = response.text().await.unwrap_or_default();
        return Err(AuthError::ClientCredentialsFailed {
            status,
            message: error_body,
        });
    }

    // Step 5: Parse the successful response
    let token_response: AccessTokenResponse =
        response
            .json()
            .await
            .map_err(|e| AuthError::ClientCredentialsFailed {
                status,
                message: format!("Failed to parse token response: {e}"),
            })?;

    BearerToken::new(token_response.access_token).map_err(|_| AuthError::ClientCredentialsFailed {
        status,
        message: "Token response carried an empty access_token".to_string(),
    })
}

// Verify types are Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<ClientCredentialsRequest<'_>>();
};

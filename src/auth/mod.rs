//! Authentication for the Power BI API client.
//!
//! The Power BI REST API accepts Azure AD bearer tokens. A token is either
//! supplied directly or minted from a service principal through the OAuth 2.0
//! client credentials grant.
//!
//! # Overview
//!
//! - [`generate_bearer_token`]: exchanges client credentials for a token
//! - [`AuthError`]: failures while obtaining a token
//!
//! Most callers never use this module directly; [`Tenant::connect`] and
//! [`Tenant::authenticate_by_file`] mint the token when needed.
//!
//! [`Tenant::connect`]: crate::Tenant::connect
//! [`Tenant::authenticate_by_file`]: crate::Tenant::authenticate_by_file

mod client_credentials;
mod error;

pub use client_credentials::{generate_bearer_token, token_url, POWER_BI_RESOURCE};
pub use error::AuthError;

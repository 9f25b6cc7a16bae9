//! User resource implementation.
//!
//! A [`User`] is a principal's access entry on an app or dataset. Users are
//! read-only projections; they carry no fetch operations of their own.

use serde::{Deserialize, Serialize};

use crate::resources::PowerBiResource;

/// A principal with access to an app or dataset.
///
/// App user listings name the access right `AppUserAccessRight`; dataset
/// user listings name it `datasetUserAccessRight`. Both decode into
/// [`app_user_access_right`](Self::app_user_access_right).
///
/// # Example
///
/// ```rust
/// use powerbi_api::resources::User;
///
/// let user: User = serde_json::from_value(serde_json::json!({
///     "AppUserAccessRight": "Viewer",
///     "displayName": "Ada",
///     "identifier": "ada@contoso.com",
///     "graphId": "1f2e",
///     "principalType": "User"
/// }))
/// .unwrap();
///
/// assert_eq!(user.display_name, "Ada");
/// assert!(user.email_address.is_none());
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct User {
    /// The access right granted (e.g., "Viewer", "Owner").
    #[serde(rename = "AppUserAccessRight", alias = "datasetUserAccessRight")]
    pub app_user_access_right: String,

    /// The email address, absent for groups and service principals.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email_address: Option<String>,

    /// The display name.
    pub display_name: String,

    /// The principal identifier (usually a UPN or object id).
    pub identifier: String,

    /// The Microsoft Graph object id.
    pub graph_id: String,

    /// "User", "Group" or "App".
    pub principal_type: String,
}

impl PowerBiResource for User {
    const NAME: &'static str = "User";
}

//! App resource implementation.
//!
//! This module provides the [`App`] resource for published Power BI apps as
//! seen by a tenant administrator.
//!
//! # Example
//!
//! ```rust,ignore
//! let apps = tenant.get_apps_as_admin(100).await?;
//! for app in &apps {
//!     let users = app.get_app_users(tenant.client()).await?;
//!     println!("{}: {} users", app.name, users.len());
//! }
//! ```

use serde::{Deserialize, Serialize};

use crate::clients::{HttpClient, QueryParams};
use crate::resources::{decode_collection, nullable, PowerBiResource, ResourceError, User};

/// A published Power BI app.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct App {
    /// The app id.
    pub id: String,

    /// The app name.
    pub name: String,

    /// When the app was last updated, as sent by the service.
    #[serde(deserialize_with = "nullable")]
    pub last_update: Option<String>,

    /// The app description.
    #[serde(deserialize_with = "nullable")]
    pub description: Option<String>,

    /// Who published the app.
    #[serde(deserialize_with = "nullable")]
    pub published_by: Option<String>,

    /// User entries embedded in the listing, kept as raw JSON.
    pub users: Vec<serde_json::Value>,
}

impl App {
    /// Path of the admin endpoint listing this app's users.
    #[must_use]
    pub fn users_path(&self) -> String {
        format!("admin/apps/{}/users", self.id)
    }

    /// Fetches the users with access to this app.
    ///
    /// Issues GET `admin/apps/{id}/users` and wraps each entry of `value`.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError`] if the request fails or any entry is not a
    /// valid [`User`].
    pub async fn get_app_users(&self, client: &HttpClient) -> Result<Vec<User>, ResourceError> {
        let body = client.get(self.users_path(), QueryParams::new()).await?;
        decode_collection(body)
    }
}

impl PowerBiResource for App {
    const NAME: &'static str = "App";
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn app_json() -> serde_json::Value {
        json!({
            "id": "f089354e-8366-4e18-aea3-4cb4a3a50b48",
            "name": "Sales",
            "lastUpdate": "2019-01-13T09:46:53.094+02:00",
            "description": "Quarterly sales",
            "publishedBy": "Ada",
            "users": [{"AppUserAccessRight": "Viewer"}]
        })
    }

    #[test]
    fn test_app_deserializes_from_admin_listing() {
        let app: App = serde_json::from_value(app_json()).unwrap();

        assert_eq!(app.id, "f089354e-8366-4e18-aea3-4cb4a3a50b48");
        assert_eq!(app.name, "Sales");
        assert_eq!(
            app.last_update.as_deref(),
            Some("2019-01-13T09:46:53.094+02:00")
        );
        assert_eq!(app.description.as_deref(), Some("Quarterly sales"));
        assert_eq!(app.published_by.as_deref(), Some("Ada"));
        assert_eq!(app.users.len(), 1);
    }

    #[test]
    fn test_app_missing_published_by_fails() {
        let mut value = app_json();
        value.as_object_mut().unwrap().remove("publishedBy");

        assert!(serde_json::from_value::<App>(value).is_err());
    }

    #[test]
    fn test_app_with_null_description() {
        let mut value = app_json();
        value["description"] = serde_json::Value::Null;
        value["publishedBy"] = serde_json::Value::Null;

        let app: App = serde_json::from_value(value).unwrap();
        assert!(app.description.is_none());
        assert!(app.published_by.is_none());
        assert_eq!(app.name, "Sales");
    }

    #[test]
    fn test_users_path() {
        let app: App = serde_json::from_value(app_json()).unwrap();
        assert_eq!(
            app.users_path(),
            "admin/apps/f089354e-8366-4e18-aea3-4cb4a3a50b48/users"
        );
    }
}

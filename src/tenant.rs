//! Tenant-level admin operations.
//!
//! A [`Tenant`] owns the connector for one Power BI tenant and exposes the
//! admin listings: apps, workspaces, datasets and activity events.
//!
//! # Connecting
//!
//! ```rust,ignore
//! use powerbi_api::{PowerBiConfig, Tenant};
//!
//! // From a YAML credential file (token, or tenant_id/client_id/client_secret)
//! let tenant = Tenant::authenticate_by_file("powerbi.yml", &PowerBiConfig::default()).await?;
//!
//! let workspaces = tenant.get_datasets(Tenant::DEFAULT_TOP).await?;
//! for workspace in &workspaces {
//!     for dataset in workspace.datasets() {
//!         println!("{} / {}", workspace.name, dataset.name);
//!     }
//! }
//! ```
//!
//! # App cache
//!
//! [`Tenant::get_apps_by_names`] loads the full admin app list once and
//! reuses it for every later lookup. [`Tenant::get_apps_as_admin`] always
//! goes to the service.

use std::collections::BTreeMap;
use std::path::Path;

use chrono::{DateTime, Utc};
use tokio::sync::OnceCell;

use crate::auth::{generate_bearer_token, AuthError};
use crate::clients::{HttpClient, HttpError, QueryParams};
use crate::config::{BearerToken, Credentials, PowerBiConfig};
use crate::resources::{
    activity_schema, decode_collection, ActivityEvent, ActivityEventPages, App, ResourceError,
    Workspace,
};

/// Filter restricting group listings to workspaces.
pub const WORKSPACE_FILTER: &str = "type eq 'Workspace'";

/// Options for [`Tenant::get_apps_by_names`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct AppNameParams {
    /// Also match `"<name> [Dev]"` for every requested name.
    pub include_dev: bool,
    /// Also match `"<name> [Test]"` for every requested name.
    pub include_test: bool,
}

/// Expands `names` with the `[Dev]` / `[Test]` variants selected by `params`.
///
/// Original names come first, then all dev variants, then all test variants.
///
/// # Example
///
/// ```rust
/// use powerbi_api::tenant::{expand_app_names, AppNameParams};
///
/// let params = AppNameParams { include_dev: true, include_test: false };
/// assert_eq!(expand_app_names(&["Sales"], params), vec!["Sales", "Sales [Dev]"]);
/// ```
#[must_use]
pub fn expand_app_names<S: AsRef<str>>(names: &[S], params: AppNameParams) -> Vec<String> {
    let originals = names.iter().map(|name| name.as_ref().to_string());
    let dev = names
        .iter()
        .filter(|_| params.include_dev)
        .map(|name| format!("{} [Dev]", name.as_ref()));
    let test = names
        .iter()
        .filter(|_| params.include_test)
        .map(|name| format!("{} [Test]", name.as_ref()));

    originals.chain(dev).chain(test).collect()
}

/// An authenticated connection to one Power BI tenant.
///
/// # Thread Safety
///
/// `Tenant` is `Send + Sync`. Concurrent first lookups through
/// [`get_apps_by_names`](Self::get_apps_by_names) populate the app cache
/// exactly once.
#[derive(Debug)]
pub struct Tenant {
    client: HttpClient,
    apps: OnceCell<Vec<App>>,
}

// Verify Tenant is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<Tenant>();
};

impl Tenant {
    /// Default page size for admin listings.
    pub const DEFAULT_TOP: u32 = 5000;

    /// Creates a tenant that authenticates with `token`.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError::Network`] if the HTTP client cannot be built.
    pub fn new(token: &BearerToken, config: &PowerBiConfig) -> Result<Self, HttpError> {
        Ok(Self::from_client(HttpClient::new(config, token)?))
    }

    /// Wraps an existing connector.
    #[must_use]
    pub fn from_client(client: HttpClient) -> Self {
        Self {
            client,
            apps: OnceCell::new(),
        }
    }

    /// Connects with `credentials`, minting a token first when they name a
    /// service principal.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError`] if the token exchange fails or the connector
    /// cannot be built.
    pub async fn connect(
        credentials: &Credentials,
        config: &PowerBiConfig,
    ) -> Result<Self, AuthError> {
        let token = match credentials {
            Credentials::Token(token) => token.clone(),
            Credentials::ServicePrincipal(principal) => {
                generate_bearer_token(
                    config,
                    &principal.tenant_id,
                    &principal.client_id,
                    &principal.client_secret,
                )
                .await?
            }
        };

        Ok(Self::new(&token, config)?)
    }

    /// Loads YAML credentials from `path` and connects with them.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::Config`] if the file is unreadable, malformed or
    /// incomplete, and any error of [`connect`](Self::connect).
    pub async fn authenticate_by_file(
        path: impl AsRef<Path>,
        config: &PowerBiConfig,
    ) -> Result<Self, AuthError> {
        let credentials = Credentials::from_file(path)?;
        Self::connect(&credentials, config).await
    }

    /// Returns the connector, for fetch operations on resources.
    #[must_use]
    pub const fn client(&self) -> &HttpClient {
        &self.client
    }

    /// Lists published apps as an administrator. Never cached.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError`] if the request fails or any app does not
    /// decode.
    pub async fn get_apps_as_admin(&self, top: u32) -> Result<Vec<App>, ResourceError> {
        let body = self
            .client
            .get("admin/apps", QueryParams::new().with("$top", top))
            .await?;
        decode_collection(body)
    }

    /// Returns cached apps whose name exactly matches one of `names`.
    ///
    /// The first call loads the admin app list (top
    /// [`DEFAULT_TOP`](Self::DEFAULT_TOP)); later calls reuse it. Results
    /// follow cache order, not the order of `names`.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError`] if the app list has to be loaded and that
    /// fails. A failed load is not cached.
    pub async fn get_apps_by_names<S: AsRef<str>>(
        &self,
        names: &[S],
        params: AppNameParams,
    ) -> Result<Vec<&App>, ResourceError> {
        let apps = self
            .apps
            .get_or_try_init(|| async {
                let apps = self.get_apps_as_admin(Self::DEFAULT_TOP).await?;
                tracing::debug!("Cached {} apps", apps.len());
                Ok::<_, ResourceError>(apps)
            })
            .await?;

        let wanted = expand_app_names(names, params);
        Ok(apps
            .iter()
            .filter(|app| wanted.iter().any(|name| *name == app.name))
            .collect())
    }

    /// Lists workspaces (groups of type `Workspace`).
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError`] if the request fails or any workspace does
    /// not decode.
    pub async fn get_workspaces(&self, top: u32) -> Result<Vec<Workspace>, ResourceError> {
        self.list_workspaces(Self::workspace_query(top)).await
    }

    /// Lists workspaces with their datasets expanded.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError`] if the request fails or any workspace or
    /// dataset does not decode.
    pub async fn get_datasets(&self, top: u32) -> Result<Vec<Workspace>, ResourceError> {
        self.list_workspaces(Self::workspace_query(top).with("$expand", "datasets"))
            .await
    }

    /// Returns a lazy listing of activity events between `start` and `end`.
    #[must_use]
    pub const fn activity_events(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> ActivityEventPages<'_> {
        ActivityEventPages::new(&self.client, start, end)
    }

    /// Fetches every activity event between `start` and `end`.
    ///
    /// # Errors
    ///
    /// Returns the first [`ResourceError`] encountered.
    pub async fn get_activity_events(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<Vec<ActivityEvent>, ResourceError> {
        self.activity_events(start, end).collect_events().await
    }

    /// Maps each activity name seen between `start` and `end` to the field
    /// names of its first occurrence.
    ///
    /// # Errors
    ///
    /// Returns the first [`ResourceError`] encountered.
    pub async fn get_activity_schema(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<BTreeMap<String, Vec<String>>, ResourceError> {
        let events = self.get_activity_events(start, end).await?;
        Ok(activity_schema(&events))
    }

    fn workspace_query(top: u32) -> QueryParams {
        QueryParams::new()
            .with("$filter", WORKSPACE_FILTER)
            .with("$top", top)
    }

    async fn list_workspaces(&self, query: QueryParams) -> Result<Vec<Workspace>, ResourceError> {
        let body = self.client.get("admin/groups", query).await?;
        decode_collection(body)
    }
}

//! Dataset resource implementation.
//!
//! Datasets arrive embedded in workspace listings (`$expand=datasets`).
//! Each dataset owns its upstream datasets and its user entries; a dataset
//! built as a workspace member also records the id of that workspace.

use serde::{Deserialize, Serialize};

use crate::resources::{nullable, PowerBiResource, User};

/// A Power BI dataset.
///
/// # Example
///
/// ```rust
/// use powerbi_api::resources::Dataset;
///
/// let dataset: Dataset = serde_json::from_value(serde_json::json!({
///     "id": "cfafbeb1-8037-4d0c-896e-a46fb27ff229",
///     "name": "SalesMarketing",
///     "addRowsAPIEnabled": false,
///     "isRefreshable": true,
///     "isEffectiveIdentityRequired": false,
///     "isEffectiveIdentityRolesRequired": false,
///     "targetStorageMode": "Abf",
///     "createdDate": "2019-01-13T09:46:53.094Z",
///     "contentProviderType": "PbixInImportMode",
///     "upstreamDatasets": [],
///     "schemaMayNotBeUpToDate": false,
///     "users": []
/// }))
/// .unwrap();
///
/// assert_eq!(dataset.name, "SalesMarketing");
/// assert!(dataset.workspace_id.is_none());
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Dataset {
    /// The dataset id.
    pub id: String,

    /// The dataset name.
    pub name: String,

    /// Whether rows can be pushed through the push datasets API.
    #[serde(rename = "addRowsAPIEnabled")]
    pub add_rows_api_enabled: bool,

    /// Whether the dataset can be refreshed.
    pub is_refreshable: bool,

    /// Whether an effective identity must be supplied for embed tokens.
    pub is_effective_identity_required: bool,

    /// Whether RLS roles must be supplied with the effective identity.
    pub is_effective_identity_roles_required: bool,

    /// The storage mode (e.g., "Abf", "PremiumFiles").
    #[serde(deserialize_with = "nullable")]
    pub target_storage_mode: Option<String>,

    /// When the dataset was created, as sent by the service.
    #[serde(deserialize_with = "nullable")]
    pub created_date: Option<String>,

    /// How the content was provided (e.g., "PbixInImportMode").
    #[serde(deserialize_with = "nullable")]
    pub content_provider_type: Option<String>,

    /// Datasets this dataset depends on. They carry no workspace id.
    pub upstream_datasets: Vec<Dataset>,

    /// Whether the cached schema may be stale.
    pub schema_may_not_be_up_to_date: bool,

    /// Users with access to the dataset.
    pub users: Vec<User>,

    /// The id of the workspace this dataset was listed under, if any.
    #[serde(skip)]
    pub workspace_id: Option<String>,
}

impl Dataset {
    /// Returns this dataset stamped with the id of its parent workspace.
    #[must_use]
    pub fn in_workspace(mut self, workspace_id: impl Into<String>) -> Self {
        self.workspace_id = Some(workspace_id.into());
        self
    }
}

impl PowerBiResource for Dataset {
    const NAME: &'static str = "Dataset";
}

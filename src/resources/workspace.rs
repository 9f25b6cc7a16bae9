//! Workspace resource implementation.
//!
//! Workspaces come from the admin groups endpoint. When the listing is
//! requested with `$expand=datasets`, each workspace owns its datasets and
//! every one of them is stamped with the workspace id at decode time.

use serde::{Deserialize, Serialize};

use crate::resources::{nullable, Dataset, PowerBiResource};

/// A Power BI workspace (group).
///
/// # Example
///
/// ```rust
/// use powerbi_api::resources::Workspace;
///
/// let workspace: Workspace = serde_json::from_value(serde_json::json!({
///     "id": "e380d1d0-1fa6-460b-9a90-1a5c6b02414c",
///     "isReadOnly": false,
///     "isOnDedicatedCapacity": true,
///     "type": "Workspace",
///     "state": "Active",
///     "name": "Finance"
/// }))
/// .unwrap();
///
/// assert_eq!(workspace.workspace_type, "Workspace");
/// assert!(workspace.datasets.is_none());
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(from = "WorkspaceRecord", rename_all = "camelCase")]
pub struct Workspace {
    /// The workspace id.
    pub id: String,

    /// Whether the workspace is read-only for the caller.
    pub is_read_only: bool,

    /// Whether the workspace is assigned to a dedicated capacity.
    pub is_on_dedicated_capacity: bool,

    /// The workspace type (e.g., "Workspace", "PersonalGroup").
    #[serde(rename = "type")]
    pub workspace_type: String,

    /// The workspace state (e.g., "Active", "Deleted").
    pub state: Option<String>,

    /// The workspace name.
    pub name: String,

    /// Datasets, present only when the listing expanded them.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub datasets: Option<Vec<Dataset>>,
}

/// Wire shape of a workspace before its datasets are stamped.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct WorkspaceRecord {
    id: String,
    is_read_only: bool,
    is_on_dedicated_capacity: bool,
    #[serde(rename = "type")]
    workspace_type: String,
    #[serde(deserialize_with = "nullable")]
    state: Option<String>,
    name: String,
    #[serde(default)]
    datasets: Option<Vec<Dataset>>,
}

impl From<WorkspaceRecord> for Workspace {
    fn from(record: WorkspaceRecord) -> Self {
        let datasets = record.datasets.map(|datasets| {
            datasets
                .into_iter()
                .map(|dataset| dataset.in_workspace(record.id.clone()))
                .collect()
        });

        Self {
            id: record.id,
            is_read_only: record.is_read_only,
            is_on_dedicated_capacity: record.is_on_dedicated_capacity,
            workspace_type: record.workspace_type,
            state: record.state,
            name: record.name,
            datasets,
        }
    }
}

impl Workspace {
    /// Iterates over the workspace's datasets; empty when none were expanded.
    pub fn datasets(&self) -> impl Iterator<Item = &Dataset> {
        self.datasets.iter().flatten()
    }
}

impl PowerBiResource for Workspace {
    const NAME: &'static str = "Workspace";
}

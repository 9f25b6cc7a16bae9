//! Typed projections of Power BI admin API objects.
//!
//! Each resource is a plain data struct deserialized straight from the JSON
//! the service returns. Resources never hold the connector; operations that
//! fetch related data borrow an [`HttpClient`](crate::HttpClient) at call
//! time.
//!
//! # Resources
//!
//! - [`App`]: a published app; [`App::get_app_users`] lists its users
//! - [`User`]: a principal's access entry on an app or dataset
//! - [`Workspace`]: a workspace, optionally owning its [`Dataset`]s
//! - [`Dataset`]: a dataset with its upstream datasets and users
//! - [`ActivityEvent`]: one audit event, read page by page through
//!   [`ActivityEventPages`]
//!
//! # Ownership
//!
//! Parents own their children. A dataset listed under a workspace records
//! the workspace's id in [`Dataset::workspace_id`]; upstream datasets record
//! nothing.

mod activity;
mod app;
mod collection;
mod dataset;
mod errors;
mod user;
mod workspace;

pub use activity::{
    activity_schema, format_activity_timestamp, ActivityEvent, ActivityEventPage,
    ActivityEventPages, ACTIVITY_EVENTS_PATH,
};
pub use app::App;
pub(crate) use collection::nullable;
pub use collection::{decode_collection, decode_json, ODataCollection, PowerBiResource};
pub use dataset::Dataset;
pub use errors::ResourceError;
pub use user::User;
pub use workspace::Workspace;

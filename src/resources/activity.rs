//! Activity event resource and its paginated listing.
//!
//! The admin activity events endpoint returns one page at a time. The first
//! page is requested with a start and end timestamp; each following page is
//! fetched from the `continuationUri` of the previous one. The listing ends
//! once a page carries no `continuationToken` or is flagged as the last
//! result set.
//!
//! [`ActivityEventPages`] walks those pages lazily and can be rewound with
//! [`ActivityEventPages::restart`].
//!
//! # Example
//!
//! ```rust,ignore
//! use chrono::{TimeZone, Utc};
//!
//! let start = Utc.with_ymd_and_hms(2024, 3, 1, 0, 0, 0).unwrap();
//! let end = Utc.with_ymd_and_hms(2024, 3, 1, 23, 59, 59).unwrap();
//!
//! let mut pages = tenant.activity_events(start, end);
//! while let Some(page) = pages.next_page().await? {
//!     for event in &page.activity_event_entities {
//!         println!("{}", event.activity);
//!     }
//! }
//! ```

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::clients::{HttpClient, HttpMethod, QueryParams};
use crate::resources::{decode_json, PowerBiResource, ResourceError};

/// Path of the admin activity events endpoint.
pub const ACTIVITY_EVENTS_PATH: &str = "admin/activityevents";

/// Formats a timestamp the way the activity events endpoint expects it:
/// quoted ISO-8601 with milliseconds and a `Z` suffix.
///
/// # Example
///
/// ```rust
/// use chrono::{TimeZone, Utc};
/// use powerbi_api::resources::format_activity_timestamp;
///
/// let at = Utc.with_ymd_and_hms(2024, 3, 1, 8, 30, 0).unwrap();
/// assert_eq!(format_activity_timestamp(&at), "'2024-03-01T08:30:00.000Z'");
/// ```
#[must_use]
pub fn format_activity_timestamp(at: &DateTime<Utc>) -> String {
    format!("'{}'", at.format("%Y-%m-%dT%H:%M:%S%.3fZ"))
}

/// A single audit event.
///
/// Only the activity name is typed; the fields differ per activity and are
/// kept as raw JSON in payload order.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(try_from = "Map<String, Value>", into = "Map<String, Value>")]
pub struct ActivityEvent {
    /// The activity name (e.g., "ViewReport").
    pub activity: String,

    /// Every field of the event, `Activity` included.
    pub fields: Map<String, Value>,
}

impl ActivityEvent {
    /// Key holding the activity name.
    pub const ACTIVITY_KEY: &'static str = "Activity";

    /// Returns the event's field names in payload order.
    #[must_use]
    pub fn field_names(&self) -> Vec<String> {
        self.fields.keys().cloned().collect()
    }
}

impl TryFrom<Map<String, Value>> for ActivityEvent {
    type Error = String;

    fn try_from(fields: Map<String, Value>) -> Result<Self, Self::Error> {
        let activity = match fields.get(Self::ACTIVITY_KEY) {
            Some(Value::String(activity)) => activity.clone(),
            Some(other) => return Err(format!("invalid `Activity` value: {other}")),
            None => return Err("missing field `Activity`".to_string()),
        };
        Ok(Self { activity, fields })
    }
}

impl From<ActivityEvent> for Map<String, Value> {
    fn from(event: ActivityEvent) -> Self {
        event.fields
    }
}

impl PowerBiResource for ActivityEvent {
    const NAME: &'static str = "ActivityEvent";
}

/// One page of the activity events listing.
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ActivityEventPage {
    /// The events on this page.
    pub activity_event_entities: Vec<ActivityEvent>,

    /// Absolute URL of the next page.
    #[serde(default)]
    pub continuation_uri: Option<String>,

    /// Opaque token identifying the next page; absent on the last page.
    #[serde(default)]
    pub continuation_token: Option<String>,

    /// Set by the service on the final page.
    #[serde(default)]
    pub last_result_set: Option<bool>,
}

impl ActivityEventPage {
    /// Returns true if no page follows this one.
    #[must_use]
    pub fn is_last(&self) -> bool {
        self.continuation_token.is_none() || self.last_result_set == Some(true)
    }

    fn next_cursor(&self) -> Result<Cursor, ResourceError> {
        if self.is_last() {
            return Ok(Cursor::Done);
        }
        self.continuation_uri
            .clone()
            .map(Cursor::Next)
            .ok_or_else(|| ResourceError::UnexpectedBody {
                resource: Self::NAME,
                reason: "continuationToken without continuationUri".to_string(),
            })
    }
}

impl PowerBiResource for ActivityEventPage {
    const NAME: &'static str = "ActivityEventPage";
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Cursor {
    Start,
    Next(String),
    Done,
}

/// A restartable lazy sequence of activity event pages.
///
/// No request is made until [`next_page`](Self::next_page) is called. A
/// failed fetch leaves the cursor in place, so the next call retries the
/// same page.
#[derive(Debug)]
pub struct ActivityEventPages<'a> {
    client: &'a HttpClient,
    start: DateTime<Utc>,
    end: DateTime<Utc>,
    cursor: Cursor,
}

impl<'a> ActivityEventPages<'a> {
    /// Creates a listing of events between `start` and `end`.
    #[must_use]
    pub const fn new(client: &'a HttpClient, start: DateTime<Utc>, end: DateTime<Utc>) -> Self {
        Self {
            client,
            start,
            end,
            cursor: Cursor::Start,
        }
    }

    /// Query parameters of the first page.
    #[must_use]
    pub fn first_page_query(&self) -> QueryParams {
        QueryParams::new()
            .with("startDateTime", format_activity_timestamp(&self.start))
            .with("endDateTime", format_activity_timestamp(&self.end))
    }

    /// Returns true once the last page has been returned.
    #[must_use]
    pub fn is_done(&self) -> bool {
        self.cursor == Cursor::Done
    }

    /// Rewinds to the first page.
    pub fn restart(&mut self) {
        self.cursor = Cursor::Start;
    }

    /// Fetches the next page, or returns `None` once the listing is done.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError`] if the request fails or the page does not
    /// decode.
    pub async fn next_page(&mut self) -> Result<Option<ActivityEventPage>, ResourceError> {
        let body = match &self.cursor {
            Cursor::Done => return Ok(None),
            Cursor::Start => {
                self.client
                    .get(ACTIVITY_EVENTS_PATH, self.first_page_query())
                    .await?
            }
            Cursor::Next(uri) => self.client.simple_request(HttpMethod::Get, uri).await?,
        };

        let page: ActivityEventPage = decode_json(ActivityEventPage::NAME, body)?;
        self.cursor = page.next_cursor()?;

        tracing::debug!(
            "Fetched {} activity events (last page: {})",
            page.activity_event_entities.len(),
            self.is_done()
        );

        Ok(Some(page))
    }

    /// Drains the remaining pages and returns their events in order.
    ///
    /// # Errors
    ///
    /// Returns the first [`ResourceError`] encountered; no partial result is
    /// returned.
    pub async fn collect_events(&mut self) -> Result<Vec<ActivityEvent>, ResourceError> {
        let mut events = Vec::new();
        while let Some(page) = self.next_page().await? {
            events.extend(page.activity_event_entities);
        }
        Ok(events)
    }
}

/// Maps each distinct activity name to the field names of its first
/// occurrence in `events`.
#[must_use]
pub fn activity_schema<'e>(
    events: impl IntoIterator<Item = &'e ActivityEvent>,
) -> BTreeMap<String, Vec<String>> {
    let mut schema = BTreeMap::new();
    for event in events {
        schema
            .entry(event.activity.clone())
            .or_insert_with(|| event.field_names());
    }
    schema
}

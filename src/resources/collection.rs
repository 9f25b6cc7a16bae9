//! Decoding of response bodies into resources.
//!
//! Power BI list endpoints wrap their items in an OData envelope:
//!
//! ```json
//! { "@odata.context": "...", "value": [ { ... }, { ... } ] }
//! ```
//!
//! [`decode_collection`] unwraps `value` and deserializes each item.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};

use crate::clients::ResponseBody;
use crate::resources::ResourceError;

/// A typed projection of one kind of Power BI JSON object.
pub trait PowerBiResource: DeserializeOwned {
    /// The type name used in error messages (e.g., "Workspace").
    const NAME: &'static str;
}

/// The OData envelope around list results.
#[derive(Debug, Clone, Deserialize)]
pub struct ODataCollection<T> {
    /// The items of the collection.
    pub value: Vec<T>,
}

/// Decodes a JSON response body into `T`.
///
/// # Errors
///
/// Returns [`ResourceError::UnexpectedBody`] for an empty or non-JSON body
/// and [`ResourceError::Decode`] if the document does not match `T`.
pub fn decode_json<T: DeserializeOwned>(
    resource: &'static str,
    body: ResponseBody,
) -> Result<T, ResourceError> {
    let value = match body {
        ResponseBody::Json(value) => value,
        other => {
            return Err(ResourceError::UnexpectedBody {
                resource,
                reason: format!("expected a JSON document, got a {} body", other.kind()),
            })
        }
    };

    serde_json::from_value(value).map_err(|source| ResourceError::Decode { resource, source })
}

/// Decodes the `value` array of an OData collection into resources.
///
/// # Errors
///
/// See [`decode_json`]. A missing `value` key is a decode error.
pub fn decode_collection<T: PowerBiResource>(body: ResponseBody) -> Result<Vec<T>, ResourceError> {
    let collection: ODataCollection<T> = decode_json(T::NAME, body)?;
    Ok(collection.value)
}

/// Reads a key that must be present but may be `null`.
///
/// A plain `Option` field also accepts a missing key; routing it through
/// `deserialize_with` keeps the key required.
pub(crate) fn nullable<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer)
}

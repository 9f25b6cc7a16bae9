//! Query string construction.
//!
//! [`QueryParams`] is an insertion-ordered mapping from parameter name to
//! [`QueryValue`]. [`build_query_string`] renders it:
//!
//! - `Null` entries are dropped
//! - booleans render as `true` / `false`
//! - lists are comma-joined without escaping their elements
//! - text and numbers are percent-encoded (`/` stays literal), except the
//!   value of a parameter named exactly `query`, which passes through verbatim
//! - names are never escaped
//!
//! A non-empty result is prefixed with `?`; no parameters yield `""`.
//!
//! # Example
//!
//! ```rust
//! use powerbi_api::clients::{build_query_string, QueryParams};
//!
//! let params = QueryParams::new()
//!     .with("$filter", "type eq 'Workspace'")
//!     .with("$top", 5000)
//!     .with("$expand", None::<String>);
//!
//! assert_eq!(
//!     build_query_string(&params),
//!     "?$filter=type%20eq%20%27Workspace%27&$top=5000"
//! );
//! ```

/// Parameter name whose value is never percent-encoded.
pub const UNESCAPED_PARAMETER: &str = "query";

/// A single query parameter value.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum QueryValue {
    /// Omitted from the query string.
    Null,
    /// Rendered as `true` or `false`.
    Bool(bool),
    /// Rendered in decimal.
    Number(i64),
    /// Rendered percent-encoded (unless the parameter is `query`).
    Text(String),
    /// Rendered comma-joined, elements unescaped.
    List(Vec<String>),
}

impl QueryValue {
    /// Renders this value for the parameter `name`, or `None` for `Null`.
    #[must_use]
    pub fn render(&self, name: &str) -> Option<String> {
        match self {
            Self::Null => None,
            Self::Bool(value) => Some(value.to_string()),
            Self::List(items) => Some(items.join(",")),
            Self::Number(value) => Some(escape(name, &value.to_string())),
            Self::Text(value) => Some(escape(name, value)),
        }
    }
}

fn escape(name: &str, value: &str) -> String {
    if name == UNESCAPED_PARAMETER {
        return value.to_string();
    }
    // `/` stays literal
    value
        .split('/')
        .map(|segment| urlencoding::encode(segment).into_owned())
        .collect::<Vec<_>>()
        .join("/")
}

impl From<bool> for QueryValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<i64> for QueryValue {
    fn from(value: i64) -> Self {
        Self::Number(value)
    }
}

impl From<i32> for QueryValue {
    fn from(value: i32) -> Self {
        Self::Number(i64::from(value))
    }
}

impl From<u32> for QueryValue {
    fn from(value: u32) -> Self {
        Self::Number(i64::from(value))
    }
}

impl From<&str> for QueryValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for QueryValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<Vec<String>> for QueryValue {
    fn from(items: Vec<String>) -> Self {
        Self::List(items)
    }
}

impl From<Vec<&str>> for QueryValue {
    fn from(items: Vec<&str>) -> Self {
        Self::List(items.into_iter().map(str::to_string).collect())
    }
}

impl<T: Into<Self>> From<Option<T>> for QueryValue {
    fn from(value: Option<T>) -> Self {
        value.map_or(Self::Null, Into::into)
    }
}

/// Insertion-ordered query parameters.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct QueryParams {
    entries: Vec<(String, QueryValue)>,
}

impl QueryParams {
    /// Creates an empty parameter set.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Sets `name` to `value`, replacing an existing entry in place.
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<QueryValue>) {
        let name = name.into();
        let value = value.into();
        if let Some(entry) = self.entries.iter_mut().find(|(key, _)| *key == name) {
            entry.1 = value;
        } else {
            self.entries.push((name, value));
        }
    }

    /// Builder-style [`insert`](Self::insert).
    #[must_use]
    pub fn with(mut self, name: impl Into<String>, value: impl Into<QueryValue>) -> Self {
        self.insert(name, value);
        self
    }

    /// Returns the value stored for `name`.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&QueryValue> {
        self.entries
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value)
    }

    /// Returns true if no parameters are set, including `Null` ones.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterates over the entries in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &QueryValue)> {
        self.entries.iter().map(|(key, value)| (key.as_str(), value))
    }

    /// Renders the parameters; see [`build_query_string`].
    #[must_use]
    pub fn to_query_string(&self) -> String {
        build_query_string(self)
    }
}

impl<K, V> FromIterator<(K, V)> for QueryParams
where
    K: Into<String>,
    V: Into<QueryValue>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut params = Self::new();
        for (name, value) in iter {
            params.insert(name, value);
        }
        params
    }
}

/// Builds a query string, including the leading `?`, from `params`.
#[must_use]
pub fn build_query_string(params: &QueryParams) -> String {
    let query = params
        .iter()
        .filter_map(|(name, value)| value.render(name).map(|rendered| format!("{name}={rendered}")))
        .collect::<Vec<_>>()
        .join("&");

    if query.is_empty() {
        String::new()
    } else {
        format!("?{query}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_params_render_empty_string() {
        assert_eq!(build_query_string(&QueryParams::new()), "");
    }

    #[test]
    fn test_only_null_params_render_empty_string() {
        let params = QueryParams::new().with("a", QueryValue::Null);
        assert_eq!(build_query_string(&params), "");
    }

    #[test]
    fn test_booleans_render_lowercase() {
        let params = QueryParams::new().with("a", true).with("b", false);
        assert_eq!(build_query_string(&params), "?a=true&b=false");
    }

    #[test]
    fn test_lists_are_comma_joined_unescaped() {
        let params = QueryParams::new().with("a", vec!["x", "y"]);
        assert_eq!(build_query_string(&params), "?a=x,y");

        let params = QueryParams::new().with("a", vec!["x y", "z"]);
        assert_eq!(build_query_string(&params), "?a=x y,z");
    }

    #[test]
    fn test_query_parameter_is_not_escaped() {
        let params = QueryParams::new().with("query", "Activity eq 'x'");
        assert_eq!(build_query_string(&params), "?query=Activity eq 'x'");
    }

    #[test]
    fn test_other_text_is_escaped() {
        let params = QueryParams::new().with("other", "a b");
        assert_eq!(build_query_string(&params), "?other=a%20b");
    }

    #[test]
    fn test_slash_is_kept_literal() {
        let params = QueryParams::new().with("other", "a/b c");
        assert_eq!(build_query_string(&params), "?other=a/b%20c");
    }

    #[test]
    fn test_colon_and_quotes_are_escaped() {
        let params = QueryParams::new().with("startDateTime", "'2024-01-01T00:00:00.000Z'");
        assert_eq!(
            build_query_string(&params),
            "?startDateTime=%272024-01-01T00%3A00%3A00.000Z%27"
        );
    }

    #[test]
    fn test_null_entries_are_dropped_between_others() {
        let params = QueryParams::new()
            .with("a", "1")
            .with("b", None::<&str>)
            .with("c", "3");
        let rendered = build_query_string(&params);
        assert_eq!(rendered, "?a=1&c=3");
        assert!(!rendered.contains("b="));
    }

    #[test]
    fn test_numbers_render_in_decimal() {
        let params = QueryParams::new().with("$top", 5000_u32).with("$skip", -1);
        assert_eq!(build_query_string(&params), "?$top=5000&$skip=-1");
    }

    #[test]
    fn test_false_and_empty_text_are_still_rendered() {
        let params = QueryParams::new().with("flag", false).with("name", "");
        assert_eq!(build_query_string(&params), "?flag=false&name=");
    }

    #[test]
    fn test_insert_replaces_in_place() {
        let mut params = QueryParams::new().with("a", 1).with("b", 2);
        params.insert("a", 3);
        assert_eq!(build_query_string(&params), "?a=3&b=2");
        assert_eq!(params.get("a"), Some(&QueryValue::Number(3)));
    }

    #[test]
    fn test_from_iterator_preserves_order() {
        let params: QueryParams = [("z", "1"), ("a", "2")].into_iter().collect();
        assert_eq!(params.to_query_string(), "?z=1&a=2");
    }
}

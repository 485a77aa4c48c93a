//! Notion payloads and the response model.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::collections::HashMap;

/// Body of a `databases/{id}/query` response.
///
/// Rows are decoded one at a time so a malformed row never fails the body.
#[derive(Debug, Default, Deserialize)]
pub struct QueryResponse {
    #[serde(default, deserialize_with = "lenient_pages")]
    pub results: Vec<Page>,
    /// Whether Notion truncated the result set. Never followed.
    #[serde(default)]
    pub has_more: bool,
    pub next_cursor: Option<String>,
}

/// A Notion page (database row).
#[derive(Debug, Default, Deserialize)]
pub struct Page {
    #[serde(default, deserialize_with = "lenient_string")]
    pub id: Option<String>,
    #[serde(default, deserialize_with = "lenient_properties")]
    pub properties: HashMap<String, PropertyValue>,
}

/// A single page property.
///
/// Only the fields this Lambda reads are modeled, and they are kept as raw
/// JSON so a wrong-typed value is judged per row instead of failing the body.
#[derive(Debug, Default, Clone, Deserialize)]
pub struct PropertyValue {
    pub created_time: Option<Value>,
    pub checkbox: Option<Value>,
}

/// `null` becomes no rows; a row that is not a page object becomes an empty
/// page.
fn lenient_pages<'de, D>(deserializer: D) -> Result<Vec<Page>, D::Error>
where
    D: Deserializer<'de>,
{
    let rows = Option::<Vec<Value>>::deserialize(deserializer)?;
    Ok(rows
        .unwrap_or_default()
        .into_iter()
        .map(|row| serde_json::from_value(row).unwrap_or_default())
        .collect())
}

fn lenient_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(value.as_str().map(String::from))
}

/// Anything but an object is an empty map; non-object entries are dropped.
fn lenient_properties<'de, D>(deserializer: D) -> Result<HashMap<String, PropertyValue>, D::Error>
where
    D: Deserializer<'de>,
{
    let Value::Object(entries) = Value::deserialize(deserializer)? else {
        return Ok(HashMap::new());
    };
    Ok(entries
        .into_iter()
        .filter(|(_, value)| value.is_object())
        .filter_map(|(name, value)| Some((name, serde_json::from_value(value).ok()?)))
        .collect())
}

/// One day in the response array.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DateEntry {
    pub date: String,
    #[serde(rename = "isChecked")]
    pub is_checked: bool,
}

/// Error body returned with a 500.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_query_response() {
        let body = json!({
            "object": "list",
            "results": [{
                "object": "page",
                "id": "page-1",
                "properties": {
                    "Date": {"id": "a", "type": "created_time", "created_time": "2024-03-14T10:00:00.000Z"},
                    "Done": {"id": "b", "type": "checkbox", "checkbox": true},
                    "Name": {"id": "title", "type": "title", "title": [{"plain_text": "Run"}]}
                }
            }],
            "has_more": true,
            "next_cursor": "cursor-2"
        });

        let response: QueryResponse = serde_json::from_value(body).unwrap();
        assert_eq!(response.results.len(), 1);
        assert!(response.has_more);

        let page = &response.results[0];
        assert_eq!(page.id.as_deref(), Some("page-1"));
        assert_eq!(
            page.properties["Date"].created_time,
            Some(json!("2024-03-14T10:00:00.000Z"))
        );
        assert_eq!(page.properties["Done"].checkbox, Some(json!(true)));
        assert!(page.properties["Name"].checkbox.is_none());
    }

    #[test]
    fn test_page_without_properties() {
        let page: Page = serde_json::from_value(json!({"id": "page-2"})).unwrap();
        assert!(page.properties.is_empty());
    }

    #[test]
    fn test_null_properties_and_odd_rows() {
        let body = json!({
            "results": [
                {"id": 7, "properties": null},
                {"id": "page-3", "properties": {"Date": null, "Done": "yes"}},
                "not a page"
            ]
        });

        let response: QueryResponse = serde_json::from_value(body).unwrap();
        assert_eq!(response.results.len(), 3);
        assert!(response.results[0].id.is_none());
        assert!(response.results[0].properties.is_empty());
        assert!(response.results[1].properties.is_empty());
        assert!(response.results[2].properties.is_empty());
    }

    #[test]
    fn test_null_results() {
        let response: QueryResponse = serde_json::from_value(json!({"results": null})).unwrap();
        assert!(response.results.is_empty());
    }

    #[test]
    fn test_date_entry_serializes_camel_case() {
        let entry = DateEntry {
            date: "2024-03-15".to_string(),
            is_checked: true,
        };
        assert_eq!(
            serde_json::to_value(&entry).unwrap(),
            json!({"date": "2024-03-15", "isChecked": true})
        );
    }
}

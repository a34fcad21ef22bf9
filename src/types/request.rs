//! Wire records, one per endpoint.
//!
//! POST records are sent as JSON bodies, `*Query` records as form-encoded
//! query strings. Field order follows the service's expected layout.

use bon::Builder;
use serde::Serialize;

use crate::Timestamp;

/// Paging and ordering for list endpoints.
///
/// The service treats `limit == 0` and an empty `order` as "use server default".
#[non_exhaustive]
#[derive(Clone, Debug, Default, Eq, PartialEq, Builder)]
pub struct Page {
    #[builder(default)]
    pub offset: u64,
    #[builder(default)]
    pub limit: u64,
    #[builder(default, into)]
    pub order: String,
}

#[non_exhaustive]
#[derive(Clone, Debug, Serialize)]
pub struct CreateObjectRequest<'req> {
    pub key: &'req str,
    pub categories: Vec<&'req str>,
    pub content: &'req str,
    pub time: Timestamp,
    pub sg: String,
}

#[non_exhaustive]
#[derive(Clone, Debug, Serialize)]
pub struct UpdateObjectRequest<'req> {
    pub key: &'req str,
    pub content: &'req str,
    pub time: Timestamp,
    pub sg: String,
}

/// Query for `get`, `del` and `get_raw`.
#[non_exhaustive]
#[derive(Clone, Debug, Serialize)]
pub struct KeyQuery<'req> {
    pub key: &'req str,
    pub time: Timestamp,
    pub sg: String,
}

#[non_exhaustive]
#[derive(Clone, Debug, Serialize)]
pub struct RangeQuery<'req> {
    pub key: &'req str,
    pub offset: u64,
    pub limit: u64,
    pub time: Timestamp,
    pub sg: String,
}

#[non_exhaustive]
#[derive(Clone, Debug, Serialize)]
pub struct ListQuery<'req> {
    pub category: &'req str,
    pub offset: u64,
    pub limit: u64,
    pub order: &'req str,
    pub time: Timestamp,
    pub sg: String,
}

/// Asks the service to import the file at `path` (on the service host) as `key`.
#[non_exhaustive]
#[derive(Clone, Debug, Serialize)]
pub struct UploadRequest<'req> {
    pub path: &'req str,
    pub key: &'req str,
    pub categories: Vec<&'req str>,
    pub time: Timestamp,
    pub sg: String,
}

/// Asks the service to export `key` to the file at `path` (on the service host).
#[non_exhaustive]
#[derive(Clone, Debug, Serialize)]
pub struct DownloadRequest<'req> {
    pub path: &'req str,
    pub key: &'req str,
    pub time: Timestamp,
    pub sg: String,
}

#[non_exhaustive]
#[derive(Clone, Debug, Serialize)]
pub struct TransBeginRequest<'req> {
    pub keys: Vec<&'req str>,
    pub time: Timestamp,
    pub sg: String,
}

/// Body for commit and rollback.
#[non_exhaustive]
#[derive(Clone, Debug, Serialize)]
pub struct TransIdRequest<'req> {
    pub tsid: &'req str,
    pub time: Timestamp,
    pub sg: String,
}

#[non_exhaustive]
#[derive(Clone, Debug, Serialize)]
pub struct TransCreateRequest<'req> {
    pub tsid: &'req str,
    pub key: &'req str,
    pub categories: Vec<&'req str>,
    pub content: &'req str,
    pub time: Timestamp,
    pub sg: String,
}

#[non_exhaustive]
#[derive(Clone, Debug, Serialize)]
pub struct TransUpdateRequest<'req> {
    pub tsid: &'req str,
    pub key: &'req str,
    pub content: &'req str,
    pub time: Timestamp,
    pub sg: String,
}

/// Query for transactional `get` and `del`.
#[non_exhaustive]
#[derive(Clone, Debug, Serialize)]
pub struct TransKeyQuery<'req> {
    pub tsid: &'req str,
    pub key: &'req str,
    pub time: Timestamp,
    pub sg: String,
}

#[non_exhaustive]
#[derive(Clone, Debug, Serialize)]
pub struct CreateIndexRequest<'req> {
    #[serde(rename = "indexkey")]
    pub index_keys: Vec<&'req str>,
    pub key: &'req str,
    #[serde(rename = "indexraw")]
    pub index_raw: Vec<&'req str>,
    pub time: Timestamp,
    pub sg: String,
}

/// Moves `key` from the `old_index_keys` entries to the `new_index_keys` entries.
#[non_exhaustive]
#[derive(Clone, Debug, Serialize)]
pub struct UpdateIndexRequest<'req> {
    #[serde(rename = "oindexkey")]
    pub old_index_keys: Vec<&'req str>,
    #[serde(rename = "cindexkey")]
    pub new_index_keys: Vec<&'req str>,
    pub key: &'req str,
    #[serde(rename = "indexraw")]
    pub index_raw: Vec<&'req str>,
    pub time: Timestamp,
    pub sg: String,
}

#[non_exhaustive]
#[derive(Clone, Debug, Serialize)]
pub struct DeleteIndexRequest<'req> {
    #[serde(rename = "indexkey")]
    pub index_keys: Vec<&'req str>,
    pub key: &'req str,
    pub time: Timestamp,
    pub sg: String,
}

#[non_exhaustive]
#[derive(Clone, Debug, Serialize)]
pub struct ListIndexRequest<'req> {
    #[serde(rename = "indexkey")]
    pub index_key: &'req str,
    pub condition: &'req str,
    pub offset: u64,
    pub limit: u64,
    pub order: &'req str,
    pub time: Timestamp,
    pub sg: String,
}

pub(crate) fn strs<S: AsRef<str>>(values: &[S]) -> Vec<&str> {
    values.iter().map(AsRef::as_ref).collect()
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn page_builder_defaults() {
        let page = Page::builder().limit(10).build();
        assert_eq!(
            page,
            Page {
                offset: 0,
                limit: 10,
                order: String::new(),
            }
        );
    }

    #[test]
    fn index_fields_use_wire_names() {
        let req = UpdateIndexRequest {
            old_index_keys: vec!["age:30"],
            new_index_keys: vec!["age:31"],
            key: "user1",
            index_raw: vec!["31"],
            time: 1,
            sg: "x".to_owned(),
        };
        assert_eq!(
            serde_json::to_value(&req).unwrap(),
            json!({
                "oindexkey": ["age:30"],
                "cindexkey": ["age:31"],
                "key": "user1",
                "indexraw": ["31"],
                "time": 1,
                "sg": "x",
            })
        );
    }

    #[test]
    fn list_query_encodes_in_field_order() {
        let query = ListQuery {
            category: "a b",
            offset: 5,
            limit: 10,
            order: "desc",
            time: 1_700_000_000,
            sg: "abc".to_owned(),
        };
        assert_eq!(
            serde_html_form::to_string(&query).unwrap(),
            "category=a+b&offset=5&limit=10&order=desc&time=1700000000&sg=abc"
        );
    }
}

//! Response envelopes of the ATM backend.
//!
//! Success bodies look like `{ "data": ... }`, failures like
//! `{ "data": { "message": "..." } }` or `{ "message": "..." }`.
//! `decode_response` is the single place where status + body turn into a
//! typed value or an [`ApiError`].

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use super::api_error::ApiError;
use super::pagination::total_pages;

/// `data` missing and `data: null` both land as `None` when `T` is an `Option`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiEnvelope<T> {
    pub data: T,
}

/// Body of mutation endpoints that only acknowledge.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MessageData {
    #[serde(default)]
    pub message: Option<String>,
}

/// Server pagination block.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PageMeta {
    #[serde(default)]
    pub page: usize,
    #[serde(default)]
    pub limit: usize,
    #[serde(default)]
    pub total: usize,
    #[serde(default, alias = "totalPages")]
    pub total_pages: Option<usize>,
}

impl PageMeta {
    pub fn pages(&self) -> usize {
        self.total_pages
            .unwrap_or_else(|| total_pages(self.total, self.limit))
    }
}

/// One page of a server-paginated list.
///
/// `data` may be either a bare array or `{ items, pagination }`.
#[derive(Debug, Clone, Serialize)]
pub struct ListPage<T> {
    pub items: Vec<T>,
    pub pagination: Option<PageMeta>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum ListPageRepr<T> {
    Bare(Vec<T>),
    Wrapped {
        #[serde(alias = "rows", alias = "data")]
        items: Vec<T>,
        #[serde(default, alias = "meta")]
        pagination: Option<PageMeta>,
    },
}

impl<'de, T> Deserialize<'de> for ListPage<T>
where
    T: Deserialize<'de>,
{
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Ok(match ListPageRepr::<T>::deserialize(deserializer)? {
            ListPageRepr::Bare(items) => ListPage {
                items,
                pagination: None,
            },
            ListPageRepr::Wrapped { items, pagination } => ListPage { items, pagination },
        })
    }
}

impl<T> ListPage<T> {
    pub fn total_count(&self) -> usize {
        self.pagination
            .as_ref()
            .map(|p| p.total)
            .unwrap_or(self.items.len())
    }

    /// Total pages reported by the server, or derived from `fallback_limit`.
    pub fn total_pages(&self, fallback_limit: usize) -> usize {
        match &self.pagination {
            Some(meta) => meta.pages(),
            None => total_pages(self.items.len(), fallback_limit),
        }
    }
}

impl<T> Default for ListPage<T> {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            pagination: None,
        }
    }
}

/// Pull a human message out of an error body, if any.
pub fn extract_message(body: &str) -> Option<String> {
    let value: Value = serde_json::from_str(body).ok()?;
    let candidates = [
        value.pointer("/data/message"),
        value.pointer("/message"),
        value.pointer("/error"),
        value.pointer("/data/error"),
    ];
    let found = candidates
        .into_iter()
        .flatten()
        .find_map(|v| v.as_str().map(|s| s.to_string()));
    found
}

/// Turn an HTTP status and raw body into the envelope's `data` as `T`.
pub fn decode_response<T: DeserializeOwned>(status: u16, body: &str) -> Result<T, ApiError> {
    if status == 401 || status == 403 {
        return Err(ApiError::Unauthorized);
    }
    if !(200..300).contains(&status) {
        return Err(ApiError::http(status, extract_message(body)));
    }

    let envelope: ApiEnvelope<Option<Value>> =
        serde_json::from_str(body).map_err(|e| ApiError::Decode(e.to_string()))?;
    let data = envelope.data.ok_or(ApiError::Empty)?;

    serde_json::from_value(data).map_err(|e| ApiError::Decode(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Deserialize, PartialEq)]
    struct Item {
        id: i64,
    }

    #[test]
    fn test_decode_plain_data() {
        let item: Item = decode_response(200, r#"{"data":{"id":7}}"#).unwrap();
        assert_eq!(item, Item { id: 7 });
    }

    #[test]
    fn test_missing_or_null_data_is_empty() {
        assert_eq!(
            decode_response::<Item>(200, r#"{"ok":true}"#).unwrap_err(),
            ApiError::Empty
        );
        assert_eq!(
            decode_response::<Item>(200, r#"{"data":null}"#).unwrap_err(),
            ApiError::Empty
        );
    }

    #[test]
    fn test_error_message_extraction() {
        let err = decode_response::<Item>(400, r#"{"data":{"message":"Kode wajib diisi"}}"#)
            .unwrap_err();
        assert_eq!(
            err,
            ApiError::Http {
                status: 400,
                message: "Kode wajib diisi".to_string()
            }
        );

        let err = decode_response::<Item>(502, "<html>Bad gateway</html>").unwrap_err();
        assert_eq!(err.user_message(), "Request failed with status 502");
    }

    #[test]
    fn test_extract_message_fallbacks() {
        assert_eq!(
            extract_message(r#"{"error":"Token tidak valid"}"#),
            Some("Token tidak valid".to_string())
        );
        assert_eq!(extract_message(r#"{"data":{"message":42}}"#), None);
        assert_eq!(extract_message("not json"), None);
    }

    #[test]
    fn test_unauthorized_status() {
        assert_eq!(
            decode_response::<Item>(401, r#"{"message":"jwt expired"}"#).unwrap_err(),
            ApiError::Unauthorized
        );
    }

    #[test]
    fn test_list_page_shapes() {
        let bare: ListPage<Item> = decode_response(200, r#"{"data":[{"id":1},{"id":2}]}"#).unwrap();
        assert_eq!(bare.items.len(), 2);
        assert_eq!(bare.total_pages(10), 1);

        let wrapped: ListPage<Item> = decode_response(
            200,
            r#"{"data":{"items":[{"id":1}],"pagination":{"page":2,"limit":10,"total":31}}}"#,
        )
        .unwrap();
        assert_eq!(wrapped.items.len(), 1);
        assert_eq!(wrapped.total_count(), 31);
        assert_eq!(wrapped.total_pages(10), 4);
    }

    #[test]
    fn test_unexpected_shape_is_decode_error() {
        let err = decode_response::<Item>(200, r#"{"data":"oops"}"#).unwrap_err();
        assert!(matches!(err, ApiError::Decode(_)));
        assert!(err.is_empty());
    }
}

use serde::{Deserialize, Serialize};

use crate::enums::MachineType;

/// Query of `GET /atms`. `page` is 1-based on the wire.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AtmListQuery {
    pub page: usize,
    pub limit: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub search: Option<String>,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub machine_type: Option<MachineType>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub branch_id: Option<i64>,
}

impl Default for AtmListQuery {
    fn default() -> Self {
        Self {
            page: 1,
            limit: 10,
            search: None,
            machine_type: None,
            branch_id: None,
        }
    }
}

impl AtmListQuery {
    /// Blank search strings are dropped instead of sent as `search=`.
    pub fn with_search(mut self, search: &str) -> Self {
        let trimmed = search.trim();
        self.search = (!trimmed.is_empty()).then(|| trimmed.to_string());
        self
    }

    pub fn to_query_string(&self) -> String {
        serde_qs::to_string(self).unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_minimal_query() {
        assert_eq!(AtmListQuery::default().to_query_string(), "page=1&limit=10");
    }

    #[test]
    fn test_full_query() {
        let q = AtmListQuery {
            page: 3,
            limit: 25,
            machine_type: Some(MachineType::Crm),
            branch_id: Some(6),
            ..Default::default()
        }
        .with_search(" dago ");
        assert_eq!(
            q.to_query_string(),
            "page=3&limit=25&search=dago&type=CRM&branch_id=6"
        );
    }

    #[test]
    fn test_blank_search_dropped() {
        let q = AtmListQuery::default().with_search("   ");
        assert_eq!(q.search, None);
    }
}

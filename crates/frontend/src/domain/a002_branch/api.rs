use contracts::domain::a002_branch::Branch;
use contracts::shared::api_error::ApiError;
use contracts::shared::envelope::ListPage;

use crate::shared::api_utils::{get_json, with_query};

#[derive(serde::Serialize)]
struct BranchSearch<'a> {
    search: &'a str,
}

/// Every branch, for the hierarchy view.
pub async fn list_branches() -> Result<Vec<Branch>, ApiError> {
    let page: ListPage<Branch> = get_json("/branches").await?;
    Ok(page.items)
}

pub async fn search_branches(term: &str) -> Result<Vec<Branch>, ApiError> {
    let query = serde_qs::to_string(&BranchSearch { search: term.trim() }).unwrap_or_default();
    let page: ListPage<Branch> = get_json(&with_query("/branches", &query)).await?;
    Ok(page.items)
}

pub async fn get_branch(id: i64) -> Result<Branch, ApiError> {
    get_json(&format!("/branches/{}", id)).await
}

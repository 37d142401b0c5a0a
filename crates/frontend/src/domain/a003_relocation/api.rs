use contracts::domain::a003_relocation::{Relocation, RelocationAction, RelocationListQuery};
use contracts::shared::api_error::ApiError;
use contracts::shared::envelope::{ListPage, MessageData};

use crate::shared::api_utils::{get_json, post_action, with_query};

pub async fn list_relocations(query: &RelocationListQuery) -> Result<Vec<Relocation>, ApiError> {
    let page: ListPage<Relocation> =
        get_json(&with_query("/relocations", &query.to_query_string())).await?;
    Ok(page.items)
}

pub async fn get_relocation(id: i64) -> Result<Relocation, ApiError> {
    get_json(&format!("/relocations/{}", id)).await
}

pub async fn apply_action(id: i64, action: RelocationAction) -> Result<MessageData, ApiError> {
    post_action(&action.endpoint(id)).await
}

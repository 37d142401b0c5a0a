use contracts::domain::a001_atm::{Atm, AtmListQuery, CreateAtmDto};
use contracts::shared::api_error::ApiError;
use contracts::shared::envelope::{ListPage, MessageData};

use crate::shared::api_utils::{delete, get_json, post_json, with_query};

/// Upper bound used when every machine is needed at once (map view).
pub const ALL_ATMS_LIMIT: usize = 1000;

pub async fn list_atms(query: &AtmListQuery) -> Result<ListPage<Atm>, ApiError> {
    get_json(&with_query("/atms", &query.to_query_string())).await
}

pub async fn list_all_atms() -> Result<Vec<Atm>, ApiError> {
    let query = AtmListQuery {
        limit: ALL_ATMS_LIMIT,
        ..Default::default()
    };
    Ok(list_atms(&query).await?.items)
}

pub async fn get_atm(id: i64) -> Result<Atm, ApiError> {
    get_json(&format!("/atms/{}", id)).await
}

/// The created record when the server echoes it back.
pub async fn create_atm(dto: &CreateAtmDto) -> Result<Option<Atm>, ApiError> {
    match post_json::<_, Atm>("/atms", dto).await {
        Ok(atm) => Ok(Some(atm)),
        Err(ApiError::Empty) => Ok(None),
        Err(e) => Err(e),
    }
}

pub async fn delete_atm(id: i64) -> Result<MessageData, ApiError> {
    delete(&format!("/atms/{}", id)).await
}

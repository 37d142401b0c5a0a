use contracts::projections::p901_atm_cba::{CbaQuery, CbaRecord};
use contracts::shared::api_error::ApiError;

use crate::shared::api_utils::{get_json, with_query};

pub async fn get_cba(query: &CbaQuery) -> Result<CbaRecord, ApiError> {
    get_json(&with_query("/atm-cba", &query.to_query_string())).await
}

use contracts::projections::p900_atm_performance::{PerformanceQuery, PerformanceRecord};
use contracts::shared::api_error::ApiError;
use contracts::shared::envelope::ListPage;

use crate::shared::api_utils::{get_json, with_query};

pub async fn get_performance(query: &PerformanceQuery) -> Result<ListPage<PerformanceRecord>, ApiError> {
    get_json(&with_query("/atms-performance", &query.to_query_string())).await
}

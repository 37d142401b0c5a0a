use contracts::dashboards::d400_fleet_summary::{
    DashboardQuery, LeaderboardEntry, PerformanceTrendPoint, PeriodSummary, TierDistributionEntry,
};
use contracts::shared::api_error::ApiError;
use contracts::shared::envelope::ListPage;

use crate::shared::api_utils::{get_json, with_query};

pub async fn get_summary(query: &DashboardQuery) -> Result<PeriodSummary, ApiError> {
    get_json(&with_query("/summary-by-period", &query.to_query_string())).await
}

pub async fn get_tier_distribution(query: &DashboardQuery) -> Result<Vec<TierDistributionEntry>, ApiError> {
    let page: ListPage<TierDistributionEntry> =
        get_json(&with_query("/tier-distribution", &query.to_query_string())).await?;
    Ok(page.items)
}

pub async fn get_performance_trends(query: &DashboardQuery) -> Result<Vec<PerformanceTrendPoint>, ApiError> {
    let page: ListPage<PerformanceTrendPoint> =
        get_json(&with_query("/performance-trends", &query.to_query_string())).await?;
    Ok(page.items)
}

pub async fn get_leaderboard(query: &DashboardQuery) -> Result<Vec<LeaderboardEntry>, ApiError> {
    let page: ListPage<LeaderboardEntry> =
        get_json(&with_query("/atms-leaderboard", &query.to_query_string())).await?;
    Ok(page.items)
}

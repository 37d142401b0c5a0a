pub mod dto;

pub use dto::{
    normalize_distribution, rank_leaderboard, DashboardQuery, LeaderboardEntry,
    PerformanceTrendPoint, PeriodSummary, TierDistributionEntry,
};

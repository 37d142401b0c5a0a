use serde::{Deserialize, Serialize};

use crate::enums::tier::deserialize_opt_tier;
use crate::enums::{Period, Tier};
use crate::shared::serde_helpers::{
    de_f64_or_zero, de_opt_f64, de_opt_i64, de_string_or_default, or_nonempty,
};

/// Filter shared by every dashboard widget.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashboardQuery {
    pub period_id: u8,
}

impl DashboardQuery {
    pub fn new(period: Period) -> Self {
        Self {
            period_id: period.id(),
        }
    }

    pub fn to_query_string(&self) -> String {
        serde_qs::to_string(self).unwrap_or_default()
    }
}

/// Stat cards of `GET /summary-by-period`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PeriodSummary {
    #[serde(default, alias = "total_atm", deserialize_with = "de_f64_or_zero")]
    pub total_atms: f64,
    #[serde(default, alias = "total_volume", deserialize_with = "de_f64_or_zero")]
    pub total_volume_trx: f64,
    #[serde(default, alias = "total_nominal", deserialize_with = "de_f64_or_zero")]
    pub total_nominal_trx: f64,
    #[serde(default, deserialize_with = "de_f64_or_zero")]
    pub total_fee: f64,
    #[serde(default, deserialize_with = "de_opt_f64")]
    pub average_volume_trx: Option<f64>,
}

impl PeriodSummary {
    /// Server average when sent, otherwise volume per machine.
    pub fn average_volume(&self) -> f64 {
        self.average_volume_trx.unwrap_or(if self.total_atms > 0.0 {
            self.total_volume_trx / self.total_atms
        } else {
            0.0
        })
    }
}

/// One bar of `GET /tier-distribution`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TierDistributionEntry {
    #[serde(default, deserialize_with = "deserialize_opt_tier")]
    pub tier: Option<Tier>,
    #[serde(default, alias = "total", deserialize_with = "de_f64_or_zero")]
    pub count: f64,
}

impl TierDistributionEntry {
    pub fn label(&self) -> &'static str {
        self.tier.map(|t| t.label()).unwrap_or("N/A")
    }
}

/// One point of `GET /performance-trends`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PerformanceTrendPoint {
    #[serde(default, deserialize_with = "de_opt_i64")]
    pub period_id: Option<i64>,
    #[serde(default, alias = "period_name", deserialize_with = "de_string_or_default")]
    pub period: String,
    #[serde(default, alias = "total_volume", deserialize_with = "de_f64_or_zero")]
    pub volume_trx: f64,
    #[serde(default, alias = "total_fee", deserialize_with = "de_f64_or_zero")]
    pub fee: f64,
}

impl PerformanceTrendPoint {
    /// Axis label: explicit name, else the period label for the id.
    pub fn axis_label(&self) -> String {
        if !self.period.is_empty() {
            return self.period.clone();
        }
        self.period_id
            .and_then(|id| u8::try_from(id).ok())
            .and_then(Period::from_id)
            .map(|p| p.short_label().to_string())
            .unwrap_or_else(|| "-".to_string())
    }
}

/// Row of `GET /atms-leaderboard`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "LeaderboardEntryWire")]
pub struct LeaderboardEntry {
    pub atm_id: Option<i64>,
    pub code: String,
    pub name: String,
    pub branch_name: String,
    pub volume_trx: f64,
    pub fee: f64,
    pub tier: Option<Tier>,
}

#[derive(Deserialize)]
struct LeaderboardEntryWire {
    #[serde(default, deserialize_with = "de_opt_i64")]
    atm_id: Option<i64>,
    #[serde(default, deserialize_with = "de_opt_i64")]
    id: Option<i64>,
    #[serde(default, deserialize_with = "de_string_or_default")]
    code: String,
    #[serde(default, deserialize_with = "de_string_or_default")]
    atm_code: String,
    #[serde(default, deserialize_with = "de_string_or_default")]
    name: String,
    #[serde(default, deserialize_with = "de_string_or_default")]
    atm_name: String,
    #[serde(default, deserialize_with = "de_string_or_default")]
    branch_name: String,
    #[serde(default, deserialize_with = "de_string_or_default")]
    branch: String,
    #[serde(default, deserialize_with = "de_f64_or_zero")]
    volume_trx: f64,
    #[serde(default, deserialize_with = "de_f64_or_zero")]
    fee: f64,
    #[serde(default, deserialize_with = "deserialize_opt_tier")]
    tier: Option<Tier>,
}

impl From<LeaderboardEntryWire> for LeaderboardEntry {
    fn from(w: LeaderboardEntryWire) -> Self {
        Self {
            atm_id: w.atm_id.or(w.id),
            code: or_nonempty(w.code, w.atm_code),
            name: or_nonempty(w.name, w.atm_name),
            branch_name: or_nonempty(w.branch_name, w.branch),
            volume_trx: w.volume_trx,
            fee: w.fee,
            tier: w.tier,
        }
    }
}

/// Sorted by volume descending, ties by name.
pub fn rank_leaderboard(mut entries: Vec<LeaderboardEntry>) -> Vec<LeaderboardEntry> {
    entries.sort_by(|a, b| {
        b.volume_trx
            .total_cmp(&a.volume_trx)
            .then_with(|| a.name.cmp(&b.name))
    });
    entries
}

/// Counts per tier 0..=4, zero-filled, unknown tiers dropped.
pub fn normalize_distribution(entries: &[TierDistributionEntry]) -> Vec<TierDistributionEntry> {
    Tier::all()
        .map(|tier| TierDistributionEntry {
            tier: Some(tier),
            count: entries
                .iter()
                .filter(|e| e.tier == Some(tier))
                .map(|e| e.count)
                .sum(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_summary_average() {
        let s: PeriodSummary =
            serde_json::from_str(r#"{"total_atm":"4","total_volume":2000}"#).unwrap();
        assert_eq!(s.average_volume(), 500.0);
        assert_eq!(PeriodSummary::default().average_volume(), 0.0);
    }

    #[test]
    fn test_distribution_zero_filled() {
        let raw: Vec<TierDistributionEntry> =
            serde_json::from_str(r#"[{"tier":"2","count":5},{"tier":9,"total":3},{"tier":2,"count":1}]"#)
                .unwrap();
        let normalized = normalize_distribution(&raw);
        assert_eq!(normalized.len(), 5);
        assert_eq!(normalized[2].count, 6.0);
        assert_eq!(normalized[0].count, 0.0);
        assert_eq!(normalized[2].label(), "TIER 2");
    }

    #[test]
    fn test_leaderboard_order() {
        let e = |name: &str, v: f64| LeaderboardEntry {
            name: name.into(),
            volume_trx: v,
            ..Default::default()
        };
        let ranked = rank_leaderboard(vec![e("B", 10.0), e("C", 30.0), e("A", 10.0)]);
        let names: Vec<_> = ranked.iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, vec!["C", "A", "B"]);
    }

    #[test]
    fn test_leaderboard_row_with_both_ids() {
        let rows: Vec<LeaderboardEntry> = serde_json::from_str(
            r#"[{"id":40,"atm_id":3,"name":"ATM Dago","atm_name":"x","branch":"KC Dago","volume_trx":"120"}]"#,
        )
        .unwrap();
        assert_eq!(rows[0].atm_id, Some(3));
        assert_eq!(rows[0].name, "ATM Dago");
        assert_eq!(rows[0].branch_name, "KC Dago");
        assert_eq!(rows[0].volume_trx, 120.0);
    }

    #[test]
    fn test_trend_axis_label() {
        let p = PerformanceTrendPoint {
            period_id: Some(3),
            ..Default::default()
        };
        assert_eq!(p.axis_label(), "Q3");
        assert_eq!(PerformanceTrendPoint::default().axis_label(), "-");
    }
}

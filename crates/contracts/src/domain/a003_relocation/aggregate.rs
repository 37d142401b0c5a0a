use std::convert::Infallible;
use std::str::FromStr;

use chrono::{DateTime, NaiveDateTime};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::enums::tier::deserialize_opt_tier;
use crate::enums::Tier;
use crate::shared::geo::LatLng;
use crate::shared::serde_helpers::{de_id, de_opt_f64, de_opt_i64};

/// Workflow state of a saved relocation.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum RelocationStatus {
    InProgress,
    Approved,
    Rejected,
    Cancelled,
    /// Anything the backend sends that this client does not know yet.
    Unknown(String),
}

/// Never fails: unrecognised text is kept as `Unknown`.
impl FromStr for RelocationStatus {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s.trim().to_lowercase().as_str() {
            "in_progress" | "in progress" | "pending" => RelocationStatus::InProgress,
            "approved" => RelocationStatus::Approved,
            "rejected" => RelocationStatus::Rejected,
            "cancelled" | "canceled" => RelocationStatus::Cancelled,
            _ => RelocationStatus::Unknown(s.to_string()),
        })
    }
}

impl RelocationStatus {
    pub fn as_str(&self) -> &str {
        match self {
            RelocationStatus::InProgress => "in_progress",
            RelocationStatus::Approved => "approved",
            RelocationStatus::Rejected => "rejected",
            RelocationStatus::Cancelled => "cancelled",
            RelocationStatus::Unknown(s) => s,
        }
    }

    pub fn label(&self) -> &str {
        match self {
            RelocationStatus::InProgress => "Dalam Proses",
            RelocationStatus::Approved => "Disetujui",
            RelocationStatus::Rejected => "Ditolak",
            RelocationStatus::Cancelled => "Dibatalkan",
            RelocationStatus::Unknown(s) => s,
        }
    }

    /// Values offered by the status filter.
    pub fn known() -> [RelocationStatus; 4] {
        [
            RelocationStatus::InProgress,
            RelocationStatus::Approved,
            RelocationStatus::Rejected,
            RelocationStatus::Cancelled,
        ]
    }

    pub fn is_terminal(&self) -> bool {
        !matches!(self, RelocationStatus::InProgress)
    }

    /// Only submissions still in progress can be decided.
    pub fn can_apply(&self, _action: RelocationAction) -> bool {
        matches!(self, RelocationStatus::InProgress)
    }

    /// Status after `action`, or `None` when the transition is not allowed.
    pub fn apply(&self, action: RelocationAction) -> Option<RelocationStatus> {
        self.can_apply(action).then(|| action.target())
    }

    pub fn allowed_actions(&self) -> Vec<RelocationAction> {
        RelocationAction::all()
            .into_iter()
            .filter(|a| self.can_apply(*a))
            .collect()
    }
}

impl Serialize for RelocationStatus {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for RelocationStatus {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(|never: Infallible| match never {})
    }
}

impl Default for RelocationStatus {
    fn default() -> Self {
        RelocationStatus::InProgress
    }
}

/// Reviewer decision on a submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RelocationAction {
    Approve,
    Reject,
    Cancel,
}

impl RelocationAction {
    pub fn all() -> [RelocationAction; 3] {
        [
            RelocationAction::Approve,
            RelocationAction::Reject,
            RelocationAction::Cancel,
        ]
    }

    pub fn target(&self) -> RelocationStatus {
        match self {
            RelocationAction::Approve => RelocationStatus::Approved,
            RelocationAction::Reject => RelocationStatus::Rejected,
            RelocationAction::Cancel => RelocationStatus::Cancelled,
        }
    }

    /// Path relative to the API base.
    pub fn endpoint(&self, id: i64) -> String {
        let verb = match self {
            RelocationAction::Approve => "approve",
            RelocationAction::Reject => "reject",
            RelocationAction::Cancel => "cancel",
        };
        format!("/{}-relocation/{}", verb, id)
    }

    pub fn label(&self) -> &'static str {
        match self {
            RelocationAction::Approve => "Setujui",
            RelocationAction::Reject => "Tolak",
            RelocationAction::Cancel => "Batalkan",
        }
    }

    pub fn confirm_text(&self) -> &'static str {
        match self {
            RelocationAction::Approve => "Setujui pengajuan relokasi ini?",
            RelocationAction::Reject => "Tolak pengajuan relokasi ini?",
            RelocationAction::Cancel => "Batalkan pengajuan relokasi ini?",
        }
    }
}

/// Saved relocation (submission).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Relocation {
    #[serde(deserialize_with = "de_id")]
    pub id: i64,
    #[serde(default, deserialize_with = "de_opt_i64")]
    pub atm_id: Option<i64>,
    #[serde(default)]
    pub atm_name: Option<String>,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default, deserialize_with = "de_opt_f64")]
    pub latitude: Option<f64>,
    #[serde(default, deserialize_with = "de_opt_f64")]
    pub longitude: Option<f64>,
    #[serde(default)]
    pub status: RelocationStatus,
    #[serde(default, deserialize_with = "de_opt_f64")]
    pub rent_cost: Option<f64>,
    #[serde(default, deserialize_with = "de_opt_f64")]
    pub electricity_cost: Option<f64>,
    #[serde(default, deserialize_with = "de_opt_f64")]
    pub electronic_cost: Option<f64>,
    #[serde(default, deserialize_with = "de_opt_f64")]
    pub replenishment_cost: Option<f64>,
    #[serde(default, deserialize_with = "de_opt_f64")]
    pub predicted_volume: Option<f64>,
    #[serde(default, alias = "predicted_tier", deserialize_with = "deserialize_opt_tier")]
    pub tier_prediction: Option<Tier>,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default, alias = "submitted_by")]
    pub created_by: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
}

impl Relocation {
    pub fn position(&self) -> Option<LatLng> {
        LatLng::new(self.latitude?, self.longitude?)
    }

    /// `created_at` as "dd.mm.yyyy hh:mm"; raw text when unparseable.
    pub fn created_at_display(&self) -> String {
        match self.created_at.as_deref() {
            None | Some("") => "-".to_string(),
            Some(raw) => format_timestamp(raw),
        }
    }
}

fn format_timestamp(raw: &str) -> String {
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return dt.format("%d.%m.%Y %H:%M").to_string();
    }
    if let Ok(dt) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S") {
        return dt.format("%d.%m.%Y %H:%M").to_string();
    }
    raw.to_string()
}

/// Query of `GET /relocations`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RelocationListQuery {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
}

impl RelocationListQuery {
    pub fn to_query_string(&self) -> String {
        serde_qs::to_string(self).unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_in_progress_moves() {
        let s = RelocationStatus::InProgress;
        assert_eq!(s.apply(RelocationAction::Approve), Some(RelocationStatus::Approved));
        assert_eq!(s.apply(RelocationAction::Reject), Some(RelocationStatus::Rejected));
        assert_eq!(s.apply(RelocationAction::Cancel), Some(RelocationStatus::Cancelled));
        assert_eq!(s.allowed_actions().len(), 3);

        for terminal in [
            RelocationStatus::Approved,
            RelocationStatus::Rejected,
            RelocationStatus::Cancelled,
            RelocationStatus::Unknown("archived".into()),
        ] {
            assert!(terminal.is_terminal());
            assert!(terminal.allowed_actions().is_empty(), "{:?}", terminal);
        }
    }

    #[test]
    fn test_status_parses_through_from_str() {
        assert_eq!("Pending".parse(), Ok(RelocationStatus::InProgress));
        assert_eq!(" canceled ".parse(), Ok(RelocationStatus::Cancelled));
        assert_eq!(
            "archived".parse::<RelocationStatus>(),
            Ok(RelocationStatus::Unknown("archived".into()))
        );
    }

    #[test]
    fn test_unknown_status_is_kept() {
        let r: Relocation = serde_json::from_str(r#"{"id":3,"status":"on_hold"}"#).unwrap();
        assert_eq!(r.status, RelocationStatus::Unknown("on_hold".into()));
        assert_eq!(serde_json::to_value(&r.status).unwrap(), "on_hold");
    }

    #[test]
    fn test_decode_submission() {
        let r: Relocation = serde_json::from_str(
            r#"{"id":"9","status":"in_progress","latitude":"-6.9","longitude":107.6,
                "rent_cost":"5000000","predicted_tier":"2","created_at":"2024-03-05T10:15:00Z"}"#,
        )
        .unwrap();
        assert_eq!(r.id, 9);
        assert_eq!(r.status, RelocationStatus::InProgress);
        assert_eq!(r.tier_prediction, Tier::new(2));
        assert_eq!(r.rent_cost, Some(5_000_000.0));
        assert!(r.position().is_some());
        assert_eq!(r.created_at_display(), "05.03.2024 10:15");
    }

    #[test]
    fn test_action_endpoints() {
        assert_eq!(RelocationAction::Approve.endpoint(4), "/approve-relocation/4");
        assert_eq!(RelocationAction::Reject.endpoint(4), "/reject-relocation/4");
        assert_eq!(RelocationAction::Cancel.endpoint(4), "/cancel-relocation/4");
    }

    #[test]
    fn test_list_query() {
        assert_eq!(RelocationListQuery::default().to_query_string(), "");
        let q = RelocationListQuery {
            status: Some("approved".into()),
        };
        assert_eq!(q.to_query_string(), "status=approved");
    }
}

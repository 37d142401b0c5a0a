use serde::{Deserialize, Serialize};

use crate::enums::Tier;
use crate::shared::geo::LatLng;

use super::response::AnalyzeRelocationResponse;

/// Four operating costs typed on the Rent Cost tab, in Rupiah.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct CostInputs {
    pub rent_cost: Option<f64>,
    pub electricity_cost: Option<f64>,
    pub electronic_cost: Option<f64>,
    pub replenishment_cost: Option<f64>,
}

impl CostInputs {
    pub fn is_complete(&self) -> bool {
        self.values().iter().all(Option::is_some)
    }

    pub fn values(&self) -> [Option<f64>; 4] {
        [
            self.rent_cost,
            self.electricity_cost,
            self.electronic_cost,
            self.replenishment_cost,
        ]
    }

    pub fn total(&self) -> f64 {
        self.values().iter().map(|v| v.unwrap_or(0.0)).sum()
    }
}

/// Parse a Rupiah amount typed as "2.500.000", "2500000" or "2.500.000,50".
pub fn parse_rupiah(raw: &str) -> Option<f64> {
    let cleaned: String = raw
        .trim()
        .trim_start_matches("Rp.")
        .trim_start_matches("Rp")
        .chars()
        .filter(|c| !c.is_whitespace() && *c != '.')
        .map(|c| if c == ',' { '.' } else { c })
        .collect();
    if cleaned.is_empty() {
        return None;
    }
    cleaned.parse::<f64>().ok().filter(|v| v.is_finite() && *v >= 0.0)
}

/// Body of `POST /analyze-relocation`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalyzeRelocationRequest {
    pub latitude: f64,
    pub longitude: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    pub rent_cost: f64,
    pub electricity_cost: f64,
    pub electronic_cost: f64,
    pub replenishment_cost: f64,
}

impl AnalyzeRelocationRequest {
    /// `None` until the location is valid and every cost is filled in.
    pub fn build(location: Option<LatLng>, address: &str, costs: &CostInputs) -> Option<Self> {
        let location = location?;
        let address = address.trim();
        Some(Self {
            latitude: location.lat,
            longitude: location.lng,
            address: (!address.is_empty()).then(|| address.to_string()),
            rent_cost: costs.rent_cost?,
            electricity_cost: costs.electricity_cost?,
            electronic_cost: costs.electronic_cost?,
            replenishment_cost: costs.replenishment_cost?,
        })
    }

    pub fn location(&self) -> Option<LatLng> {
        LatLng::new(self.latitude, self.longitude)
    }
}

/// Body of `POST /save-relocation`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SaveRelocationRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub atm_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    pub latitude: f64,
    pub longitude: f64,
    pub rent_cost: f64,
    pub electricity_cost: f64,
    pub electronic_cost: f64,
    pub replenishment_cost: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub predicted_volume: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tier_prediction: Option<Tier>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl SaveRelocationRequest {
    /// Server tier wins over the heuristic one when both exist.
    pub fn from_analysis(
        request: &AnalyzeRelocationRequest,
        response: &AnalyzeRelocationResponse,
        heuristic_tier: Option<Tier>,
        atm_id: Option<i64>,
        notes: &str,
    ) -> Self {
        let notes = notes.trim();
        Self {
            atm_id,
            address: response.address.clone().or_else(|| request.address.clone()),
            latitude: request.latitude,
            longitude: request.longitude,
            rent_cost: request.rent_cost,
            electricity_cost: request.electricity_cost,
            electronic_cost: request.electronic_cost,
            replenishment_cost: request.replenishment_cost,
            predicted_volume: response.predicted_volume,
            tier_prediction: response.tier_prediction.or(heuristic_tier),
            notes: (!notes.is_empty()).then(|| notes.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn costs() -> CostInputs {
        CostInputs {
            rent_cost: Some(5_000_000.0),
            electricity_cost: Some(300_000.0),
            electronic_cost: Some(150_000.0),
            replenishment_cost: Some(750_000.0),
        }
    }

    #[test]
    fn test_parse_rupiah() {
        assert_eq!(parse_rupiah("2.500.000"), Some(2_500_000.0));
        assert_eq!(parse_rupiah("Rp. 10.000"), Some(10_000.0));
        assert_eq!(parse_rupiah("1.250,5"), Some(1250.5));
        assert_eq!(parse_rupiah(""), None);
        assert_eq!(parse_rupiah("-5"), None);
        assert_eq!(parse_rupiah("abc"), None);
    }

    #[test]
    fn test_build_needs_location_and_costs() {
        let here = LatLng::new(-6.9, 107.6);
        assert!(AnalyzeRelocationRequest::build(None, "", &costs()).is_none());
        let mut partial = costs();
        partial.electronic_cost = None;
        assert!(!partial.is_complete());
        assert!(AnalyzeRelocationRequest::build(here, "", &partial).is_none());

        let req = AnalyzeRelocationRequest::build(here, "  Jl. Dago ", &costs()).unwrap();
        assert_eq!(req.address.as_deref(), Some("Jl. Dago"));
        assert_eq!(req.rent_cost, 5_000_000.0);
        assert_eq!(costs().total(), 6_200_000.0);
    }

    #[test]
    fn test_save_prefers_server_tier() {
        let req = AnalyzeRelocationRequest::build(LatLng::new(-6.9, 107.6), "", &costs()).unwrap();
        let mut resp = AnalyzeRelocationResponse {
            predicted_volume: Some(2500.0),
            ..Default::default()
        };
        let save = SaveRelocationRequest::from_analysis(&req, &resp, Tier::new(2), None, " ");
        assert_eq!(save.tier_prediction, Tier::new(2));
        assert_eq!(save.notes, None);

        resp.tier_prediction = Tier::new(1);
        let save = SaveRelocationRequest::from_analysis(&req, &resp, Tier::new(2), Some(4), "ok");
        assert_eq!(save.tier_prediction, Tier::new(1));
        assert_eq!(save.atm_id, Some(4));
        assert_eq!(save.notes.as_deref(), Some("ok"));
    }
}

use serde::{Deserialize, Serialize};

use crate::enums::tier::deserialize_opt_tier;
use crate::enums::{PlaceCategory, Tier};
use crate::shared::geo::{distance_between, LatLng};
use crate::shared::serde_helpers::{de_opt_f64, de_opt_i64, de_string_or_default, or_nonempty};

/// Something the analysis placed on the map around the candidate site.
pub trait NearbyPoint {
    fn position(&self) -> Option<LatLng>;

    /// Distance in km as reported by the server.
    fn reported_distance_km(&self) -> Option<f64>;

    /// Reported distance, or great-circle distance from `origin`.
    fn distance_km(&self, origin: Option<LatLng>) -> Option<f64> {
        self.reported_distance_km()
            .or_else(|| distance_between(origin, self.position()))
    }
}

/// Own-bank KC/KCP/ATM near the candidate.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "NearbyBranchWire")]
pub struct NearbyBranch {
    pub id: Option<i64>,
    pub name: String,
    pub kind: String,
    pub address: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub distance: Option<f64>,
}

impl NearbyPoint for NearbyBranch {
    fn position(&self) -> Option<LatLng> {
        LatLng::new(self.latitude?, self.longitude?)
    }

    fn reported_distance_km(&self) -> Option<f64> {
        self.distance
    }
}

/// Other bank's ATM near the candidate.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "CompetitorAtmWire")]
pub struct CompetitorAtm {
    pub name: String,
    pub bank: String,
    pub address: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub distance: Option<f64>,
}

impl NearbyPoint for CompetitorAtm {
    fn position(&self) -> Option<LatLng> {
        LatLng::new(self.latitude?, self.longitude?)
    }

    fn reported_distance_km(&self) -> Option<f64> {
        self.distance
    }
}

/// Point of interest from the maps provider.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "PublicPlaceWire")]
pub struct PublicPlace {
    pub place_id: Option<String>,
    pub name: String,
    pub category: String,
    pub address: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub distance: Option<f64>,
}

impl PublicPlace {
    pub fn classify(&self) -> PlaceCategory {
        PlaceCategory::classify(&self.category)
    }
}

impl NearbyPoint for PublicPlace {
    fn position(&self) -> Option<LatLng> {
        LatLng::new(self.latitude?, self.longitude?)
    }

    fn reported_distance_km(&self) -> Option<f64> {
        self.distance
    }
}

// Nearby items come from several sources and spell the same field two ways,
// sometimes both in one object. The long spelling wins.

#[derive(Deserialize)]
struct WirePosition {
    #[serde(default, deserialize_with = "de_opt_f64")]
    latitude: Option<f64>,
    #[serde(default, deserialize_with = "de_opt_f64")]
    lat: Option<f64>,
    #[serde(default, deserialize_with = "de_opt_f64")]
    longitude: Option<f64>,
    #[serde(default, deserialize_with = "de_opt_f64")]
    lng: Option<f64>,
    #[serde(default, deserialize_with = "de_opt_f64")]
    distance: Option<f64>,
    #[serde(default, deserialize_with = "de_opt_f64")]
    distance_km: Option<f64>,
}

impl WirePosition {
    fn resolve(self) -> (Option<f64>, Option<f64>, Option<f64>) {
        (
            self.latitude.or(self.lat),
            self.longitude.or(self.lng),
            self.distance.or(self.distance_km),
        )
    }
}

#[derive(Deserialize)]
struct NearbyBranchWire {
    #[serde(default, deserialize_with = "de_opt_i64")]
    id: Option<i64>,
    #[serde(default, deserialize_with = "de_string_or_default")]
    name: String,
    #[serde(default, deserialize_with = "de_string_or_default")]
    kind: String,
    #[serde(default, rename = "type", deserialize_with = "de_string_or_default")]
    type_name: String,
    #[serde(default)]
    address: Option<String>,
    #[serde(flatten)]
    position: WirePosition,
}

impl From<NearbyBranchWire> for NearbyBranch {
    fn from(w: NearbyBranchWire) -> Self {
        let (latitude, longitude, distance) = w.position.resolve();
        Self {
            id: w.id,
            name: w.name,
            kind: or_nonempty(w.kind, w.type_name),
            address: w.address,
            latitude,
            longitude,
            distance,
        }
    }
}

#[derive(Deserialize)]
struct CompetitorAtmWire {
    #[serde(default, deserialize_with = "de_string_or_default")]
    name: String,
    #[serde(default, deserialize_with = "de_string_or_default")]
    bank: String,
    #[serde(default, deserialize_with = "de_string_or_default")]
    bank_name: String,
    #[serde(default)]
    address: Option<String>,
    #[serde(default)]
    vicinity: Option<String>,
    #[serde(flatten)]
    position: WirePosition,
}

impl From<CompetitorAtmWire> for CompetitorAtm {
    fn from(w: CompetitorAtmWire) -> Self {
        let (latitude, longitude, distance) = w.position.resolve();
        Self {
            name: w.name,
            bank: or_nonempty(w.bank, w.bank_name),
            address: w.address.or(w.vicinity),
            latitude,
            longitude,
            distance,
        }
    }
}

/// `id` is the provider's legacy identifier, not a place id.
#[derive(Deserialize)]
struct PublicPlaceWire {
    #[serde(default)]
    place_id: Option<String>,
    #[serde(default, deserialize_with = "de_string_or_default")]
    name: String,
    #[serde(default, deserialize_with = "de_string_or_default")]
    category: String,
    #[serde(default, rename = "type", deserialize_with = "de_string_or_default")]
    type_name: String,
    #[serde(default)]
    address: Option<String>,
    #[serde(default)]
    vicinity: Option<String>,
    #[serde(flatten)]
    position: WirePosition,
}

impl From<PublicPlaceWire> for PublicPlace {
    fn from(w: PublicPlaceWire) -> Self {
        let (latitude, longitude, distance) = w.position.resolve();
        Self {
            place_id: w.place_id,
            name: w.name,
            category: or_nonempty(w.category, w.type_name),
            address: w.address.or(w.vicinity),
            latitude,
            longitude,
            distance,
        }
    }
}

/// Per-factor scores computed by the server.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ScoreBreakdown {
    #[serde(default, alias = "branch", deserialize_with = "de_opt_f64")]
    pub branch_score: Option<f64>,
    #[serde(default, alias = "competitor", deserialize_with = "de_opt_f64")]
    pub competitor_score: Option<f64>,
    #[serde(default, alias = "public_place", deserialize_with = "de_opt_f64")]
    pub public_place_score: Option<f64>,
    #[serde(default, alias = "cost", deserialize_with = "de_opt_f64")]
    pub cost_score: Option<f64>,
    #[serde(default, alias = "total", deserialize_with = "de_opt_f64")]
    pub total_score: Option<f64>,
}

impl ScoreBreakdown {
    /// Rows of the result table; missing factors are skipped.
    pub fn entries(&self) -> Vec<(&'static str, f64)> {
        [
            ("Cabang / ATM BJB", self.branch_score),
            ("ATM Bank Lain", self.competitor_score),
            ("Lokasi Umum", self.public_place_score),
            ("Biaya", self.cost_score),
        ]
        .into_iter()
        .filter_map(|(label, v)| v.map(|v| (label, v)))
        .collect()
    }

    /// Server total, else the sum of known factors.
    pub fn total(&self) -> f64 {
        self.total_score
            .unwrap_or_else(|| self.entries().iter().map(|(_, v)| v).sum())
    }
}

/// Payload of `POST /analyze-relocation`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AnalyzeRelocationResponse {
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default, alias = "nearest_branches", alias = "branches")]
    pub nearby_branches: Vec<NearbyBranch>,
    #[serde(default, alias = "nearest_competitor_atms", alias = "competitor_atms")]
    pub competitor_atms: Vec<CompetitorAtm>,
    #[serde(default, alias = "places")]
    pub public_places: Vec<PublicPlace>,
    #[serde(default, alias = "breakdown", alias = "score")]
    pub score_breakdown: Option<ScoreBreakdown>,
    #[serde(default, deserialize_with = "de_opt_f64")]
    pub predicted_volume: Option<f64>,
    #[serde(default, alias = "predicted_tier", deserialize_with = "deserialize_opt_tier")]
    pub tier_prediction: Option<Tier>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_analysis() {
        let resp: AnalyzeRelocationResponse = serde_json::from_str(
            r#"{
                "nearest_branches": [{"id":6,"name":"KC Braga","lat":-6.917,"lng":107.609,"distance":1.2}],
                "nearest_competitor_atms": [{"name":"ATM BCA","bank_name":"BCA","lat":"-6.91","lng":"107.61"}],
                "public_places": [{"name":"Pasar Baru","category":"market"}],
                "breakdown": {"branch":10,"competitor":"5"},
                "predicted_volume": "2500",
                "predicted_tier": null
            }"#,
        )
        .unwrap();
        assert_eq!(resp.nearby_branches.len(), 1);
        assert_eq!(resp.competitor_atms[0].bank, "BCA");
        assert_eq!(resp.public_places[0].classify(), PlaceCategory::Shopping);
        assert_eq!(resp.predicted_volume, Some(2500.0));
        assert_eq!(resp.tier_prediction, None);
        let breakdown = resp.score_breakdown.unwrap();
        assert_eq!(breakdown.entries().len(), 2);
        assert_eq!(breakdown.total(), 15.0);
    }

    #[test]
    fn test_both_spellings_in_one_item() {
        let resp: AnalyzeRelocationResponse = serde_json::from_str(
            r#"{
                "public_places": [{"id":"legacy-1","place_id":"ChIJ9","name":"RS Hasan Sadikin",
                    "type":"hospital","vicinity":"Jl. Pasteur","lat":-6.89,"latitude":-6.8964,
                    "lng":107.6,"longitude":107.5987,"distance":0.8,"distance_km":0.9}],
                "nearest_competitor_atms": [{"name":"ATM BNI","bank":"BNI","bank_name":"Bank BNI",
                    "address":"Jl. Dago","vicinity":"Dago"}]
            }"#,
        )
        .unwrap();
        let place = &resp.public_places[0];
        assert_eq!(place.place_id.as_deref(), Some("ChIJ9"));
        assert_eq!(place.category, "hospital");
        assert_eq!(place.address.as_deref(), Some("Jl. Pasteur"));
        assert_eq!(place.latitude, Some(-6.8964));
        assert_eq!(place.longitude, Some(107.5987));
        assert_eq!(place.distance, Some(0.8));

        let atm = &resp.competitor_atms[0];
        assert_eq!(atm.bank, "BNI");
        assert_eq!(atm.address.as_deref(), Some("Jl. Dago"));
    }

    #[test]
    fn test_distance_fallback() {
        let origin = LatLng::new(-6.917, 107.609);
        let reported = NearbyBranch {
            distance: Some(1.2),
            ..Default::default()
        };
        assert_eq!(reported.distance_km(origin), Some(1.2));

        let computed = CompetitorAtm {
            latitude: Some(-6.917),
            longitude: Some(107.609),
            ..Default::default()
        };
        assert_eq!(computed.distance_km(origin), Some(0.0));

        let unknown = PublicPlace::default();
        assert_eq!(unknown.distance_km(origin), None);
        assert_eq!(computed.distance_km(None), None);
    }
}

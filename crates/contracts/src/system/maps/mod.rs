//! Geocoding proxy DTOs (`/maps/*`).

use serde::{Deserialize, Serialize};

use crate::shared::geo::LatLng;
use crate::shared::serde_helpers::{de_opt_f64, de_string_or_default, or_nonempty};

/// Body of `POST /maps/reverse-geocode`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReverseGeocodeRequest {
    pub lat: f64,
    pub lng: f64,
}

impl From<LatLng> for ReverseGeocodeRequest {
    fn from(p: LatLng) -> Self {
        Self { lat: p.lat, lng: p.lng }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "ReverseGeocodeWire")]
pub struct ReverseGeocodeResult {
    pub address: String,
    pub place_id: Option<String>,
}

/// `data` of `GET /maps/place-details/:id`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "PlaceDetailsWire")]
pub struct PlaceDetails {
    pub place_id: Option<String>,
    pub name: String,
    pub address: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub types: Vec<String>,
    pub rating: Option<f64>,
    pub phone: Option<String>,
}

// The proxy forwards provider fields as-is and may add its own spelling
// next to them; our own key wins.

#[derive(Deserialize)]
struct ReverseGeocodeWire {
    #[serde(default, deserialize_with = "de_string_or_default")]
    address: String,
    #[serde(default, deserialize_with = "de_string_or_default")]
    formatted_address: String,
    #[serde(default)]
    place_id: Option<String>,
}

impl From<ReverseGeocodeWire> for ReverseGeocodeResult {
    fn from(w: ReverseGeocodeWire) -> Self {
        Self {
            address: or_nonempty(w.address, w.formatted_address),
            place_id: w.place_id,
        }
    }
}

#[derive(Deserialize)]
struct PlaceDetailsWire {
    #[serde(default)]
    place_id: Option<String>,
    #[serde(default, deserialize_with = "de_string_or_default")]
    name: String,
    #[serde(default)]
    address: Option<String>,
    #[serde(default)]
    formatted_address: Option<String>,
    #[serde(default, deserialize_with = "de_opt_f64")]
    latitude: Option<f64>,
    #[serde(default, deserialize_with = "de_opt_f64")]
    lat: Option<f64>,
    #[serde(default, deserialize_with = "de_opt_f64")]
    longitude: Option<f64>,
    #[serde(default, deserialize_with = "de_opt_f64")]
    lng: Option<f64>,
    #[serde(default)]
    types: Vec<String>,
    #[serde(default, deserialize_with = "de_opt_f64")]
    rating: Option<f64>,
    #[serde(default)]
    phone: Option<String>,
    #[serde(default)]
    formatted_phone_number: Option<String>,
}

impl From<PlaceDetailsWire> for PlaceDetails {
    fn from(w: PlaceDetailsWire) -> Self {
        Self {
            place_id: w.place_id,
            name: w.name,
            address: w.address.or(w.formatted_address),
            latitude: w.latitude.or(w.lat),
            longitude: w.longitude.or(w.lng),
            types: w.types,
            rating: w.rating,
            phone: w.phone.or(w.formatted_phone_number),
        }
    }
}

impl PlaceDetails {
    pub fn position(&self) -> Option<LatLng> {
        LatLng::new(self.latitude?, self.longitude?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_details() {
        let d: PlaceDetails = serde_json::from_str(
            r#"{"place_id":"p1","name":"Pasar Baru","formatted_address":"Jl. Otista","lat":"-6.91","lng":107.6,"types":["market"]}"#,
        )
        .unwrap();
        assert_eq!(d.address.as_deref(), Some("Jl. Otista"));
        assert!(d.position().is_some());
        assert_eq!(d.types, vec!["market"]);
    }

    #[test]
    fn test_both_address_spellings() {
        let d: PlaceDetails = serde_json::from_str(
            r#"{"address":"Jl. Otto Iskandardinata 1","formatted_address":"Jl. Otista","latitude":-6.91,"lat":-6.9}"#,
        )
        .unwrap();
        assert_eq!(d.address.as_deref(), Some("Jl. Otto Iskandardinata 1"));
        assert_eq!(d.latitude, Some(-6.91));

        let r: ReverseGeocodeResult =
            serde_json::from_str(r#"{"address":"","formatted_address":"Jl. Braga"}"#).unwrap();
        assert_eq!(r.address, "Jl. Braga");
    }

    #[test]
    fn test_reverse_geocode_body() {
        let body = ReverseGeocodeRequest::from(LatLng { lat: -6.9, lng: 107.6 });
        assert_eq!(
            serde_json::to_value(&body).unwrap(),
            serde_json::json!({"lat": -6.9, "lng": 107.6})
        );
    }
}

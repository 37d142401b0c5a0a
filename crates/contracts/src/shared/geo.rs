use serde::{Deserialize, Serialize};
use serde_json::Value;

pub const EARTH_RADIUS_KM: f64 = 6371.0;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LatLng {
    pub lat: f64,
    pub lng: f64,
}

impl LatLng {
    /// Finite and inside WGS84 bounds.
    pub fn new(lat: f64, lng: f64) -> Option<Self> {
        let valid = lat.is_finite()
            && lng.is_finite()
            && (-90.0..=90.0).contains(&lat)
            && (-180.0..=180.0).contains(&lng);
        valid.then_some(Self { lat, lng })
    }

    /// Accepts numbers or numeric strings, the backend sends both.
    pub fn from_values(lat: &Value, lng: &Value) -> Option<Self> {
        Self::new(coordinate_from_value(lat)?, coordinate_from_value(lng)?)
    }

    pub fn parse(lat: &str, lng: &str) -> Option<Self> {
        Self::new(lat.trim().parse().ok()?, lng.trim().parse().ok()?)
    }
}

pub fn coordinate_from_value(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    }
    .filter(|v| v.is_finite())
}

/// Great-circle distance in kilometres.
pub fn haversine_km(a: LatLng, b: LatLng) -> f64 {
    let (lat1, lat2) = (a.lat.to_radians(), b.lat.to_radians());
    let d_lat = (b.lat - a.lat).to_radians();
    let d_lng = (b.lng - a.lng).to_radians();

    let h = (d_lat / 2.0).sin().powi(2) + lat1.cos() * lat2.cos() * (d_lng / 2.0).sin().powi(2);
    2.0 * EARTH_RADIUS_KM * h.sqrt().min(1.0).asin()
}

/// Distance when both ends are known, `None` otherwise.
pub fn distance_between(a: Option<LatLng>, b: Option<LatLng>) -> Option<f64> {
    Some(haversine_km(a?, b?))
}

/// "850 m", "2.35 km" or "N/A".
pub fn format_distance(km: Option<f64>) -> String {
    match km {
        Some(km) if km < 1.0 => format!("{:.0} m", km * 1000.0),
        Some(km) => format!("{:.2} km", km),
        None => "N/A".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn bandung() -> LatLng {
        LatLng::new(-6.9175, 107.6191).unwrap()
    }

    fn jakarta() -> LatLng {
        LatLng::new(-6.2088, 106.8456).unwrap()
    }

    #[test]
    fn test_identical_points() {
        assert_eq!(haversine_km(bandung(), bandung()), 0.0);
    }

    #[test]
    fn test_symmetry() {
        let ab = haversine_km(bandung(), jakarta());
        let ba = haversine_km(jakarta(), bandung());
        assert!((ab - ba).abs() < 1e-9);
        assert!(ab > 110.0 && ab < 125.0, "got {}", ab);
    }

    #[test]
    fn test_missing_or_non_numeric_coordinates() {
        assert_eq!(distance_between(None, Some(jakarta())), None);
        assert_eq!(LatLng::from_values(&json!("abc"), &json!(107.6)), None);
        assert_eq!(LatLng::from_values(&Value::Null, &json!(107.6)), None);
        assert_eq!(LatLng::parse("", "107.6"), None);
        assert_eq!(format_distance(distance_between(None, None)), "N/A");
    }

    #[test]
    fn test_numeric_strings_accepted() {
        let p = LatLng::from_values(&json!("-6.9175"), &json!(107.6191)).unwrap();
        assert_eq!(p, bandung());
    }

    #[test]
    fn test_out_of_range_rejected() {
        assert!(LatLng::new(91.0, 0.0).is_none());
        assert!(LatLng::new(0.0, 181.0).is_none());
        assert!(LatLng::new(f64::NAN, 0.0).is_none());
    }

    #[test]
    fn test_format_distance() {
        assert_eq!(format_distance(Some(0.85)), "850 m");
        assert_eq!(format_distance(Some(2.346)), "2.35 km");
    }
}

pub mod api;
pub mod bridge;
pub mod loader;

use contracts::shared::geo::LatLng;

/// Bandung, where the fleet is concentrated.
pub const DEFAULT_CENTER: LatLng = LatLng {
    lat: -6.9147,
    lng: 107.6098,
};

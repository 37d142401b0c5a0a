use contracts::shared::api_error::ApiError;
use contracts::shared::geo::LatLng;
use contracts::system::maps::{PlaceDetails, ReverseGeocodeRequest, ReverseGeocodeResult};

use crate::shared::api_utils::{get_json, post_json};

pub async fn reverse_geocode(point: LatLng) -> Result<ReverseGeocodeResult, ApiError> {
    post_json("/maps/reverse-geocode", &ReverseGeocodeRequest::from(point)).await
}

pub async fn place_details(place_id: &str) -> Result<PlaceDetails, ApiError> {
    get_json(&format!("/maps/place-details/{}", urlencoding::encode(place_id))).await
}

use contracts::shared::api_error::ApiError;
use contracts::system::auth::{LoginRequest, LoginResponse, UserProfile};

use crate::shared::api_utils::{get_json_with_token, post_json_public};

pub async fn login(request: &LoginRequest) -> Result<LoginResponse, ApiError> {
    post_json_public("/auth/login", request).await
}

/// Profile of the token's owner. Also serves as the token validity check.
pub async fn get_current_user(token: &str) -> Result<UserProfile, ApiError> {
    get_json_with_token("/users", token).await
}

use contracts::system::auth::UserProfile;
use web_sys::window;

const TOKEN_KEY: &str = "atm_auth_token";
const PROFILE_KEY: &str = "atm_auth_profile";

fn get_local_storage() -> Option<web_sys::Storage> {
    window()?.local_storage().ok()?
}

pub fn save_token(token: &str) {
    if let Some(storage) = get_local_storage() {
        let _ = storage.set_item(TOKEN_KEY, token);
    }
}

pub fn get_token() -> Option<String> {
    get_local_storage()?
        .get_item(TOKEN_KEY)
        .ok()?
        .filter(|t| !t.is_empty())
}

/// Profile is cached as JSON so the session check can greet the user before `/users` answers.
pub fn save_profile(profile: &UserProfile) {
    let Some(storage) = get_local_storage() else {
        return;
    };
    match serde_json::to_string(profile) {
        Ok(json) => {
            let _ = storage.set_item(PROFILE_KEY, &json);
        }
        Err(e) => log::warn!("cannot cache profile: {}", e),
    }
}

/// A corrupt cached profile is treated as absent.
pub fn get_profile() -> Option<UserProfile> {
    let raw = get_local_storage()?.get_item(PROFILE_KEY).ok()??;
    serde_json::from_str(&raw)
        .map_err(|e| log::warn!("discarding cached profile: {}", e))
        .ok()
}

pub fn clear_session() {
    if let Some(storage) = get_local_storage() {
        let _ = storage.remove_item(TOKEN_KEY);
        let _ = storage.remove_item(PROFILE_KEY);
    }
}

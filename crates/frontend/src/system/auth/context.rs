//! Session store.
//!
//! `AuthStore` is provided once by `App` and is `Copy`, so components and
//! spawned futures can hold it freely. The HTTP layer has no component owner
//! to read context from, so the provided store is also registered per thread
//! and reached through [`current_token`] and [`expire_session`].

use std::cell::Cell;

use contracts::shared::api_error::ApiError;
use contracts::system::auth::{LoginRequest, UserProfile};
use leptos::prelude::*;
use leptos::task::spawn_local;

use super::{api, storage};

#[derive(Clone, Debug, Default, PartialEq)]
pub struct AuthState {
    pub token: Option<String>,
    pub profile: Option<UserProfile>,
    /// Shown on the login page after a forced logout.
    pub notice: Option<String>,
}

#[derive(Clone, Copy)]
pub struct AuthStore {
    pub state: RwSignal<AuthState>,
    /// True while a stored session is being re-validated at startup.
    pub restoring: RwSignal<bool>,
}

thread_local! {
    static ACTIVE: Cell<Option<AuthStore>> = const { Cell::new(None) };
}

impl AuthStore {
    pub fn new() -> Self {
        Self {
            state: RwSignal::new(AuthState::default()),
            restoring: RwSignal::new(false),
        }
    }

    /// Create the store, put it into context and register it for the HTTP layer.
    pub fn provide() -> Self {
        let store = Self::new();
        provide_context(store);
        ACTIVE.with(|active| active.set(Some(store)));
        store
    }

    pub fn is_authenticated(&self) -> bool {
        self.state.with(|s| s.token.is_some())
    }

    pub fn profile(&self) -> Option<UserProfile> {
        self.state.with(|s| s.profile.clone())
    }

    /// Pick up the session left in storage and check it against `/users`.
    /// Anything but a valid profile discards the whole session.
    pub fn restore(&self) {
        let Some(token) = storage::get_token() else {
            return;
        };
        let this = *self;
        this.state.set(pending_state(storage::get_profile()));
        this.restoring.set(true);
        spawn_local(async move {
            match api::get_current_user(&token).await {
                Ok(profile) => {
                    storage::save_profile(&profile);
                    this.state.set(AuthState {
                        token: Some(token),
                        profile: Some(profile),
                        notice: None,
                    });
                }
                Err(e) => {
                    log::warn!("stored session rejected: {}", e);
                    storage::clear_session();
                    this.state.set(AuthState::default());
                }
            }
            this.restoring.set(false);
        });
    }

    /// Both `/auth/login` and `/users` must succeed before anything is stored.
    pub async fn login(&self, username: &str, password: &str) -> Result<UserProfile, ApiError> {
        let request = LoginRequest::new(username, password).ok_or_else(|| {
            ApiError::http(400, Some("Username dan password wajib diisi".to_string()))
        })?;

        let response = api::login(&request).await?;
        let profile = match api::get_current_user(&response.token).await {
            Ok(profile) => profile,
            Err(ApiError::Empty) => response.user.clone().ok_or(ApiError::Empty)?,
            Err(e) => return Err(e),
        };

        storage::save_token(&response.token);
        storage::save_profile(&profile);
        self.state.set(AuthState {
            token: Some(response.token),
            profile: Some(profile.clone()),
            notice: None,
        });
        log::info!("logged in as {}", profile.username);
        Ok(profile)
    }

    pub fn logout(&self) {
        storage::clear_session();
        self.state.set(AuthState::default());
    }

    fn expire(&self) {
        let active = self
            .state
            .try_with_untracked(|s| s.token.is_some())
            .unwrap_or(false);
        if !active {
            return;
        }
        log::warn!("session expired, logging out");
        storage::clear_session();
        self.state.set(AuthState {
            notice: Some(ApiError::Unauthorized.to_string()),
            ..AuthState::default()
        });
    }
}

/// While `/users` validates a stored token, the cached profile is shown but
/// the token is withheld, so nothing behind `RequireAuth` renders yet.
fn pending_state(cached: Option<UserProfile>) -> AuthState {
    AuthState {
        token: None,
        profile: cached,
        notice: None,
    }
}

/// Line under the session-check spinner.
pub fn session_check_label(profile: Option<&UserProfile>) -> String {
    match profile {
        Some(p) => format!("Memeriksa sesi {}...", p.display_name()),
        None => "Memeriksa sesi...".to_string(),
    }
}

impl Default for AuthStore {
    fn default() -> Self {
        Self::new()
    }
}

pub fn use_auth() -> AuthStore {
    use_context::<AuthStore>().expect("AuthStore not provided")
}

/// Token of the registered store, if logged in.
pub fn current_token() -> Option<String> {
    ACTIVE
        .with(Cell::get)
        .and_then(|store| store.state.try_with_untracked(|s| s.token.clone()))
        .flatten()
}

/// Called by the HTTP layer on 401/403 or a missing token.
pub fn expire_session() {
    if let Some(store) = ACTIVE.with(Cell::get) {
        store.expire();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pending_state_shows_cached_profile_without_token() {
        let cached = UserProfile {
            username: "andi".into(),
            name: Some("Andi Wijaya".into()),
            ..Default::default()
        };
        let state = pending_state(Some(cached.clone()));
        assert_eq!(state.token, None);
        assert_eq!(state.profile, Some(cached.clone()));
        assert_eq!(session_check_label(state.profile.as_ref()), "Memeriksa sesi Andi Wijaya...");
        assert_eq!(session_check_label(None), "Memeriksa sesi...");
    }
}

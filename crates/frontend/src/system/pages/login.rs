use contracts::shared::api_error::ApiError;
use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::system::auth::context::use_auth;

fn login_error_text(err: &ApiError) -> String {
    match err {
        ApiError::Unauthorized => "Username atau password salah".to_string(),
        other => other.user_message(),
    }
}

#[component]
pub fn LoginPage() -> impl IntoView {
    let username = RwSignal::new(String::new());
    let password = RwSignal::new(String::new());
    let error_message = RwSignal::new(Option::<String>::None);
    let is_loading = RwSignal::new(false);

    let auth = use_auth();
    let notice = move || auth.state.with(|s| s.notice.clone());

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        if is_loading.get_untracked() {
            return;
        }

        let username_val = username.get_untracked();
        let password_val = password.get_untracked();

        is_loading.set(true);
        error_message.set(None);

        spawn_local(async move {
            if let Err(e) = auth.login(&username_val, &password_val).await {
                log::warn!("login failed: {}", e);
                error_message.set(Some(login_error_text(&e)));
                password.set(String::new());
            }
            is_loading.set(false);
        });
    };

    view! {
        <div class="login-container">
            <div class="login-box">
                <h1>"ATM Fleet Dashboard"</h1>
                <h2>"Masuk"</h2>

                <Show when=move || notice().is_some() && error_message.get().is_none()>
                    <div class="info-message">{move || notice().unwrap_or_default()}</div>
                </Show>

                <Show when=move || error_message.get().is_some()>
                    <div class="error-message">
                        {move || error_message.get().unwrap_or_default()}
                    </div>
                </Show>

                <form on:submit=on_submit>
                    <div class="form-group">
                        <label for="username">"Username"</label>
                        <input
                            type="text"
                            id="username"
                            autocomplete="username"
                            prop:value=move || username.get()
                            on:input=move |ev| username.set(event_target_value(&ev))
                            required
                            disabled=move || is_loading.get()
                        />
                    </div>

                    <div class="form-group">
                        <label for="password">"Password"</label>
                        <input
                            type="password"
                            id="password"
                            autocomplete="current-password"
                            prop:value=move || password.get()
                            on:input=move |ev| password.set(event_target_value(&ev))
                            required
                            disabled=move || is_loading.get()
                        />
                    </div>

                    <button
                        type="submit"
                        class="btn-primary"
                        disabled=move || is_loading.get()
                    >
                        {move || if is_loading.get() { "Memproses..." } else { "Masuk" }}
                    </button>
                </form>
            </div>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wrong_credentials_message() {
        assert_eq!(login_error_text(&ApiError::Unauthorized), "Username atau password salah");
        let other = ApiError::Network("offline".into());
        assert_eq!(login_error_text(&other), other.user_message());
    }
}

use leptos::prelude::*;
use thaw::*;

use super::context::{session_check_label, use_auth};

/// Renders `children` only for a logged-in user, `fallback` otherwise.
/// While a stored session is being checked a spinner is shown instead.
#[component]
pub fn RequireAuth<F, FV>(fallback: F, children: ChildrenFn) -> impl IntoView
where
    F: Fn() -> FV + Send + Sync + 'static,
    FV: IntoView + 'static,
{
    let auth = use_auth();
    let authenticated = Memo::new(move |_| auth.is_authenticated());
    let restoring = auth.restoring;

    move || {
        if restoring.get() {
            view! {
                <div class="session-check">
                    <Spinner />
                    <div class="session-check__label">
                        {move || auth.state.with(|s| session_check_label(s.profile.as_ref()))}
                    </div>
                </div>
            }
            .into_any()
        } else if authenticated.get() {
            children().into_any()
        } else {
            fallback().into_any()
        }
    }
}

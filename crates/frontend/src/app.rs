use crate::app_shell::AppShell;
use crate::layout::global_context::AppGlobalContext;
use crate::layout::toast_service::ToastService;
use crate::system::auth::context::AuthStore;
use leptos::prelude::*;

#[component]
pub fn App() -> impl IntoView {
    provide_context(AppGlobalContext::new());
    provide_context(ToastService::new());

    let auth = AuthStore::provide();
    auth.restore();

    view! {
        <AppShell />
    }
}

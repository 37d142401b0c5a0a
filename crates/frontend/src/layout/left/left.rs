use crate::layout::global_context::AppGlobalContext;
use leptos::prelude::*;

#[component]
pub fn Left(children: Children) -> impl IntoView {
    let tabs_store = use_context::<AppGlobalContext>().expect("AppGlobalContext not found");

    view! {
        <div data-zone="left" class="left" class:hidden=move || !tabs_store.left_open.get()>
            {children()}
        </div>
    }
}

use crate::layout::global_context::{AppGlobalContext, Tab as TabData};
use leptos::ev;
use leptos::prelude::*;

use crate::shared::icons::icon;

#[component]
fn TabButton(tab: TabData) -> impl IntoView {
    let tabs_store = use_context::<AppGlobalContext>().expect("AppGlobalContext not found");

    let key = StoredValue::new(tab.key.clone());
    let is_active = Memo::new(move |_| key.with_value(|k| tabs_store.active.get().as_deref() == Some(k.as_str())));
    let title = move || {
        key.with_value(|k| {
            tabs_store
                .opened
                .with(|tabs| tabs.iter().find(|t| &t.key == k).map(|t| t.title.clone()))
        })
        .unwrap_or_default()
    };

    let on_close = move |ev: ev::MouseEvent| {
        ev.stop_propagation();
        key.with_value(|k| tabs_store.close_tab(k));
    };

    view! {
        <div
            class="tab-strip__tab"
            class:tab-strip__tab--active=is_active
            on:click=move |_| key.with_value(|k| tabs_store.activate_tab(k))
        >
            <span class="tab-strip__title">{title}</span>
            <button class="tab-strip__close" on:click=on_close title="Tutup">
                {icon("x")}
            </button>
        </div>
    }
}

/// Row of open tabs above the content.
#[component]
pub fn TabStrip() -> impl IntoView {
    let tabs_store = use_context::<AppGlobalContext>().expect("AppGlobalContext not found");

    view! {
        <div class="tab-strip">
            <For
                each=move || tabs_store.opened.get()
                key=|tab| tab.key.clone()
                children=move |tab: TabData| view! { <TabButton tab=tab /> }
            />
        </div>
    }
}

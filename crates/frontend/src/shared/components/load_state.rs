//! Loading, error and empty states shared by every screen.

use leptos::prelude::*;
use thaw::*;

pub const EMPTY_TEXT: &str = "Data tidak ditemukan";

/// Inline error; renders nothing while `message` is `None`.
#[component]
pub fn ErrorBar(#[prop(into)] message: Signal<Option<String>>) -> impl IntoView {
    move || {
        message.get().map(|text| {
            view! {
                <div class="error-bar">
                    <MessageBar intent=MessageBarIntent::Error>
                        <span>{text}</span>
                    </MessageBar>
                </div>
            }
        })
    }
}

#[component]
pub fn LoadingBlock(#[prop(optional, into)] label: Option<String>) -> impl IntoView {
    view! {
        <div class="loading-block">
            <Spinner size=SpinnerSize::Small label=label.unwrap_or_else(|| "Memuat...".to_string()) />
        </div>
    }
}

#[component]
pub fn EmptyState(#[prop(optional, into)] text: Option<String>) -> impl IntoView {
    view! {
        <div class="empty-state">{text.unwrap_or_else(|| EMPTY_TEXT.to_string())}</div>
    }
}

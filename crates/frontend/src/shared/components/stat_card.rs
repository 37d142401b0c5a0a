use crate::shared::icons::icon;
use leptos::prelude::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StatTone {
    #[default]
    Neutral,
    Good,
    Bad,
}

/// Single figure with a label. `value` is already formatted; `None` shows a dash.
#[component]
pub fn StatCard(
    #[prop(into)] label: String,
    #[prop(into)] icon_name: String,
    #[prop(into)] value: Signal<Option<String>>,
    #[prop(optional, into)] tone: Signal<StatTone>,
    #[prop(optional, into)] subtitle: Signal<Option<String>>,
    #[prop(optional, into)] loading: Signal<bool>,
) -> impl IntoView {
    let class = move || match tone.get() {
        StatTone::Good => "stat-card stat-card--success",
        StatTone::Bad => "stat-card stat-card--error",
        StatTone::Neutral => "stat-card",
    };

    view! {
        <div class=class class:stat-card--loading=move || loading.get()>
            <div class="stat-card__icon">{icon(&icon_name)}</div>
            <div class="stat-card__content">
                <div class="stat-card__label">{label}</div>
                <div class="stat-card__value">
                    {move || if loading.get() {
                        "…".to_string()
                    } else {
                        value.get().unwrap_or_else(|| "-".to_string())
                    }}
                </div>
                {move || subtitle.get().map(|s| view! { <div class="stat-card__subtitle">{s}</div> })}
            </div>
        </div>
    }
}

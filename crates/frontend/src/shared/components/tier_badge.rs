use contracts::enums::tier::{tier_style_of, Tier};
use leptos::prelude::*;

/// Colored "TIER n" pill; gray "N/A" when the tier is unknown.
#[component]
pub fn TierBadge(tier: Option<Tier>, #[prop(optional)] prefix: &'static str) -> impl IntoView {
    let style = tier_style_of(tier);
    let text = if prefix.is_empty() {
        style.label.to_string()
    } else {
        format!("{} {}", prefix, style.label)
    };
    view! {
        <span
            class="tier-badge"
            style={format!("color: {}; background: {}; border-color: {};", style.color, style.background, style.color)}
        >
            {text}
        </span>
    }
}

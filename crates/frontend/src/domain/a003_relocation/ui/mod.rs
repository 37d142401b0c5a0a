pub mod details;
pub mod list;

use contracts::domain::a003_relocation::RelocationStatus;
use leptos::prelude::*;
use thaw::*;

/// Colored status chip shared by the list and the detail view.
#[component]
pub fn StatusBadge(status: RelocationStatus) -> impl IntoView {
    let color = match status {
        RelocationStatus::InProgress => BadgeColor::Warning,
        RelocationStatus::Approved => BadgeColor::Success,
        RelocationStatus::Rejected => BadgeColor::Danger,
        RelocationStatus::Cancelled | RelocationStatus::Unknown(_) => BadgeColor::Subtle,
    };
    view! {
        <Badge appearance=BadgeAppearance::Tint color=color>
            {status.label().to_string()}
        </Badge>
    }
}

//! Navigation menu with collapsible groups.

use crate::layout::global_context::AppGlobalContext;
use crate::layout::tabs::tab_label_for_key;
use crate::shared::icons::icon;
use crate::system::auth::context::use_auth;
use leptos::prelude::*;

#[derive(Clone, Debug, PartialEq)]
struct MenuGroup {
    id: &'static str,
    label: &'static str,
    icon: &'static str,
    items: Vec<(&'static str, &'static str, &'static str)>, // (key, label, icon)
    admin_only: bool,
}

fn item(key: &'static str, icon: &'static str) -> (&'static str, &'static str, &'static str) {
    (key, tab_label_for_key(key), icon)
}

fn get_menu_groups() -> Vec<MenuGroup> {
    vec![
        MenuGroup {
            id: "overview",
            label: "Ringkasan",
            icon: "dashboard",
            items: vec![
                item("d400_fleet_summary", "dashboard"),
                item("d401_map_view", "map"),
            ],
            admin_only: false,
        },
        MenuGroup {
            id: "reports",
            label: "Laporan",
            icon: "bar-chart",
            items: vec![
                item("p900_atm_performance", "trending-up"),
                item("p901_atm_cba", "scale"),
            ],
            admin_only: false,
        },
        MenuGroup {
            id: "relocation",
            label: "Relokasi",
            icon: "relocate",
            items: vec![
                item("u501_relocation_analysis", "map-pin"),
                item("a003_relocation", "clipboard"),
            ],
            admin_only: false,
        },
        MenuGroup {
            id: "master",
            label: "Master Data",
            icon: "folder",
            items: vec![item("a001_atm", "atm"), item("a002_branch", "building")],
            admin_only: false,
        },
    ]
}

#[component]
pub fn Sidebar() -> impl IntoView {
    let ctx = use_context::<AppGlobalContext>().expect("AppGlobalContext not found");
    let auth = use_auth();
    let is_admin = auth
        .state
        .with_untracked(|s| s.profile.as_ref().map(|p| p.is_admin()).unwrap_or(false));

    let expanded_groups = RwSignal::new(
        get_menu_groups()
            .iter()
            .map(|g| g.id.to_string())
            .collect::<Vec<_>>(),
    );

    view! {
        <div class="app-sidebar__content">
            {get_menu_groups().into_iter().filter(|g| !g.admin_only || is_admin).map(|group| {
                let gid = StoredValue::new(group.id.to_string());
                let is_expanded = move || gid.with_value(|id| expanded_groups.get().contains(id));
                let toggle = move |_| {
                    let id = gid.get_value();
                    expanded_groups.update(|items| {
                        if let Some(pos) = items.iter().position(|x| x == &id) {
                            items.remove(pos);
                        } else {
                            items.push(id);
                        }
                    });
                };
                let items = StoredValue::new(group.items.clone());

                view! {
                    <div>
                        <div class="app-sidebar__item" style:padding-left="12px" on:click=toggle>
                            <div class="app-sidebar__item-content">
                                {icon(group.icon)}
                                <span>{group.label}</span>
                            </div>
                            <div class="app-sidebar__chevron" class:app-sidebar__chevron--expanded=is_expanded>
                                {icon("chevron-right")}
                            </div>
                        </div>
                        <Show when=is_expanded>
                            <div class="app-sidebar__children">
                                {items.get_value().into_iter().map(|(key, label, icon_name)| view! {
                                    <div
                                        class="app-sidebar__item"
                                        class:app-sidebar__item--active=move || ctx.active.get().as_deref() == Some(key)
                                        style:padding-left="10px"
                                        on:click=move |_| ctx.open_tab(key, label)
                                    >
                                        <div class="app-sidebar__item-content">
                                            {icon(icon_name)}
                                            <span>{label}</span>
                                        </div>
                                    </div>
                                }).collect_view()}
                            </div>
                        </Show>
                    </div>
                }
            }).collect_view()}
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_menu_item_has_a_title() {
        for group in get_menu_groups() {
            for (key, label, _) in group.items {
                assert!(!label.is_empty(), "missing label for {}", key);
            }
        }
    }
}

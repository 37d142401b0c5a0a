//! Tab key → page view. Every key the app can open is listed here.

use leptos::logging::log;
use leptos::prelude::*;

use super::tab_labels::{detail_id, ATM_DETAIL_PREFIX, RELOCATION_DETAIL_PREFIX};
use crate::dashboards::d400_fleet_summary::ui::FleetSummaryDashboard;
use crate::dashboards::d401_map_view::ui::MapView;
use crate::domain::a001_atm::ui::details::AtmDetails;
use crate::domain::a001_atm::ui::list::AtmList;
use crate::domain::a002_branch::ui::tree::BranchTreePage;
use crate::domain::a003_relocation::ui::details::RelocationDetails;
use crate::domain::a003_relocation::ui::list::RelocationList;
use crate::layout::global_context::AppGlobalContext;
use crate::projections::p900_atm_performance::ui::PerformanceReport;
use crate::projections::p901_atm_cba::ui::CbaReport;
use crate::shared::components::load_state::EmptyState;
use crate::usecases::u501_relocation_analysis::view::RelocationWizardPage;

pub fn render_tab_content(key: &str, tabs_store: AppGlobalContext) -> AnyView {
    let key_for_close = key.to_string();
    let on_close = Callback::new(move |_: ()| tabs_store.close_tab(&key_for_close));

    match key {
        "d400_fleet_summary" => view! { <FleetSummaryDashboard /> }.into_any(),
        "d401_map_view" => view! { <MapView /> }.into_any(),

        "a001_atm" => view! { <AtmList /> }.into_any(),
        k if k.starts_with(ATM_DETAIL_PREFIX) => match detail_id(k, ATM_DETAIL_PREFIX) {
            Some(id) => view! { <AtmDetails id=id on_close=on_close /> }.into_any(),
            None => unknown(k),
        },
        "a002_branch" => view! { <BranchTreePage /> }.into_any(),
        "a003_relocation" => view! { <RelocationList /> }.into_any(),
        k if k.starts_with(RELOCATION_DETAIL_PREFIX) => {
            match detail_id(k, RELOCATION_DETAIL_PREFIX) {
                Some(id) => view! { <RelocationDetails id=id on_close=on_close /> }.into_any(),
                None => unknown(k),
            }
        }

        "p900_atm_performance" => view! { <PerformanceReport /> }.into_any(),
        "p901_atm_cba" => view! { <CbaReport /> }.into_any(),

        "u501_relocation_analysis" => view! { <RelocationWizardPage /> }.into_any(),

        other => unknown(other),
    }
}

fn unknown(key: &str) -> AnyView {
    log!("no page registered for tab '{}'", key);
    view! { <EmptyState text={format!("Halaman tidak dikenal: {}", key)} /> }.into_any()
}

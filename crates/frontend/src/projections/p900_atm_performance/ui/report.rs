use contracts::domain::a002_branch::Branch;
use contracts::enums::Period;
use contracts::projections::p900_atm_performance::PerformanceQuery;
use leptos::prelude::*;
use leptos::task::spawn_local;

use super::view_model::{PerformanceCard, PerformanceView};
use crate::domain::a002_branch::ui::picker::BranchPicker;
use crate::projections::p900_atm_performance::api;
use crate::shared::components::load_state::{EmptyState, ErrorBar, LoadingBlock};
use crate::shared::components::period_select::PeriodSelect;
use crate::shared::page_frame::{PageFrame, PageHeader};
use crate::shared::page_standard::PAGE_CAT_REPORT;
use crate::shared::request_seq::RequestSeq;

#[component]
fn PerformanceCardView(card: PerformanceCard) -> impl IntoView {
    let badge_style = format!("color: {}; background: {};", card.tier_color, card.tier_background);
    view! {
        <div class="perf-card" style:border-top-color=card.tier_color>
            <div class="perf-card__head">
                <div>
                    <div class="perf-card__title">{card.title}</div>
                    <div class="perf-card__subtitle">{card.subtitle}</div>
                </div>
                <span class="tier-badge" style=badge_style>{card.tier_label}</span>
            </div>
            <dl class="perf-card__figures">
                <dt>"Volume"</dt>
                <dd>{card.volume}</dd>
                <dt>"Nominal"</dt>
                <dd>{card.nominal}</dd>
                <dt>"Fee"</dt>
                <dd>{card.fee}</dd>
            </dl>
        </div>
    }
}

/// One card per machine for the chosen period and branch.
#[component]
pub fn PerformanceReport() -> impl IntoView {
    let period = RwSignal::new(Period::Q1);
    let branch = RwSignal::new(None::<Branch>);
    let state = RwSignal::new(PerformanceView::default());
    let loading = RwSignal::new(false);
    let seq = RequestSeq::new();

    Effect::new(move |_| {
        let query = PerformanceQuery::new(period.get(), branch.with(|b| b.as_ref().map(|b| b.id)));
        let ticket = seq.next();
        loading.set(true);
        spawn_local(async move {
            let result = api::get_performance(&query).await;
            if !seq.is_current(ticket) {
                return;
            }
            if let Err(e) = &result {
                log::error!("performance report failed: {}", e);
            }
            state.set(PerformanceView::from_result(result));
            loading.set(false);
        });
    });

    view! {
        <PageFrame page_id="p900_atm_performance--report" category=PAGE_CAT_REPORT>
            <PageHeader title="Performa ATM">
                <PeriodSelect period=period />
                <BranchPicker selected=branch placeholder="Semua cabang" />
            </PageHeader>
            <div class="page__content">
                <ErrorBar message=Signal::derive(move || state.with(|s| s.error.clone())) />
                {move || {
                    if loading.get() {
                        return view! { <LoadingBlock /> }.into_any();
                    }
                    if state.with(|s| s.is_empty()) {
                        return view! { <EmptyState /> }.into_any();
                    }
                    view! {
                        <div class="perf-grid">
                            {state.get().cards.into_iter().map(|card| view! {
                                <PerformanceCardView card=card />
                            }).collect_view()}
                        </div>
                    }.into_any()
                }}
            </div>
        </PageFrame>
    }
}

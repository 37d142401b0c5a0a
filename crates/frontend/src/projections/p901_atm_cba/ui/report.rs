use contracts::domain::a001_atm::Atm;
use contracts::enums::Period;
use contracts::projections::p901_atm_cba::{CbaQuery, CbaRecord};
use leptos::prelude::*;
use leptos::task::spawn_local;
use thaw::*;

use crate::domain::a001_atm::api as atm_api;
use crate::projections::p901_atm_cba::api;
use crate::shared::components::load_state::{EmptyState, ErrorBar, LoadingBlock};
use crate::shared::components::period_select::PeriodSelect;
use crate::shared::components::stat_card::{StatCard, StatTone};
use crate::shared::number_format::{format_opt_rupiah, format_rupiah};
use crate::shared::page_frame::{PageFrame, PageHeader};
use crate::shared::page_standard::PAGE_CAT_REPORT;
use crate::shared::request_seq::RequestSeq;

/// Cost lines, then the fee they are weighed against.
fn cost_rows(record: &CbaRecord) -> Vec<(&'static str, String)> {
    let mut rows: Vec<_> = record
        .costs
        .components()
        .into_iter()
        .map(|(label, value)| (label, format_opt_rupiah(value)))
        .collect();
    rows.push(("Total Biaya", format_rupiah(record.total_cost())));
    rows.push(("Fee", format_rupiah(record.fee)));
    rows
}

/// Result of the CBA request for the current selection.
#[derive(Clone, Copy)]
struct CbaLoad {
    record: RwSignal<Option<CbaRecord>>,
    loading: RwSignal<bool>,
    error: RwSignal<Option<String>>,
    seq: RequestSeq,
}

impl CbaLoad {
    fn new() -> Self {
        Self {
            record: RwSignal::new(None),
            loading: RwSignal::new(false),
            error: RwSignal::new(None),
            seq: RequestSeq::new(),
        }
    }

    /// No ATM selected: drop the in-flight request and everything it left behind.
    fn clear(&self) {
        self.seq.invalidate();
        self.record.set(None);
        self.loading.set(false);
        self.error.set(None);
    }
}

#[component]
pub fn CbaReport() -> impl IntoView {
    let period = RwSignal::new(Period::Q1);
    let atm_choice = RwSignal::new(String::new());
    let atms = RwSignal::new(Vec::<Atm>::new());
    let atms_error = RwSignal::new(None::<String>);

    let load = CbaLoad::new();
    let CbaLoad {
        record,
        loading,
        error,
        seq,
    } = load;

    spawn_local(async move {
        match atm_api::list_all_atms().await {
            Ok(list) => atms.set(list),
            Err(e) if e.is_empty() => {}
            Err(e) => {
                log::error!("ATM options failed: {}", e);
                atms_error.set(Some(e.user_message()));
            }
        }
    });

    Effect::new(move |_| {
        let p = period.get();
        let Ok(atm_id) = atm_choice.get().parse::<i64>() else {
            load.clear();
            return;
        };
        let query = CbaQuery::new(p, atm_id);
        let ticket = seq.next();
        loading.set(true);
        error.set(None);
        spawn_local(async move {
            let result = api::get_cba(&query).await;
            if !seq.is_current(ticket) {
                return;
            }
            match result {
                Ok(r) => record.set(Some(r)),
                Err(e) if e.is_empty() => record.set(None),
                Err(e) => {
                    log::error!("CBA for ATM {} failed: {}", atm_id, e);
                    record.set(None);
                    error.set(Some(e.user_message()));
                }
            }
            loading.set(false);
        });
    });

    let net_value = Signal::derive(move || {
        record.with(|r| r.as_ref().map(|r| format_rupiah(r.net_benefit_or_derived())))
    });
    let net_tone = Signal::derive(move || match record.with(|r| r.as_ref().map(|r| r.is_profitable())) {
        Some(true) => StatTone::Good,
        Some(false) => StatTone::Bad,
        None => StatTone::Neutral,
    });

    view! {
        <PageFrame page_id="p901_atm_cba--report" category=PAGE_CAT_REPORT>
            <PageHeader title="CBA ATM" subtitle="Analisa biaya dan manfaat">
                <PeriodSelect period=period />
                <Select value=atm_choice>
                    <option value="">"Pilih ATM"</option>
                    {move || atms.get().into_iter().map(|a| view! {
                        <option value=a.id.to_string()>{format!("{} - {}", a.code, a.name)}</option>
                    }).collect_view()}
                </Select>
            </PageHeader>
            <div class="page__content">
                <ErrorBar message=atms_error />
                <ErrorBar message=error />
                {move || {
                    if atm_choice.with(|c| c.is_empty()) {
                        return view! { <EmptyState text="Pilih ATM untuk melihat CBA" /> }.into_any();
                    }
                    if loading.get() {
                        return view! { <LoadingBlock /> }.into_any();
                    }
                    let Some(r) = record.get() else {
                        return view! { <EmptyState /> }.into_any();
                    };
                    let profitable = r.is_profitable();
                    view! {
                        <div class="cba">
                            <div class="stat-grid">
                                <StatCard
                                    label="Net Benefit"
                                    icon_name="scale"
                                    value=net_value
                                    tone=net_tone
                                />
                                <div class="cba__verdict">
                                    {if profitable {
                                        view! { <Badge appearance=BadgeAppearance::Filled color=BadgeColor::Success>"Menguntungkan"</Badge> }.into_any()
                                    } else {
                                        view! { <Badge appearance=BadgeAppearance::Filled color=BadgeColor::Danger>"Rugi"</Badge> }.into_any()
                                    }}
                                </div>
                            </div>
                            <Table>
                                <TableHeader>
                                    <TableRow>
                                        <TableHeaderCell>"Komponen"</TableHeaderCell>
                                        <TableHeaderCell>"Nilai"</TableHeaderCell>
                                    </TableRow>
                                </TableHeader>
                                <TableBody>
                                    {cost_rows(&r).into_iter().map(|(label, value)| view! {
                                        <TableRow>
                                            <TableCell>{label}</TableCell>
                                            <TableCell class="cell-num">{value}</TableCell>
                                        </TableRow>
                                    }).collect_view()}
                                </TableBody>
                            </Table>
                        </div>
                    }.into_any()
                }}
            </div>
        </PageFrame>
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use contracts::domain::a001_atm::AtmCosts;

    #[test]
    fn test_cost_rows_end_with_total_and_fee() {
        let record = CbaRecord {
            fee: 10_000.0,
            costs: AtmCosts {
                rent_cost: Some(4_000.0),
                electricity_cost: Some(1_000.0),
                ..Default::default()
            },
            ..Default::default()
        };
        let rows = cost_rows(&record);
        assert_eq!(rows.len(), 7);
        assert_eq!(rows[5], ("Total Biaya", "Rp. 5.000".to_string()));
        assert_eq!(rows[6], ("Fee", "Rp. 10.000".to_string()));
        assert!(record.is_profitable());
    }

    #[test]
    fn test_clear_drops_stale_error_and_spinner() {
        let load = CbaLoad::new();
        let ticket = load.seq.next();
        load.loading.set(true);
        load.error.set(Some("Request failed with status 500".to_string()));
        load.record.set(Some(CbaRecord::default()));

        load.clear();

        assert!(!load.seq.is_current(ticket));
        assert!(!load.loading.get_untracked());
        assert_eq!(load.error.get_untracked(), None);
        assert_eq!(load.record.get_untracked(), None);
    }
}

//! Relocation analysis wizard.
//!
//! Location and costs feed `POST /analyze-relocation`; the four output tabs
//! stay locked until an analysis for the current inputs has arrived.

use contracts::domain::a001_atm::Atm;
use contracts::usecases::u501_relocation_analysis::{
    parse_rupiah, CostInputs, RelocationWizard, SaveRelocationRequest, WizardTab,
};
use leptos::ev;
use leptos::prelude::*;
use leptos::task::spawn_local;
use thaw::*;

use super::api;
use super::location::LocationStep;
use super::results::{
    branch_rows, competitor_rows, AnalysisSummary, NearbyList, PublicPlaces,
};
use crate::domain::a001_atm::api as atm_api;
use crate::layout::toast_service::use_toast;
use crate::shared::components::load_state::ErrorBar;
use crate::shared::number_format::format_rupiah;
use crate::shared::page_frame::{PageFrame, PageHeader};
use crate::shared::page_standard::PAGE_CAT_USECASE;
use crate::shared::request_seq::RequestSeq;

/// Rent cost inputs as typed, e.g. "2.500.000".
#[derive(Clone, Copy)]
struct CostFields {
    rent: RwSignal<String>,
    electricity: RwSignal<String>,
    electronic: RwSignal<String>,
    replenishment: RwSignal<String>,
}

impl CostFields {
    fn new() -> Self {
        Self {
            rent: RwSignal::new(String::new()),
            electricity: RwSignal::new(String::new()),
            electronic: RwSignal::new(String::new()),
            replenishment: RwSignal::new(String::new()),
        }
    }

    /// Tracked read, so an Effect can keep the wizard in sync.
    fn parse(&self) -> CostInputs {
        parse_costs([
            self.rent.get().as_str(),
            self.electricity.get().as_str(),
            self.electronic.get().as_str(),
            self.replenishment.get().as_str(),
        ])
    }

    fn clear(&self) {
        for s in [self.rent, self.electricity, self.electronic, self.replenishment] {
            s.set(String::new());
        }
    }
}

fn parse_costs([rent, electricity, electronic, replenishment]: [&str; 4]) -> CostInputs {
    CostInputs {
        rent_cost: parse_rupiah(rent),
        electricity_cost: parse_rupiah(electricity),
        electronic_cost: parse_rupiah(electronic),
        replenishment_cost: parse_rupiah(replenishment),
    }
}

fn parse_atm_choice(raw: &str) -> Option<i64> {
    raw.trim().parse().ok()
}

#[component]
pub fn RelocationWizardPage() -> impl IntoView {
    let toast = use_toast();

    let wizard = RwSignal::new(RelocationWizard::new());
    let costs = CostFields::new();
    let notes = RwSignal::new(String::new());
    let atm_choice = RwSignal::new(String::new());
    let atms = RwSignal::new(Vec::<Atm>::new());

    let analyzing = RwSignal::new(false);
    let saving = RwSignal::new(false);
    let error = RwSignal::new(None::<String>);
    let analyze_seq = RequestSeq::new();

    let active = Memo::new(move |_| wizard.with(|w| w.active_tab()));
    let analysis = Memo::new(move |_| wizard.with(|w| w.analysis().cloned()));

    Effect::new(move |_| {
        let parsed = costs.parse();
        wizard.update(|w| w.set_costs(parsed));
    });

    // ATM being relocated is optional, so a failed list only leaves the select empty.
    Effect::new(move |_| {
        spawn_local(async move {
            match atm_api::list_all_atms().await {
                Ok(list) => atms.set(list),
                Err(e) => log::warn!("relocation ATM options failed: {}", e),
            }
        });
    });

    let on_clear = Callback::new(move |_: ()| {
        analyze_seq.invalidate();
        analyzing.set(false);
        costs.clear();
        notes.set(String::new());
        atm_choice.set(String::new());
        error.set(None);
    });

    let run_analysis = move |_: ev::MouseEvent| {
        let Some(request) = wizard.with_untracked(|w| w.analysis_request()) else {
            error.set(Some("Lengkapi lokasi dan keempat biaya terlebih dahulu".to_string()));
            return;
        };
        let ticket = analyze_seq.next();
        analyzing.set(true);
        error.set(None);
        spawn_local(async move {
            let result = api::analyze_relocation(&request).await;
            if !analyze_seq.is_current(ticket) {
                return;
            }
            analyzing.set(false);
            match result {
                Ok(response) => {
                    let applied = wizard
                        .try_update(|w| w.apply_analysis(request, response))
                        .unwrap_or(false);
                    if applied {
                        log::info!("relocation analysis applied");
                    } else {
                        toast.info("Input berubah selama analisa, silakan jalankan ulang");
                    }
                }
                Err(e) => {
                    log::error!("relocation analysis failed: {}", e);
                    error.set(Some(e.user_message()));
                }
            }
        });
    };

    let on_save = Callback::new(move |_: ()| {
        let atm_id = parse_atm_choice(&atm_choice.get_untracked());
        let notes_text = notes.get_untracked();
        let Some(request) = wizard.with_untracked(|w| {
            w.analysis().map(|a| {
                SaveRelocationRequest::from_analysis(
                    &a.request,
                    &a.response,
                    a.heuristic_tier,
                    atm_id,
                    &notes_text,
                )
            })
        }) else {
            return;
        };
        saving.set(true);
        spawn_local(async move {
            match api::save_relocation(&request).await {
                Ok(ack) => toast.success(
                    ack.message
                        .unwrap_or_else(|| "Pengajuan relokasi tersimpan".to_string()),
                ),
                Err(e) => {
                    log::error!("save relocation failed: {}", e);
                    toast.error(e.user_message());
                }
            }
            saving.set(false);
        });
    });

    let tab_button = move |tab: WizardTab| {
        let locked = move || !wizard.with(|w| w.is_enabled(tab));
        view! {
            <button
                class="wizard-tab"
                class=("wizard-tab--active", move || active.get() == tab)
                disabled=locked
                on:click=move |_| {
                    wizard.update(|w| {
                        w.select(tab);
                    });
                }
            >
                <span class="wizard-tab__index">{tab.index() + 1}</span>
                {tab.label()}
            </button>
        }
    };

    let panel_display = move |tab: WizardTab| move || if active.get() == tab { "block" } else { "none" };

    let total_cost = move || wizard.with(|w| format_rupiah(w.costs().total()));
    let costs_complete = move || wizard.with(|w| w.costs().is_complete());

    view! {
        <PageFrame page_id="u501_relocation_analysis--usecase" category=PAGE_CAT_USECASE>
            <PageHeader title="Analisa Relokasi" />
            <div class="page__content">
                <div class="wizard-tabs">
                    {WizardTab::all().into_iter().map(tab_button).collect_view()}
                </div>
                <ErrorBar message=error />

                <div class="wizard-panel" style:display=panel_display(WizardTab::Location)>
                    <LocationStep wizard=wizard on_clear=on_clear />
                </div>

                <div class="wizard-panel" style:display=panel_display(WizardTab::RentCost)>
                    <div class="form-grid">
                        <label>"Biaya Sewa"</label>
                        <Input value=costs.rent placeholder="Rp" />
                        <label>"Biaya Listrik"</label>
                        <Input value=costs.electricity placeholder="Rp" />
                        <label>"Biaya Elektronik"</label>
                        <Input value=costs.electronic placeholder="Rp" />
                        <label>"Biaya Replenishment"</label>
                        <Input value=costs.replenishment placeholder="Rp" />
                    </div>
                    <div class="wizard-total">"Total biaya: " {total_cost}</div>
                    <Show when=move || !costs_complete()>
                        <div class="wizard-hint">"Isi keempat biaya untuk menjalankan analisa."</div>
                    </Show>
                    <div class="wizard-actions">
                        <Button
                            appearance=ButtonAppearance::Primary
                            disabled=Signal::derive(move || {
                                analyzing.get() || !wizard.with(|w| w.can_analyze())
                            })
                            on_click=run_analysis
                        >
                            {move || if analyzing.get() { "Menganalisa..." } else { "Analisis" }}
                        </Button>
                    </div>
                </div>

                <div class="wizard-panel" style:display=panel_display(WizardTab::Branches)>
                    <NearbyList analysis=analysis to_rows=branch_rows />
                </div>
                <div class="wizard-panel" style:display=panel_display(WizardTab::CompetitorAtms)>
                    <NearbyList analysis=analysis to_rows=competitor_rows />
                </div>
                <div class="wizard-panel" style:display=panel_display(WizardTab::PublicPlaces)>
                    <PublicPlaces analysis=analysis />
                </div>
                <div class="wizard-panel" style:display=panel_display(WizardTab::Result)>
                    <div class="form-grid">
                        <label>"ATM yang direlokasi"</label>
                        <Select value=atm_choice>
                            <option value="">"(tidak ada)"</option>
                            {move || {
                                atms.get()
                                    .into_iter()
                                    .map(|a| {
                                        let label = format!("{} - {}", a.code, a.name);
                                        view! { <option value=a.id.to_string()>{label}</option> }
                                    })
                                    .collect_view()
                            }}
                        </Select>
                    </div>
                    <AnalysisSummary
                        analysis=analysis
                        notes=notes
                        saving=saving
                        on_save=on_save
                    />
                </div>
            </div>
        </PageFrame>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_costs() {
        let costs = parse_costs(["2.500.000", "300000", "", "Rp 150.000"]);
        assert_eq!(costs.rent_cost, Some(2_500_000.0));
        assert_eq!(costs.electricity_cost, Some(300_000.0));
        assert_eq!(costs.electronic_cost, None);
        assert_eq!(costs.replenishment_cost, Some(150_000.0));
        assert!(!costs.is_complete());
    }

    #[test]
    fn test_parse_atm_choice() {
        assert_eq!(parse_atm_choice(""), None);
        assert_eq!(parse_atm_choice("12"), Some(12));
        assert_eq!(parse_atm_choice("x"), None);
    }
}

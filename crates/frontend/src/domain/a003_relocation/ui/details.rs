use contracts::domain::a003_relocation::{Relocation, RelocationAction};
use leptos::prelude::*;
use leptos::task::spawn_local;
use thaw::*;

use super::StatusBadge;
use crate::domain::a003_relocation::api;
use crate::layout::toast_service::use_toast;
use crate::shared::components::confirm_dialog::ConfirmDialog;
use crate::shared::components::load_state::{ErrorBar, LoadingBlock};
use crate::shared::components::tier_badge::TierBadge;
use crate::shared::icons::icon;
use crate::shared::number_format::{format_opt_number, format_opt_rupiah};
use crate::shared::page_frame::{PageFrame, PageHeader};
use crate::shared::page_standard::PAGE_CAT_DETAIL;

fn action_appearance(action: RelocationAction) -> ButtonAppearance {
    match action {
        RelocationAction::Approve => ButtonAppearance::Primary,
        RelocationAction::Reject | RelocationAction::Cancel => ButtonAppearance::Secondary,
    }
}

#[component]
pub fn RelocationDetails(id: i64, on_close: Callback<()>) -> impl IntoView {
    let toast = use_toast();

    let relocation = RwSignal::new(None::<Relocation>);
    let loading = RwSignal::new(true);
    let error = RwSignal::new(None::<String>);

    let pending = RwSignal::new(None::<RelocationAction>);
    let confirm_open = RwSignal::new(false);
    let busy = RwSignal::new(false);

    let load = move || {
        loading.set(true);
        error.set(None);
        spawn_local(async move {
            match api::get_relocation(id).await {
                Ok(r) => relocation.set(Some(r)),
                Err(e) => {
                    log::error!("relocation {} load failed: {}", id, e);
                    error.set(Some(e.user_message()));
                }
            }
            loading.set(false);
        });
    };

    load();

    let ask = move |action: RelocationAction| {
        pending.set(Some(action));
        confirm_open.set(true);
    };

    let run_action = Callback::new(move |_| {
        let Some(action) = pending.get_untracked() else {
            return;
        };
        // Re-check against the state we are showing; a stale button must not fire.
        let allowed = relocation.with_untracked(|r| {
            r.as_ref().map(|r| r.status.can_apply(action)).unwrap_or(false)
        });
        if !allowed {
            log::warn!("{:?} not allowed for relocation {}", action, id);
            return;
        }
        busy.set(true);
        spawn_local(async move {
            match api::apply_action(id, action).await {
                Ok(ack) => {
                    toast.success(ack.message.unwrap_or_else(|| format!("Pengajuan {}", action.target().label().to_lowercase())));
                    relocation.update(|r| {
                        if let Some(r) = r {
                            if let Some(next) = r.status.apply(action) {
                                r.status = next;
                            }
                        }
                    });
                    load();
                }
                Err(e) => {
                    log::error!("{:?} relocation {} failed: {}", action, id, e);
                    toast.error(e.user_message());
                }
            }
            busy.set(false);
            pending.set(None);
        });
    });

    let confirm_title = Signal::derive(move || {
        pending.get().map(|a| a.label().to_string()).unwrap_or_default()
    });
    let confirm_message = Signal::derive(move || {
        pending.get().map(|a| a.confirm_text().to_string()).unwrap_or_default()
    });

    let actions = move || {
        let allowed = relocation.with(|r| r.as_ref().map(|r| r.status.allowed_actions()).unwrap_or_default());
        allowed
            .into_iter()
            .map(|action| view! {
                <Button
                    appearance=action_appearance(action)
                    disabled=busy
                    on_click=move |_| ask(action)
                >
                    {action.label()}
                </Button>
            })
            .collect_view()
    };

    let body = move || {
        relocation.get().map(|r| {
            let position = r
                .position()
                .map(|p| format!("{:.6}, {:.6}", p.lat, p.lng))
                .unwrap_or_else(|| "-".to_string());
            view! {
                <div class="detail-grid">
                    <div class="detail-grid__label">"ATM"</div>
                    <div>{r.atm_name.clone().unwrap_or_else(|| "-".to_string())}</div>
                    <div class="detail-grid__label">"Status"</div>
                    <div><StatusBadge status=r.status.clone() /></div>
                    <div class="detail-grid__label">"Alamat tujuan"</div>
                    <div>{r.address.clone().unwrap_or_else(|| "-".to_string())}</div>
                    <div class="detail-grid__label">"Koordinat"</div>
                    <div>{position}</div>
                    <div class="detail-grid__label">"Prediksi volume"</div>
                    <div>{format_opt_number(r.predicted_volume)}</div>
                    <div class="detail-grid__label">"Prediksi tier"</div>
                    <div><TierBadge tier=r.tier_prediction /></div>
                    <div class="detail-grid__label">"Biaya sewa"</div>
                    <div>{format_opt_rupiah(r.rent_cost)}</div>
                    <div class="detail-grid__label">"Biaya listrik"</div>
                    <div>{format_opt_rupiah(r.electricity_cost)}</div>
                    <div class="detail-grid__label">"Biaya elektronik"</div>
                    <div>{format_opt_rupiah(r.electronic_cost)}</div>
                    <div class="detail-grid__label">"Biaya replenishment"</div>
                    <div>{format_opt_rupiah(r.replenishment_cost)}</div>
                    <div class="detail-grid__label">"Diajukan oleh"</div>
                    <div>{r.created_by.clone().unwrap_or_else(|| "-".to_string())}</div>
                    <div class="detail-grid__label">"Tanggal"</div>
                    <div>{r.created_at_display()}</div>
                    <div class="detail-grid__label">"Catatan"</div>
                    <div>{r.notes.clone().unwrap_or_else(|| "-".to_string())}</div>
                </div>
            }
        })
    };

    view! {
        <PageFrame page_id="a003_relocation--detail" category=PAGE_CAT_DETAIL>
            <PageHeader title=format!("Pengajuan Relokasi #{}", id)>
                {actions}
                <Button appearance=ButtonAppearance::Subtle on_click=move |_| load()>
                    {icon("refresh")}
                </Button>
                <Button appearance=ButtonAppearance::Secondary on_click=move |_| on_close.run(())>
                    {icon("x")}
                    " Tutup"
                </Button>
            </PageHeader>
            <div class="page__content">
                <ErrorBar message=error />
                <Show when=move || !loading.get() fallback=|| view! { <LoadingBlock /> }>
                    {body}
                </Show>
            </div>

            <ConfirmDialog
                open=confirm_open
                title=confirm_title
                message=confirm_message
                busy=busy
                on_confirm=run_action
            />
        </PageFrame>
    }
}

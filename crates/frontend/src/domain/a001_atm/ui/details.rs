use contracts::domain::a001_atm::Atm;
use contracts::domain::a002_branch::Branch;
use leptos::prelude::*;
use leptos::task::spawn_local;
use thaw::*;

use crate::domain::a001_atm::api;
use crate::domain::a002_branch::api as branch_api;
use crate::shared::components::load_state::{ErrorBar, LoadingBlock};
use crate::shared::components::tier_badge::TierBadge;
use crate::shared::icons::icon;
use crate::shared::number_format::{format_opt_rupiah, format_rupiah};
use crate::shared::page_frame::{PageFrame, PageHeader};
use crate::shared::page_standard::PAGE_CAT_DETAIL;

fn coordinates_text(atm: &Atm) -> String {
    atm.position()
        .map(|p| format!("{:.6}, {:.6}", p.lat, p.lng))
        .unwrap_or_else(|| "-".to_string())
}

#[component]
pub fn AtmDetails(id: i64, on_close: Callback<()>) -> impl IntoView {
    let atm = RwSignal::new(None::<Atm>);
    let branch = RwSignal::new(None::<Branch>);
    let loading = RwSignal::new(true);
    let error = RwSignal::new(None::<String>);

    let load = move || {
        loading.set(true);
        error.set(None);
        spawn_local(async move {
            match api::get_atm(id).await {
                Ok(found) => {
                    let branch_id = found.effective_branch_id();
                    atm.set(Some(found));
                    if let Some(branch_id) = branch_id {
                        // Branch code is a nice-to-have; failures only get logged.
                        match branch_api::get_branch(branch_id).await {
                            Ok(b) => branch.set(Some(b)),
                            Err(e) => log::warn!("branch {} lookup failed: {}", branch_id, e),
                        }
                    }
                }
                Err(e) => {
                    log::error!("ATM {} load failed: {}", id, e);
                    error.set(Some(e.user_message()));
                }
            }
            loading.set(false);
        });
    };

    load();

    let info = move || {
        atm.get().map(|a| {
            let branch_label = branch
                .get()
                .map(|b| b.display_label())
                .unwrap_or_else(|| a.branch_name().to_string());
            let costs = a.costs.components();
            let total = a.costs.total();
            view! {
                <div class="detail-grid">
                    <div class="detail-grid__label">"Kode"</div>
                    <div>{a.code.clone()}</div>
                    <div class="detail-grid__label">"Nama"</div>
                    <div>{a.name.clone()}</div>
                    <div class="detail-grid__label">"Tipe"</div>
                    <div>{a.machine_type.map(|t| t.display_name()).unwrap_or("-")}</div>
                    <div class="detail-grid__label">"Merek"</div>
                    <div>{a.brand.clone().unwrap_or_else(|| "-".to_string())}</div>
                    <div class="detail-grid__label">"Cabang"</div>
                    <div>{branch_label}</div>
                    <div class="detail-grid__label">"Alamat"</div>
                    <div>{a.address.clone().unwrap_or_else(|| "-".to_string())}</div>
                    <div class="detail-grid__label">"Koordinat"</div>
                    <div>{coordinates_text(&a)}</div>
                    <div class="detail-grid__label">"Tier"</div>
                    <div><TierBadge tier=a.tier /></div>
                </div>

                <h3>"Biaya bulanan"</h3>
                <Table>
                    <TableBody>
                        {costs.into_iter().map(|(label, value)| view! {
                            <TableRow>
                                <TableCell>{label}</TableCell>
                                <TableCell class="cell-num">{format_opt_rupiah(value)}</TableCell>
                            </TableRow>
                        }).collect_view()}
                        <TableRow>
                            <TableCell><strong>"Total"</strong></TableCell>
                            <TableCell class="cell-num"><strong>{format_rupiah(total)}</strong></TableCell>
                        </TableRow>
                    </TableBody>
                </Table>
            }
        })
    };

    view! {
        <PageFrame page_id="a001_atm--detail" category=PAGE_CAT_DETAIL>
            <PageHeader title=format!("ATM #{}", id)>
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
                    {info}
                </Show>
            </div>
        </PageFrame>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_coordinates_text() {
        let atm = Atm {
            latitude: Some(-6.9147),
            longitude: Some(107.6098),
            ..Default::default()
        };
        assert_eq!(coordinates_text(&atm), "-6.914700, 107.609800");
        assert_eq!(coordinates_text(&Atm::default()), "-");
    }
}

use contracts::domain::a003_relocation::{Relocation, RelocationListQuery, RelocationStatus};
use contracts::shared::pagination::{clamp_page, paginate, total_pages};
use leptos::prelude::*;
use leptos::task::spawn_local;
use thaw::*;

use super::StatusBadge;
use crate::domain::a003_relocation::api;
use crate::layout::global_context::AppGlobalContext;
use crate::layout::tabs::detail_tab_label;
use crate::layout::tabs::tab_labels::relocation_detail_key;
use crate::shared::components::load_state::{EmptyState, ErrorBar, LoadingBlock};
use crate::shared::components::pagination_controls::PaginationControls;
use crate::shared::components::tier_badge::TierBadge;
use crate::shared::config::config;
use crate::shared::icons::icon;
use crate::shared::number_format::format_opt_number;
use crate::shared::page_frame::{PageFrame, PageHeader};
use crate::shared::page_standard::PAGE_CAT_LIST;
use crate::shared::request_seq::RequestSeq;

fn status_query(raw: &str) -> RelocationListQuery {
    RelocationListQuery {
        status: (!raw.is_empty()).then(|| raw.to_string()),
    }
}

/// ATM, address, predicted volume and submission time as shown in the list.
fn row_cells(r: &Relocation) -> [String; 4] {
    [
        r.atm_name.clone().unwrap_or_else(|| "-".to_string()),
        r.address.clone().unwrap_or_else(|| "-".to_string()),
        format_opt_number(r.predicted_volume),
        r.created_at_display(),
    ]
}

#[component]
pub fn RelocationList() -> impl IntoView {
    let tabs_store = use_context::<AppGlobalContext>().expect("AppGlobalContext not found");

    let status_filter = RwSignal::new(String::new());
    let items = RwSignal::new(Vec::<Relocation>::new());
    let loading = RwSignal::new(false);
    let error = RwSignal::new(None::<String>);
    let page = RwSignal::new(0usize);
    let seq = RequestSeq::new();
    let page_size = config().master_page_size;

    let load = move || {
        let query = status_query(&status_filter.get_untracked());
        let ticket = seq.next();
        loading.set(true);
        error.set(None);
        spawn_local(async move {
            let result = api::list_relocations(&query).await;
            if !seq.is_current(ticket) {
                return;
            }
            match result {
                Ok(list) => items.set(list),
                Err(e) if e.is_empty() => items.set(Vec::new()),
                Err(e) => {
                    log::error!("relocation list failed: {}", e);
                    items.set(Vec::new());
                    error.set(Some(e.user_message()));
                }
            }
            page.set(0);
            loading.set(false);
        });
    };

    Effect::new(move |_| {
        status_filter.track();
        load();
    });

    let pages = Signal::derive(move || items.with(|i| total_pages(i.len(), page_size)));

    let open_detail = move |r: &Relocation| {
        let name = r.atm_name.clone().unwrap_or_else(|| format!("#{}", r.id));
        tabs_store.open_tab(&relocation_detail_key(r.id), &detail_tab_label("Relokasi", &name));
    };

    view! {
        <PageFrame page_id="a003_relocation--list" category=PAGE_CAT_LIST>
            <PageHeader title="Pengajuan Relokasi">
                <Select value=status_filter>
                    <option value="">"Semua status"</option>
                    {RelocationStatus::known().into_iter().map(|s| view! {
                        <option value=s.as_str().to_string()>{s.label().to_string()}</option>
                    }).collect_view()}
                </Select>
                <Button appearance=ButtonAppearance::Subtle on_click=move |_| load()>
                    {icon("refresh")}
                </Button>
            </PageHeader>

            <div class="page__content">
                <ErrorBar message=error />
                {move || {
                    if loading.get() {
                        return view! { <LoadingBlock /> }.into_any();
                    }
                    let all = items.get();
                    if all.is_empty() {
                        return view! { <EmptyState /> }.into_any();
                    }
                    let current = clamp_page(page.get(), pages.get());
                    let rows = paginate(&all, current, page_size).to_vec();
                    view! {
                        <Table>
                            <TableHeader>
                                <TableRow>
                                    <TableHeaderCell>"ATM"</TableHeaderCell>
                                    <TableHeaderCell>"Alamat tujuan"</TableHeaderCell>
                                    <TableHeaderCell>"Prediksi volume"</TableHeaderCell>
                                    <TableHeaderCell>"Prediksi tier"</TableHeaderCell>
                                    <TableHeaderCell>"Status"</TableHeaderCell>
                                    <TableHeaderCell>"Diajukan"</TableHeaderCell>
                                </TableRow>
                            </TableHeader>
                            <TableBody>
                                {rows.into_iter().map(|r| {
                                    let [atm_name, address, volume, created] = row_cells(&r);
                                    let tier = r.tier_prediction;
                                    let status = r.status.clone();
                                    let row = StoredValue::new(r);
                                    view! {
                                        <TableRow
                                            attr:style="cursor: pointer;"
                                            on:click=move |_| row.with_value(|r| open_detail(r))
                                        >
                                            <TableCell>{atm_name}</TableCell>
                                            <TableCell>{address}</TableCell>
                                            <TableCell class="cell-num">{volume}</TableCell>
                                            <TableCell><TierBadge tier=tier /></TableCell>
                                            <TableCell><StatusBadge status=status /></TableCell>
                                            <TableCell>{created}</TableCell>
                                        </TableRow>
                                    }
                                }).collect_view()}
                            </TableBody>
                        </Table>
                    }.into_any()
                }}

                <PaginationControls
                    current_page=page
                    total_pages=pages
                    total_count=Signal::derive(move || items.with(|i| i.len()))
                    on_page_change=Callback::new(move |p: usize| page.set(p))
                />
            </div>
        </PageFrame>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_query() {
        assert_eq!(status_query("").to_query_string(), "");
        assert_eq!(status_query("approved").to_query_string(), "status=approved");
    }

    #[test]
    fn test_row_cells_fill_missing_values() {
        let r = Relocation {
            id: 9,
            address: Some("Jl. Asia Afrika".into()),
            ..Default::default()
        };
        let [atm_name, address, _, created] = row_cells(&r);
        assert_eq!(atm_name, "-");
        assert_eq!(address, "Jl. Asia Afrika");
        assert_eq!(created, r.created_at_display());
    }
}

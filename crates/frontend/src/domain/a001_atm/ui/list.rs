use contracts::domain::a001_atm::{Atm, AtmListQuery};
use contracts::domain::a002_branch::Branch;
use contracts::enums::MachineType;
use leptos::prelude::*;
use leptos::task::spawn_local;
use thaw::*;

use super::create::AtmCreateDialog;
use crate::domain::a001_atm::api;
use crate::domain::a002_branch::ui::picker::BranchPicker;
use crate::layout::global_context::AppGlobalContext;
use crate::layout::tabs::detail_tab_label;
use crate::layout::tabs::tab_labels::atm_detail_key;
use crate::layout::toast_service::use_toast;
use crate::shared::components::confirm_dialog::ConfirmDialog;
use crate::shared::components::load_state::{EmptyState, ErrorBar, LoadingBlock};
use crate::shared::components::pagination_controls::PaginationControls;
use crate::shared::components::tier_badge::TierBadge;
use crate::shared::config::MASTER_PAGE_SIZE;
use crate::shared::icons::icon;
use crate::shared::list_utils::SearchInput;
use crate::shared::page_frame::{PageFrame, PageHeader};
use crate::shared::page_standard::PAGE_CAT_LIST;
use crate::shared::request_seq::RequestSeq;

#[derive(Clone, Debug, PartialEq)]
pub struct AtmListState {
    /// 0-indexed; the wire is 1-based.
    pub page: usize,
    pub page_size: usize,
    pub search: String,
    pub machine_type: Option<MachineType>,
    pub branch_id: Option<i64>,
    pub total_count: usize,
    pub total_pages: usize,
}

impl Default for AtmListState {
    fn default() -> Self {
        Self {
            page: 0,
            page_size: MASTER_PAGE_SIZE,
            search: String::new(),
            machine_type: None,
            branch_id: None,
            total_count: 0,
            total_pages: 0,
        }
    }
}

impl AtmListState {
    pub fn query(&self) -> AtmListQuery {
        AtmListQuery {
            page: self.page + 1,
            limit: self.page_size,
            machine_type: self.machine_type,
            branch_id: self.branch_id,
            ..Default::default()
        }
        .with_search(&self.search)
    }
}

/// Code, name, type, branch and address as shown in the list.
fn row_cells(atm: &Atm) -> [String; 5] {
    [
        atm.code.clone(),
        atm.name.clone(),
        atm.machine_type.map(|t| t.code()).unwrap_or("-").to_string(),
        atm.branch_name().to_string(),
        atm.address.clone().unwrap_or_else(|| "-".to_string()),
    ]
}

#[component]
pub fn AtmList() -> impl IntoView {
    let tabs_store = use_context::<AppGlobalContext>().expect("AppGlobalContext not found");
    let toast = use_toast();

    let state = RwSignal::new(AtmListState::default());
    let items = RwSignal::new(Vec::<Atm>::new());
    let loading = RwSignal::new(false);
    let error = RwSignal::new(None::<String>);
    let seq = RequestSeq::new();

    let type_filter = RwSignal::new(String::new());
    let branch_filter = RwSignal::new(None::<Branch>);

    let create_open = RwSignal::new(false);
    let delete_open = RwSignal::new(false);
    let delete_target = RwSignal::new(None::<(i64, String)>);
    let deleting = RwSignal::new(false);

    let load = move || {
        let query = state.with_untracked(|s| s.query());
        let ticket = seq.next();
        loading.set(true);
        error.set(None);
        spawn_local(async move {
            let result = api::list_atms(&query).await;
            if !seq.is_current(ticket) {
                return;
            }
            match result {
                Ok(page) => {
                    let pages = page.total_pages(query.limit);
                    let count = page.total_count();
                    items.set(page.items);
                    state.update(|s| {
                        s.total_count = count;
                        s.total_pages = pages;
                    });
                }
                Err(e) if e.is_empty() => {
                    items.set(Vec::new());
                    state.update(|s| {
                        s.total_count = 0;
                        s.total_pages = 0;
                    });
                }
                Err(e) => {
                    log::error!("ATM list failed: {}", e);
                    items.set(Vec::new());
                    error.set(Some(e.user_message()));
                }
            }
            loading.set(false);
        });
    };

    // Any filter change goes back to the first page.
    let reset_and_load = move |f: &dyn Fn(&mut AtmListState)| {
        state.update(|s| {
            f(s);
            s.page = 0;
        });
        load();
    };

    Effect::new(move |prev: Option<()>| {
        let code = type_filter.get();
        if prev.is_some() {
            let parsed = MachineType::from_code(&code);
            reset_and_load(&move |s| s.machine_type = parsed);
        }
    });

    Effect::new(move |prev: Option<()>| {
        let branch_id = branch_filter.with(|b| b.as_ref().map(|b| b.id));
        if prev.is_some() {
            reset_and_load(&move |s| s.branch_id = branch_id);
        }
    });

    load();

    let open_detail = move |atm: &Atm| {
        let label = if atm.code.is_empty() { atm.id.to_string() } else { atm.code.clone() };
        tabs_store.open_tab(&atm_detail_key(atm.id), &detail_tab_label("ATM", &label));
    };

    let confirm_delete = Callback::new(move |_| {
        let Some((id, code)) = delete_target.get_untracked() else {
            return;
        };
        deleting.set(true);
        spawn_local(async move {
            match api::delete_atm(id).await {
                Ok(ack) => {
                    toast.success(ack.message.unwrap_or_else(|| format!("ATM {} dihapus", code)));
                    delete_open.set(false);
                    tabs_store.close_tab(&atm_detail_key(id));
                    load();
                }
                Err(e) => {
                    log::error!("delete ATM {} failed: {}", id, e);
                    toast.error(e.user_message());
                }
            }
            deleting.set(false);
        });
    });

    let delete_message = Signal::derive(move || {
        delete_target
            .get()
            .map(|(_, code)| format!("Hapus ATM {}? Data yang dihapus tidak dapat dikembalikan.", code))
            .unwrap_or_default()
    });

    view! {
        <PageFrame page_id="a001_atm--list" category=PAGE_CAT_LIST>
            <PageHeader title="Master ATM">
                <Button appearance=ButtonAppearance::Primary on_click=move |_| create_open.set(true)>
                    {icon("plus")}
                    " Tambah ATM"
                </Button>
                <Button appearance=ButtonAppearance::Subtle on_click=move |_| load()>
                    {icon("refresh")}
                </Button>
            </PageHeader>

            <div class="page__content">
                <div class="filter-bar">
                    <SearchInput
                        placeholder="Cari kode, nama atau alamat..."
                        on_change=Callback::new(move |v: String| reset_and_load(&move |s| s.search = v.clone()))
                    />
                    <Select value=type_filter>
                        <option value="">"Semua tipe"</option>
                        {MachineType::all().into_iter().map(|t| view! {
                            <option value=t.code()>{t.display_name()}</option>
                        }).collect_view()}
                    </Select>
                    <BranchPicker selected=branch_filter placeholder="Filter cabang..." />
                </div>

                <ErrorBar message=error />

                {move || {
                    if loading.get() && items.with(|i| i.is_empty()) {
                        return view! { <LoadingBlock /> }.into_any();
                    }
                    let rows = items.get();
                    if rows.is_empty() {
                        return view! { <EmptyState /> }.into_any();
                    }
                    view! {
                        <Table>
                            <TableHeader>
                                <TableRow>
                                    <TableHeaderCell>"Kode"</TableHeaderCell>
                                    <TableHeaderCell>"Nama"</TableHeaderCell>
                                    <TableHeaderCell>"Tipe"</TableHeaderCell>
                                    <TableHeaderCell>"Cabang"</TableHeaderCell>
                                    <TableHeaderCell>"Alamat"</TableHeaderCell>
                                    <TableHeaderCell>"Tier"</TableHeaderCell>
                                    <TableHeaderCell>""</TableHeaderCell>
                                </TableRow>
                            </TableHeader>
                            <TableBody>
                                {rows.into_iter().map(|atm| {
                                    let target = (atm.id, atm.code.clone());
                                    let [code, name, kind, branch, address] = row_cells(&atm);
                                    let tier = atm.tier;
                                    let row = StoredValue::new(atm);
                                    view! {
                                        <TableRow
                                            attr:style="cursor: pointer;"
                                            on:click=move |_| row.with_value(|a| open_detail(a))
                                        >
                                            <TableCell>{code}</TableCell>
                                            <TableCell>{name}</TableCell>
                                            <TableCell>{kind}</TableCell>
                                            <TableCell>{branch}</TableCell>
                                            <TableCell>{address}</TableCell>
                                            <TableCell><TierBadge tier=tier /></TableCell>
                                            <TableCell>
                                                <button
                                                    class="icon-button icon-button--danger"
                                                    title="Hapus"
                                                    on:click=move |ev| {
                                                        ev.stop_propagation();
                                                        delete_target.set(Some(target.clone()));
                                                        delete_open.set(true);
                                                    }
                                                >
                                                    {icon("delete")}
                                                </button>
                                            </TableCell>
                                        </TableRow>
                                    }
                                }).collect_view()}
                            </TableBody>
                        </Table>
                    }.into_any()
                }}

                <PaginationControls
                    current_page=Signal::derive(move || state.with(|s| s.page))
                    total_pages=Signal::derive(move || state.with(|s| s.total_pages))
                    total_count=Signal::derive(move || state.with(|s| s.total_count))
                    on_page_change=Callback::new(move |page: usize| {
                        state.update(|s| s.page = page);
                        load();
                    })
                    page_size=Signal::derive(move || state.with(|s| s.page_size))
                    on_page_size_change=Callback::new(move |size: usize| reset_and_load(&move |s| s.page_size = size))
                />
            </div>

            <AtmCreateDialog
                open=create_open
                on_created=Callback::new(move |_| {
                    state.update(|s| s.page = 0);
                    load();
                })
            />

            <ConfirmDialog
                open=delete_open
                title=Signal::derive(|| "Hapus ATM".to_string())
                message=delete_message
                confirm_label="Hapus"
                busy=deleting
                on_confirm=confirm_delete
            />
        </PageFrame>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_query_is_one_based() {
        let state = AtmListState {
            page: 2,
            page_size: 10,
            search: "  braga ".into(),
            machine_type: Some(MachineType::Crm),
            branch_id: Some(6),
            ..Default::default()
        };
        let q = state.query();
        assert_eq!(q.page, 3);
        assert_eq!(q.search.as_deref(), Some("braga"));
        assert_eq!(
            q.to_query_string(),
            "page=3&limit=10&search=braga&type=CRM&branch_id=6"
        );
    }

    #[test]
    fn test_row_cells_fill_missing_values() {
        let atm = Atm {
            id: 4,
            code: "ATM-004".into(),
            name: "Braga".into(),
            machine_type: Some(MachineType::Crm),
            ..Default::default()
        };
        assert_eq!(
            row_cells(&atm),
            [
                "ATM-004".to_string(),
                "Braga".to_string(),
                "CRM".to_string(),
                atm.branch_name().to_string(),
                "-".to_string(),
            ]
        );
    }

    #[test]
    fn test_default_first_page() {
        let q = AtmListState::default().query();
        assert_eq!(q.page, 1);
        assert_eq!(q.limit, MASTER_PAGE_SIZE);
        assert_eq!(q.search, None);
    }
}

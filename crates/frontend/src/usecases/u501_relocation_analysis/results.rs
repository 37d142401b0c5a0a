//! Output tabs of the wizard: nearby lists, public places and the score.

use contracts::shared::api_error::ApiError;
use contracts::shared::geo::format_distance;
use contracts::shared::pagination::{clamp_page, paginate, total_pages};
use contracts::system::maps::PlaceDetails;
use contracts::usecases::u501_relocation_analysis::{
    AnalysisResult, NearbyPoint, PlaceGroup,
};
use leptos::prelude::*;
use leptos::task::spawn_local;
use thaw::*;

use crate::shared::components::load_state::{EmptyState, ErrorBar, LoadingBlock};
use crate::shared::components::pagination_controls::PaginationControls;
use crate::shared::components::tier_badge::TierBadge;
use crate::shared::config::config;
use crate::shared::number_format::{format_decimal, format_opt_number};
use crate::shared::request_seq::RequestSeq;
use crate::system::maps::api as maps_api;

#[derive(Debug, Clone, PartialEq)]
pub struct ResultRow {
    pub title: String,
    pub subtitle: String,
    pub distance: String,
    pub place_id: Option<String>,
}

fn row(title: &str, extra: &str, address: Option<&str>, distance: Option<f64>) -> ResultRow {
    let subtitle = [extra, address.unwrap_or_default()]
        .into_iter()
        .filter(|s| !s.trim().is_empty())
        .collect::<Vec<_>>()
        .join(" · ");
    ResultRow {
        title: if title.trim().is_empty() { "-".to_string() } else { title.to_string() },
        subtitle,
        distance: format_distance(distance),
        place_id: None,
    }
}

pub fn branch_rows(analysis: &AnalysisResult) -> Vec<ResultRow> {
    let origin = analysis.origin();
    analysis
        .response
        .nearby_branches
        .iter()
        .map(|b| row(&b.name, &b.kind, b.address.as_deref(), b.distance_km(origin)))
        .collect()
}

pub fn competitor_rows(analysis: &AnalysisResult) -> Vec<ResultRow> {
    let origin = analysis.origin();
    analysis
        .response
        .competitor_atms
        .iter()
        .map(|c| row(&c.name, &c.bank, c.address.as_deref(), c.distance_km(origin)))
        .collect()
}

pub fn place_rows(group: &PlaceGroup, analysis: &AnalysisResult) -> Vec<ResultRow> {
    let origin = analysis.origin();
    group
        .places
        .iter()
        .map(|p| ResultRow {
            place_id: p.place_id.clone(),
            ..row(&p.name, &p.category, p.address.as_deref(), p.distance_km(origin))
        })
        .collect()
}

/// One list paged at the fixed relocation page size.
#[component]
pub fn ResultTable(
    #[prop(into)] rows: Signal<Vec<ResultRow>>,
    #[prop(optional)] on_select: Option<Callback<String>>,
) -> impl IntoView {
    let page_size = config().relocation_page_size;
    let page = RwSignal::new(0usize);
    let pages = Memo::new(move |_| rows.with(|r| total_pages(r.len(), page_size)));

    Effect::new(move |_| {
        let pages = pages.get();
        page.update(|p| *p = clamp_page(*p, pages));
    });

    let visible = move || {
        rows.with(|r| paginate(r, page.get(), page_size).to_vec())
    };

    view! {
        <Show
            when=move || rows.with(|r| !r.is_empty())
            fallback=|| view! { <EmptyState /> }
        >
            <Table>
                <TableHeader>
                    <TableRow>
                        <TableHeaderCell>"Nama"</TableHeaderCell>
                        <TableHeaderCell>"Keterangan"</TableHeaderCell>
                        <TableHeaderCell>"Jarak"</TableHeaderCell>
                    </TableRow>
                </TableHeader>
                <TableBody>
                    {move || {
                        visible()
                            .into_iter()
                            .map(|r| {
                                let place_id = r.place_id.clone();
                                let clickable = on_select.is_some() && place_id.is_some();
                                view! {
                                    <TableRow
                                        attr:style={if clickable { "cursor: pointer;" } else { "" }}
                                        on:click=move |_| {
                                            if let (Some(cb), Some(id)) = (on_select, place_id.clone()) {
                                                cb.run(id);
                                            }
                                        }
                                    >
                                        <TableCell>{r.title}</TableCell>
                                        <TableCell>{r.subtitle}</TableCell>
                                        <TableCell class="num">{r.distance}</TableCell>
                                    </TableRow>
                                }
                            })
                            .collect_view()
                    }}
                </TableBody>
            </Table>
            <PaginationControls
                current_page=page
                total_pages=pages
                total_count=Signal::derive(move || rows.with(|r| r.len()))
                on_page_change=Callback::new(move |p| page.set(p))
            />
        </Show>
    }
}

/// "KCP/ATM BJB" and "ATM Bank Lain" tabs.
#[component]
pub fn NearbyList(
    analysis: Memo<Option<AnalysisResult>>,
    to_rows: fn(&AnalysisResult) -> Vec<ResultRow>,
) -> impl IntoView {
    let rows = Signal::derive(move || {
        analysis.with(|a| a.as_ref().map(to_rows).unwrap_or_default())
    });
    view! { <ResultTable rows=rows /> }
}

fn details_error(err: &ApiError) -> String {
    if err.is_empty() {
        "Detail lokasi tidak tersedia".to_string()
    } else {
        err.user_message()
    }
}

/// "Lokasi Umum" tab: one paged table per category, details on click.
#[component]
pub fn PublicPlaces(analysis: Memo<Option<AnalysisResult>>) -> impl IntoView {
    let details = RwSignal::new(None::<PlaceDetails>);
    let details_loading = RwSignal::new(false);
    let details_error_text = RwSignal::new(None::<String>);
    let seq = RequestSeq::new();

    let on_select = Callback::new(move |place_id: String| {
        let ticket = seq.next();
        details_loading.set(true);
        details_error_text.set(None);
        spawn_local(async move {
            let result = maps_api::place_details(&place_id).await;
            if !seq.is_current(ticket) {
                return;
            }
            match result {
                Ok(d) => details.set(Some(d)),
                Err(e) => {
                    log::warn!("place details {} failed: {}", place_id, e);
                    details.set(None);
                    details_error_text.set(Some(details_error(&e)));
                }
            }
            details_loading.set(false);
        });
    });

    let groups = move || analysis.with(|a| a.as_ref().map(|a| a.place_groups.len()).unwrap_or(0));

    view! {
        <Show when=move || { groups() > 0 } fallback=|| view! { <EmptyState /> }>
            {move || {
                analysis.get().map(|a| {
                    a.place_groups
                        .iter()
                        .map(|g| {
                            let title = format!("{} ({})", g.category.label(), g.places.len());
                            let rows = place_rows(g, &a);
                            view! {
                                <section class="place-group">
                                    <h3 class="place-group__title">{title}</h3>
                                    <ResultTable rows=Signal::stored(rows) on_select=on_select />
                                </section>
                            }
                        })
                        .collect_view()
                })
            }}
        </Show>
        <ErrorBar message=details_error_text />
        <Show when=move || details_loading.get()>
            <LoadingBlock label="Memuat detail lokasi..." />
        </Show>
        {move || details.get().map(|d| view! {
            <div class="place-details">
                <div class="place-details__head">
                    <strong>{d.name.clone()}</strong>
                    <Button appearance=ButtonAppearance::Subtle on_click=move |_| details.set(None)>"×"</Button>
                </div>
                <div>{d.address.clone().unwrap_or_default()}</div>
                {d.phone.clone().map(|p| view! { <div>"Telp: " {p}</div> })}
                {d.rating.map(|r| view! { <div>"Rating: " {format_decimal(r, 1)}</div> })}
                <div class="place-details__types">{d.types.join(", ")}</div>
            </div>
        })}
    }
}

/// "Hasil Analisa" tab.
#[component]
pub fn AnalysisSummary(
    analysis: Memo<Option<AnalysisResult>>,
    notes: RwSignal<String>,
    #[prop(into)] saving: Signal<bool>,
    on_save: Callback<()>,
) -> impl IntoView {
    move || {
        analysis.get().map(|a| {
            let breakdown = a.response.score_breakdown.clone().unwrap_or_default();
            let total = format_decimal(breakdown.total(), 2);
            let entries = breakdown.entries();
            let address = a
                .response
                .address
                .clone()
                .or_else(|| a.request.address.clone())
                .unwrap_or_else(|| "-".to_string());
            view! {
                <div class="analysis-summary">
                    <div class="analysis-summary__address">{address}</div>
                    <div class="analysis-summary__tiers">
                        <div>
                            <span class="analysis-summary__label">"Prediksi volume"</span>
                            <strong>{format_opt_number(a.response.predicted_volume)}</strong>
                        </div>
                        <div>
                            <span class="analysis-summary__label">"Tier (server)"</span>
                            <TierBadge tier=a.response.tier_prediction />
                        </div>
                        <div>
                            <span class="analysis-summary__label">"Tier (perkiraan)"</span>
                            <TierBadge tier=a.heuristic_tier />
                        </div>
                    </div>
                    <Table>
                        <TableHeader>
                            <TableRow>
                                <TableHeaderCell>"Faktor"</TableHeaderCell>
                                <TableHeaderCell>"Skor"</TableHeaderCell>
                            </TableRow>
                        </TableHeader>
                        <TableBody>
                            {entries
                                .into_iter()
                                .map(|(label, v)| view! {
                                    <TableRow>
                                        <TableCell>{label}</TableCell>
                                        <TableCell class="num">{format_decimal(v, 2)}</TableCell>
                                    </TableRow>
                                })
                                .collect_view()}
                            <TableRow>
                                <TableCell><strong>"Total"</strong></TableCell>
                                <TableCell class="num"><strong>{total}</strong></TableCell>
                            </TableRow>
                        </TableBody>
                    </Table>
                    <div class="analysis-summary__notes">
                        <label>"Catatan"</label>
                        <Textarea value=notes placeholder="Catatan pengajuan (opsional)" attr:rows=3 />
                    </div>
                    <Button
                        appearance=ButtonAppearance::Primary
                        disabled=Signal::derive(move || saving.get())
                        on_click=move |_| on_save.run(())
                    >
                        {move || if saving.get() { "Menyimpan..." } else { "Simpan Pengajuan" }}
                    </Button>
                </div>
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use contracts::usecases::u501_relocation_analysis::{
        AnalyzeRelocationRequest, AnalyzeRelocationResponse, CompetitorAtm, NearbyBranch,
        PublicPlace,
    };

    fn analysis() -> AnalysisResult {
        let request = AnalyzeRelocationRequest {
            latitude: -6.9,
            longitude: 107.6,
            address: None,
            rent_cost: 1.0,
            electricity_cost: 1.0,
            electronic_cost: 1.0,
            replenishment_cost: 1.0,
        };
        let response = AnalyzeRelocationResponse {
            nearby_branches: vec![
                NearbyBranch {
                    name: "KCP Jauh".into(),
                    kind: "KCP".into(),
                    distance: Some(2.5),
                    ..Default::default()
                },
                NearbyBranch {
                    name: "KC Dekat".into(),
                    kind: "KC".into(),
                    address: Some("Jl. Braga".into()),
                    distance: Some(0.3),
                    ..Default::default()
                },
            ],
            competitor_atms: vec![CompetitorAtm {
                name: "".into(),
                bank: "Bank Lain".into(),
                ..Default::default()
            }],
            public_places: vec![PublicPlace {
                place_id: Some("abc".into()),
                name: "Pasar Kosambi".into(),
                category: "market".into(),
                distance: Some(0.1),
                ..Default::default()
            }],
            ..Default::default()
        };
        AnalysisResult::new(request, response)
    }

    #[test]
    fn test_branch_rows_sorted_and_formatted() {
        let rows = branch_rows(&analysis());
        assert_eq!(rows[0].title, "KC Dekat");
        assert_eq!(rows[0].subtitle, "KC · Jl. Braga");
        assert_eq!(rows[0].distance, "300 m");
        assert_eq!(rows[1].distance, "2.50 km");
    }

    #[test]
    fn test_competitor_without_name_or_distance() {
        let rows = competitor_rows(&analysis());
        assert_eq!(rows[0].title, "-");
        assert_eq!(rows[0].distance, "N/A");
    }

    #[test]
    fn test_place_rows_keep_place_id() {
        let a = analysis();
        let rows = place_rows(&a.place_groups[0], &a);
        assert_eq!(rows[0].place_id.as_deref(), Some("abc"));
    }
}

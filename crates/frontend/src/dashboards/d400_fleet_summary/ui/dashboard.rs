use contracts::dashboards::d400_fleet_summary::{
    normalize_distribution, rank_leaderboard, DashboardQuery, LeaderboardEntry,
    PerformanceTrendPoint, PeriodSummary, TierDistributionEntry,
};
use contracts::enums::Period;
use leptos::prelude::*;
use thaw::*;

use super::widget::WidgetState;
use crate::dashboards::d400_fleet_summary::api;
use crate::shared::components::bar_chart::{BarChart, ChartBar};
use crate::shared::components::line_chart::{ChartPoint, LineChart};
use crate::shared::components::load_state::{EmptyState, ErrorBar, LoadingBlock};
use crate::shared::components::period_select::PeriodSelect;
use crate::shared::components::stat_card::StatCard;
use crate::shared::components::tier_badge::TierBadge;
use crate::shared::number_format::{format_compact, format_number, format_rupiah};
use crate::shared::page_frame::{PageFrame, PageHeader};
use crate::shared::page_standard::PAGE_CAT_DASHBOARD;

const LEADERBOARD_SIZE: usize = 10;

fn distribution_bars(entries: &[TierDistributionEntry]) -> Vec<ChartBar> {
    normalize_distribution(entries)
        .into_iter()
        .map(|e| ChartBar {
            label: e.label().to_string(),
            value: e.count,
            color: contracts::enums::tier::tier_style_of(e.tier).color.to_string(),
        })
        .collect()
}

fn trend_points(points: &[PerformanceTrendPoint]) -> Vec<ChartPoint> {
    points
        .iter()
        .map(|p| ChartPoint {
            label: p.axis_label(),
            value: p.volume_trx,
        })
        .collect()
}

/// Fleet overview: four widgets that load and fail independently.
#[component]
pub fn FleetSummaryDashboard() -> impl IntoView {
    let period = RwSignal::new(Period::Q1);

    let summary = WidgetState::<PeriodSummary>::new();
    let distribution = WidgetState::<Vec<TierDistributionEntry>>::new();
    let trends = WidgetState::<Vec<PerformanceTrendPoint>>::new();
    let leaderboard = WidgetState::<Vec<LeaderboardEntry>>::new();

    let reload = move || {
        let query = DashboardQuery::new(period.get_untracked());
        log::debug!("fleet summary reload for period {}", query.period_id);
        let q = query.clone();
        summary.load("summary-by-period", async move { api::get_summary(&q).await });
        let q = query.clone();
        distribution.load("tier-distribution", async move { api::get_tier_distribution(&q).await });
        let q = query.clone();
        trends.load("performance-trends", async move { api::get_performance_trends(&q).await });
        leaderboard.load("atms-leaderboard", async move { api::get_leaderboard(&query).await });
    };

    Effect::new(move |_| {
        period.track();
        reload();
    });

    let summary_value = move |f: fn(&PeriodSummary) -> String| {
        Signal::derive(move || summary.data.with(|s| s.as_ref().map(f)))
    };

    let bars = Signal::derive(move || {
        distribution
            .data
            .with(|d| d.as_deref().map(distribution_bars).unwrap_or_default())
    });
    let points = Signal::derive(move || {
        trends
            .data
            .with(|d| d.as_deref().map(trend_points).unwrap_or_default())
    });
    let ranked = Signal::derive(move || {
        leaderboard.data.with(|d| {
            d.clone()
                .map(rank_leaderboard)
                .unwrap_or_default()
                .into_iter()
                .take(LEADERBOARD_SIZE)
                .collect::<Vec<_>>()
        })
    });

    view! {
        <PageFrame page_id="d400_fleet_summary--dashboard" category=PAGE_CAT_DASHBOARD>
            <PageHeader title="Dashboard">
                <PeriodSelect period=period />
                <Button appearance=ButtonAppearance::Subtle on_click=move |_| reload()>
                    {crate::shared::icons::icon("refresh")}
                    " Muat ulang"
                </Button>
            </PageHeader>

            <div class="page__content">
                <section class="dashboard__stats">
                    <ErrorBar message=summary.error />
                    <div class="stat-grid">
                        <StatCard
                            label="Jumlah ATM"
                            icon_name="atm"
                            value=summary_value(|s| format_number(s.total_atms))
                            loading=summary.loading
                        />
                        <StatCard
                            label="Volume Transaksi"
                            icon_name="trending-up"
                            value=summary_value(|s| format_number(s.total_volume_trx))
                            subtitle=summary_value(|s| format!("Rata-rata {} / ATM", format_number(s.average_volume())))
                            loading=summary.loading
                        />
                        <StatCard
                            label="Nominal Transaksi"
                            icon_name="cash"
                            value=summary_value(|s| format_compact(s.total_nominal_trx))
                            loading=summary.loading
                        />
                        <StatCard
                            label="Fee"
                            icon_name="bar-chart"
                            value=summary_value(|s| format_rupiah(s.total_fee))
                            loading=summary.loading
                        />
                    </div>
                </section>

                <div class="dashboard__charts">
                    <section class="dashboard__widget">
                        <h3>"Distribusi Tier"</h3>
                        <ErrorBar message=distribution.error />
                        {move || {
                            if distribution.loading.get() {
                                view! { <LoadingBlock /> }.into_any()
                            } else if distribution.data.with(|d| d.is_none()) {
                                view! { <EmptyState /> }.into_any()
                            } else {
                                view! { <BarChart bars=bars /> }.into_any()
                            }
                        }}
                    </section>

                    <section class="dashboard__widget">
                        <h3>"Tren Performa"</h3>
                        <ErrorBar message=trends.error />
                        {move || {
                            if trends.loading.get() {
                                view! { <LoadingBlock /> }.into_any()
                            } else if points.with(|p| p.is_empty()) {
                                view! { <EmptyState /> }.into_any()
                            } else {
                                view! { <LineChart points=points /> }.into_any()
                            }
                        }}
                    </section>
                </div>

                <section class="dashboard__widget">
                    <h3>"Peringkat ATM"</h3>
                    <ErrorBar message=leaderboard.error />
                    {move || {
                        if leaderboard.loading.get() {
                            return view! { <LoadingBlock /> }.into_any();
                        }
                        let rows = ranked.get();
                        if rows.is_empty() {
                            return view! { <EmptyState /> }.into_any();
                        }
                        view! {
                            <Table>
                                <TableHeader>
                                    <TableRow>
                                        <TableHeaderCell>"#"</TableHeaderCell>
                                        <TableHeaderCell>"ATM"</TableHeaderCell>
                                        <TableHeaderCell>"Cabang"</TableHeaderCell>
                                        <TableHeaderCell>"Volume"</TableHeaderCell>
                                        <TableHeaderCell>"Fee"</TableHeaderCell>
                                        <TableHeaderCell>"Tier"</TableHeaderCell>
                                    </TableRow>
                                </TableHeader>
                                <TableBody>
                                    {rows.into_iter().enumerate().map(|(i, row)| view! {
                                        <TableRow>
                                            <TableCell>{i + 1}</TableCell>
                                            <TableCell>
                                                <div class="cell-title">{row.name.clone()}</div>
                                                <div class="cell-sub">{row.code.clone()}</div>
                                            </TableCell>
                                            <TableCell>{row.branch_name.clone()}</TableCell>
                                            <TableCell class="cell-num">{format_number(row.volume_trx)}</TableCell>
                                            <TableCell class="cell-num">{format_rupiah(row.fee)}</TableCell>
                                            <TableCell><TierBadge tier=row.tier /></TableCell>
                                        </TableRow>
                                    }).collect_view()}
                                </TableBody>
                            </Table>
                        }.into_any()
                    }}
                </section>
            </div>
        </PageFrame>
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use contracts::enums::Tier;

    #[test]
    fn test_distribution_bars_cover_every_tier() {
        let raw = vec![TierDistributionEntry {
            tier: Tier::new(1),
            count: 4.0,
        }];
        let bars = distribution_bars(&raw);
        assert_eq!(bars.len(), 5);
        assert_eq!(bars[1].label, "TIER 1");
        assert_eq!(bars[1].value, 4.0);
        assert_eq!(bars[1].color, Tier::clamped(1).style().color);
    }

    #[test]
    fn test_trend_points_use_axis_label() {
        let raw = vec![PerformanceTrendPoint {
            period_id: Some(2),
            volume_trx: 120.0,
            ..Default::default()
        }];
        let points = trend_points(&raw);
        assert_eq!(points[0].label, "Q2");
        assert_eq!(points[0].value, 120.0);
    }
}

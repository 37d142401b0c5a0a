//! Line chart drawn as inline SVG.

use leptos::prelude::*;

use crate::shared::number_format::{format_compact, format_number};

const WIDTH: f64 = 520.0;
const HEIGHT: f64 = 240.0;
const PAD_LEFT: f64 = 48.0;
const PAD_RIGHT: f64 = 16.0;
const PAD_TOP: f64 = 16.0;
const PAD_BOTTOM: f64 = 32.0;

#[derive(Debug, Clone, PartialEq)]
pub struct ChartPoint {
    pub label: String,
    pub value: f64,
}

/// Plot coordinates of each value. The y range spans 0..=max; a single
/// point sits in the middle horizontally.
pub fn line_points(values: &[f64], width: f64, height: f64) -> Vec<(f64, f64)> {
    let max = values
        .iter()
        .copied()
        .filter(|v| v.is_finite())
        .fold(0.0_f64, f64::max);
    let step = if values.len() > 1 {
        width / (values.len() - 1) as f64
    } else {
        0.0
    };
    values
        .iter()
        .enumerate()
        .map(|(i, v)| {
            let v = if v.is_finite() { v.max(0.0) } else { 0.0 };
            let x = if values.len() == 1 { width / 2.0 } else { i as f64 * step };
            let y = if max > 0.0 { height - v / max * height } else { height };
            (x, y)
        })
        .collect()
}

/// SVG path `d` attribute through the points.
pub fn path_data(points: &[(f64, f64)]) -> String {
    points
        .iter()
        .enumerate()
        .map(|(i, (x, y))| format!("{}{:.1},{:.1}", if i == 0 { "M" } else { " L" }, x, y))
        .collect()
}

#[component]
pub fn LineChart(
    #[prop(into)] points: Signal<Vec<ChartPoint>>,
    #[prop(optional)] color: Option<&'static str>,
) -> impl IntoView {
    let color = color.unwrap_or("#2563eb");
    let plot_w = WIDTH - PAD_LEFT - PAD_RIGHT;
    let plot_h = HEIGHT - PAD_TOP - PAD_BOTTOM;

    view! {
        <svg class="chart chart--line" viewBox={format!("0 0 {} {}", WIDTH, HEIGHT)} preserveAspectRatio="xMidYMid meet">
            {move || {
                let data = points.get();
                let values: Vec<f64> = data.iter().map(|p| p.value).collect();
                let max = values.iter().copied().filter(|v| v.is_finite()).fold(0.0_f64, f64::max);
                let coords: Vec<(f64, f64)> = line_points(&values, plot_w, plot_h)
                    .into_iter()
                    .map(|(x, y)| (PAD_LEFT + x, PAD_TOP + y))
                    .collect();
                let d = path_data(&coords);

                view! {
                    <line x1=PAD_LEFT y1=PAD_TOP x2=PAD_LEFT y2={PAD_TOP + plot_h} class="chart__axis" />
                    <line x1=PAD_LEFT y1={PAD_TOP + plot_h} x2={PAD_LEFT + plot_w} y2={PAD_TOP + plot_h} class="chart__axis" />
                    <text x={PAD_LEFT - 6.0} y={PAD_TOP + 4.0} text-anchor="end" class="chart__label">
                        {format_compact(max)}
                    </text>
                    <text x={PAD_LEFT - 6.0} y={PAD_TOP + plot_h} text-anchor="end" class="chart__label">"0"</text>
                    <path d=d fill="none" stroke=color stroke-width="2" />
                    {coords.into_iter().zip(data).map(|((x, y), p)| view! {
                        <g class="chart__point">
                            <circle cx=x cy=y r="4" fill=color>
                                <title>{format!("{}: {}", p.label, format_number(p.value))}</title>
                            </circle>
                            <text x=x y={HEIGHT - 10.0} text-anchor="middle" class="chart__label">{p.label}</text>
                        </g>
                    }).collect_view()}
                }
            }}
        </svg>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_points_span_plot() {
        let pts = line_points(&[0.0, 50.0, 100.0], 200.0, 100.0);
        assert_eq!(pts, vec![(0.0, 100.0), (100.0, 50.0), (200.0, 0.0)]);
    }

    #[test]
    fn test_single_point_centered() {
        assert_eq!(line_points(&[7.0], 200.0, 100.0), vec![(100.0, 0.0)]);
    }

    #[test]
    fn test_path_data() {
        assert_eq!(path_data(&[(0.0, 10.0), (5.5, 2.0)]), "M0.0,10.0 L5.5,2.0");
        assert_eq!(path_data(&[]), "");
    }
}

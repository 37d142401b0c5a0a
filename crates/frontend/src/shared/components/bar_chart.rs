//! Vertical bar chart drawn as inline SVG.

use leptos::prelude::*;

use crate::shared::number_format::{format_compact, format_number};

const WIDTH: f64 = 480.0;
const HEIGHT: f64 = 240.0;
const PAD_TOP: f64 = 20.0;
const PAD_BOTTOM: f64 = 32.0;
const PAD_SIDE: f64 = 16.0;

#[derive(Debug, Clone, PartialEq)]
pub struct ChartBar {
    pub label: String,
    pub value: f64,
    pub color: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct BarRect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

/// Bars share the plot width evenly; the tallest value fills the plot height.
/// Negative and non-finite values are drawn as zero.
pub fn bar_layout(values: &[f64], width: f64, height: f64) -> Vec<BarRect> {
    if values.is_empty() {
        return Vec::new();
    }
    let max = values
        .iter()
        .copied()
        .filter(|v| v.is_finite())
        .fold(0.0_f64, f64::max);
    let slot = width / values.len() as f64;
    let bar_width = slot * 0.6;
    values
        .iter()
        .enumerate()
        .map(|(i, v)| {
            let v = if v.is_finite() { v.max(0.0) } else { 0.0 };
            let h = if max > 0.0 { v / max * height } else { 0.0 };
            BarRect {
                x: i as f64 * slot + (slot - bar_width) / 2.0,
                y: height - h,
                width: bar_width,
                height: h,
            }
        })
        .collect()
}

#[component]
pub fn BarChart(#[prop(into)] bars: Signal<Vec<ChartBar>>) -> impl IntoView {
    let plot_w = WIDTH - PAD_SIDE * 2.0;
    let plot_h = HEIGHT - PAD_TOP - PAD_BOTTOM;

    view! {
        <svg class="chart chart--bar" viewBox={format!("0 0 {} {}", WIDTH, HEIGHT)} preserveAspectRatio="xMidYMid meet">
            <line
                x1=PAD_SIDE y1={PAD_TOP + plot_h}
                x2={PAD_SIDE + plot_w} y2={PAD_TOP + plot_h}
                class="chart__axis"
            />
            {move || {
                let bars = bars.get();
                let values: Vec<f64> = bars.iter().map(|b| b.value).collect();
                bar_layout(&values, plot_w, plot_h)
                    .into_iter()
                    .zip(bars)
                    .map(|(rect, bar)| {
                        let cx = PAD_SIDE + rect.x + rect.width / 2.0;
                        view! {
                            <g class="chart__bar">
                                <rect
                                    x={PAD_SIDE + rect.x}
                                    y={PAD_TOP + rect.y}
                                    width=rect.width
                                    height=rect.height
                                    fill=bar.color.clone()
                                    rx="3"
                                >
                                    <title>{format!("{}: {}", bar.label, format_number(bar.value))}</title>
                                </rect>
                                <text x=cx y={PAD_TOP + rect.y - 4.0} text-anchor="middle" class="chart__value">
                                    {format_compact(bar.value)}
                                </text>
                                <text x=cx y={HEIGHT - 10.0} text-anchor="middle" class="chart__label">
                                    {bar.label}
                                </text>
                            </g>
                        }
                    })
                    .collect_view()
            }}
        </svg>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tallest_bar_fills_height() {
        let rects = bar_layout(&[5.0, 10.0, 0.0], 300.0, 100.0);
        assert_eq!(rects.len(), 3);
        assert_eq!(rects[1].height, 100.0);
        assert_eq!(rects[1].y, 0.0);
        assert_eq!(rects[0].height, 50.0);
        assert_eq!(rects[2].height, 0.0);
        assert!(rects[0].x < rects[1].x && rects[1].x < rects[2].x);
    }

    #[test]
    fn test_all_zero_or_bad_values() {
        let rects = bar_layout(&[0.0, f64::NAN, -3.0], 90.0, 50.0);
        assert!(rects.iter().all(|r| r.height == 0.0 && r.y == 50.0));
        assert!(bar_layout(&[], 90.0, 50.0).is_empty());
    }
}

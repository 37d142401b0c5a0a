use leptos::prelude::*;

/// Stroke paths (24×24 viewBox) per icon name.
fn icon_paths(name: &str) -> &'static [&'static str] {
    match name {
        "dashboard" => &["M3 3h7v9H3z", "M14 3h7v5h-7z", "M14 12h7v9h-7z", "M3 16h7v5H3z"],
        "map" => &["M1 6v16l7-4 8 4 7-4V2l-7 4-8-4-7 4z", "M8 2v16", "M16 6v16"],
        "map-pin" => &[
            "M21 10c0 7-9 13-9 13s-9-6-9-13a9 9 0 0 1 18 0z",
            "M12 7a3 3 0 1 0 0 6 3 3 0 0 0 0-6z",
        ],
        "bar-chart" => &["M12 20V10", "M18 20V4", "M6 20v-4"],
        "trending-up" => &["M23 6l-9.5 9.5-5-5L1 18", "M17 6h6v6"],
        "atm" => &["M2 5h20v14H2z", "M2 10h20", "M6 15h4"],
        "building" => &["M3 22h18", "M6 22V4h12v18", "M10 8h4", "M10 12h4", "M10 16h4"],
        "cash" => &["M2 6h20v12H2z", "M12 9a3 3 0 1 0 0 6 3 3 0 0 0 0-6z", "M6 12h.01", "M18 12h.01"],
        "scale" => &["M12 3v18", "M5 7h14", "M5 7l-3 7a3 3 0 0 0 6 0z", "M19 7l-3 7a3 3 0 0 0 6 0z"],
        "relocate" => &["M5 12h14", "M13 6l6 6-6 6", "M5 5v14"],
        "clipboard" => &[
            "M16 4h2a2 2 0 0 1 2 2v14a2 2 0 0 1-2 2H6a2 2 0 0 1-2-2V6a2 2 0 0 1 2-2h2",
            "M9 2h6v4H9z",
            "M9 12h6",
            "M9 16h4",
        ],
        "plus" => &["M12 5v14", "M5 12h14"],
        "refresh" => &["M23 4v6h-6", "M1 20v-6h6", "M3.5 9a9 9 0 0 1 14.9-3.4L23 10", "M1 14l4.6 4.4A9 9 0 0 0 20.5 15"],
        "delete" => &["M3 6h18", "M8 6V4h8v2", "M19 6l-1 14H6L5 6"],
        "search" => &["M11 4a7 7 0 1 0 0 14 7 7 0 0 0 0-14z", "M21 21l-4.35-4.35"],
        "x" => &["M18 6L6 18", "M6 6l12 12"],
        "check" => &["M20 6L9 17l-5-5"],
        "alert" => &["M12 2a10 10 0 1 0 0 20 10 10 0 0 0 0-20z", "M12 8v4", "M12 16h.01"],
        "chevron-left" => &["M15 18l-6-6 6-6"],
        "chevron-right" => &["M9 18l6-6-6-6"],
        "chevron-down" => &["M6 9l6 6 6-6"],
        "chevrons-left" => &["M11 17l-5-5 5-5", "M18 17l-5-5 5-5"],
        "chevrons-right" => &["M13 17l5-5-5-5", "M6 17l5-5-5-5"],
        "panel-left-close" => &["M3 3h18v18H3z", "M9 3v18", "M16 15l-3-3 3-3"],
        "panel-left-open" => &["M3 3h18v18H3z", "M9 3v18", "M14 9l3 3-3 3"],
        "user" => &["M20 21v-2a4 4 0 0 0-4-4H8a4 4 0 0 0-4 4v2", "M12 3a4 4 0 1 0 0 8 4 4 0 0 0 0-8z"],
        "log-out" => &["M9 21H5a2 2 0 0 1-2-2V5a2 2 0 0 1 2-2h4", "M16 17l5-5-5-5", "M21 12H9"],
        "folder" => &["M22 19a2 2 0 0 1-2 2H4a2 2 0 0 1-2-2V5a2 2 0 0 1 2-2h5l2 3h9a2 2 0 0 1 2 2z"],
        _ => &["M12 2a10 10 0 1 0 0 20 10 10 0 0 0 0-20z", "M12 8v4l3 3"],
    }
}

pub fn icon(name: &str) -> AnyView {
    let size = if name.starts_with("chevron") { "16" } else { "20" };
    view! {
        <svg
            width=size
            height=size
            viewBox="0 0 24 24"
            fill="none"
            stroke="currentColor"
            stroke-width="2"
            stroke-linecap="round"
            stroke-linejoin="round"
            aria-hidden="true"
        >
            {icon_paths(name).iter().map(|d| view! { <path d=*d /> }).collect_view()}
        </svg>
    }
    .into_any()
}

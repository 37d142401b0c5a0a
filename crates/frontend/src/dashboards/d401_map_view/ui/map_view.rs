//! Fleet map: one tier-colored marker per machine with a click popup.

use contracts::domain::a001_atm::Atm;
use contracts::enums::tier::tier_style_of;
use contracts::enums::Tier;
use contracts::shared::geo::LatLng;
use leptos::html;
use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::domain::a001_atm::api as atm_api;
use crate::layout::global_context::AppGlobalContext;
use crate::layout::tabs::detail_tab_label;
use crate::layout::tabs::tab_labels::atm_detail_key;
use crate::shared::components::load_state::{ErrorBar, LoadingBlock};
use crate::shared::components::tier_badge::TierBadge;
use crate::shared::page_frame::{PageFrame, PageHeader};
use crate::shared::page_standard::PAGE_CAT_DASHBOARD;
use crate::system::maps::bridge::{MapHandle, MapListener, MapMarker};
use crate::system::maps::loader::load_maps_sdk;
use crate::system::maps::DEFAULT_CENTER;

const DEFAULT_ZOOM: f64 = 12.0;
/// Popup sits above the marker head.
const POPUP_OFFSET_Y: f64 = 14.0;

#[derive(Default)]
struct MapParts {
    handle: Option<MapHandle>,
    markers: Vec<MapMarker>,
    listeners: Vec<MapListener>,
}

impl MapParts {
    fn teardown(&mut self) {
        self.listeners.clear();
        for marker in self.markers.drain(..) {
            marker.detach();
        }
        self.handle = None;
    }
}

fn initial_center(atms: &[Atm]) -> LatLng {
    atms.iter()
        .find_map(|a| a.position())
        .unwrap_or(DEFAULT_CENTER)
}

#[component]
pub fn MapView() -> impl IntoView {
    let tabs_store = use_context::<AppGlobalContext>().expect("AppGlobalContext not found");

    let container = NodeRef::<html::Div>::new();
    let parts = StoredValue::new_local(MapParts::default());

    let atms = RwSignal::new(Vec::<Atm>::new());
    let selected = RwSignal::new(None::<Atm>);
    let popup_pos = RwSignal::new(None::<(f64, f64)>);
    let loading = RwSignal::new(true);
    let error = RwSignal::new(None::<String>);

    let reposition = move || {
        let Some(pos) = selected.with_untracked(|s| s.as_ref().and_then(|a| a.position())) else {
            popup_pos.set(None);
            return;
        };
        let pixel = parts.with_value(|p| p.handle.as_ref().and_then(|h| h.container_pixel(pos)));
        popup_pos.set(pixel);
    };

    let build = move |el: web_sys::HtmlElement, list: Vec<Atm>| -> Result<(), String> {
        let handle = MapHandle::new(&el, initial_center(&list), DEFAULT_ZOOM)?;
        let mut markers = Vec::new();
        let mut listeners = Vec::new();

        for atm in list.into_iter() {
            let Some(pos) = atm.position() else {
                continue;
            };
            let color = tier_style_of(atm.tier).color;
            let marker = handle.add_marker(pos, color, &atm.name)?;
            let atm_for_click = atm.clone();
            listeners.push(marker.on_click(move || {
                selected.set(Some(atm_for_click.clone()));
                reposition();
            })?);
            markers.push(marker);
        }

        for event in ["idle", "zoom_changed", "drag"] {
            listeners.push(handle.on(event, reposition)?);
        }

        log::info!("map ready with {} markers", markers.len());
        parts.update_value(|p| {
            p.teardown();
            p.handle = Some(handle);
            p.markers = markers;
            p.listeners = listeners;
        });
        Ok(())
    };

    Effect::new(move |_| {
        let Some(el) = container.get() else {
            return;
        };
        let el: web_sys::HtmlElement = el.into();
        spawn_local(async move {
            let sdk = load_maps_sdk().await;
            let list = match atm_api::list_all_atms().await {
                Ok(list) => list,
                Err(e) if e.is_empty() => Vec::new(),
                Err(e) => {
                    log::error!("map ATM list failed: {}", e);
                    error.set(Some(e.user_message()));
                    Vec::new()
                }
            };
            atms.set(list.clone());

            match sdk {
                Ok(()) => {
                    if let Err(e) = build(el, list) {
                        log::error!("map init failed: {}", e);
                        error.set(Some(format!("Peta tidak dapat ditampilkan: {}", e)));
                    }
                }
                Err(e) => error.set(Some(e)),
            }
            loading.set(false);
        });
    });

    on_cleanup(move || {
        parts.try_update_value(|p| p.teardown());
    });

    let close_popup = move |_| {
        selected.set(None);
        popup_pos.set(None);
    };

    let open_detail = move |_| {
        if let Some(atm) = selected.get_untracked() {
            let label = if atm.code.is_empty() { atm.id.to_string() } else { atm.code.clone() };
            tabs_store.open_tab(&atm_detail_key(atm.id), &detail_tab_label("ATM", &label));
        }
    };

    let popup = move || {
        let (x, y) = popup_pos.get()?;
        let atm = selected.get()?;
        Some(view! {
            <div
                class="map-popup"
                style:left=format!("{}px", x)
                style:top=format!("{}px", y - POPUP_OFFSET_Y)
            >
                <button class="map-popup__close" on:click=close_popup>"×"</button>
                <div class="map-popup__title">{atm.name.clone()}</div>
                <div class="map-popup__sub">{atm.code.clone()}</div>
                <div class="map-popup__sub">{atm.address.clone().unwrap_or_default()}</div>
                <TierBadge tier=atm.tier />
                <button class="map-popup__link" on:click=open_detail>"Lihat detail"</button>
            </div>
        })
    };

    let located = move || atms.with(|a| a.iter().filter(|a| a.position().is_some()).count());

    view! {
        <PageFrame page_id="d401_map_view--dashboard" category=PAGE_CAT_DASHBOARD>
            <PageHeader title="Peta ATM">
                <span class="map-count">{move || format!("{} ATM di peta", located())}</span>
            </PageHeader>
            <div class="page__content">
                <ErrorBar message=error />
                <div class="map-legend">
                    {Tier::all().map(|t| view! { <TierBadge tier=Some(t) /> }).collect_view()}
                </div>
                <div class="map-wrapper">
                    <div class="map-canvas" node_ref=container></div>
                    <Show when=move || loading.get()>
                        <div class="map-overlay"><LoadingBlock label="Memuat peta..." /></div>
                    </Show>
                    {popup}
                </div>
            </div>
        </PageFrame>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_center_falls_back_to_default() {
        assert_eq!(initial_center(&[]), DEFAULT_CENTER);
        let atm = Atm {
            latitude: Some(-6.2),
            longitude: Some(106.8),
            ..Default::default()
        };
        assert_eq!(initial_center(&[Atm::default(), atm]), LatLng { lat: -6.2, lng: 106.8 });
    }
}

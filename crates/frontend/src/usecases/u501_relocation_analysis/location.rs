//! Location step: pick the candidate point on the map or type coordinates.

use contracts::shared::geo::LatLng;
use contracts::usecases::u501_relocation_analysis::RelocationWizard;
use leptos::ev;
use leptos::html;
use leptos::prelude::*;
use leptos::task::spawn_local;
use thaw::*;

use crate::shared::components::load_state::ErrorBar;
use crate::shared::request_seq::RequestSeq;
use crate::system::maps::api as maps_api;
use crate::system::maps::bridge::{MapHandle, MapListener, MapMarker};
use crate::system::maps::loader::load_maps_sdk;
use crate::system::maps::DEFAULT_CENTER;

const PICKER_ZOOM: f64 = 13.0;
const CANDIDATE_COLOR: &str = "#d13438";

#[derive(Default)]
struct PickerMap {
    handle: Option<MapHandle>,
    marker: Option<MapMarker>,
    listeners: Vec<MapListener>,
}

impl PickerMap {
    fn show_point(&mut self, point: Option<LatLng>) {
        if let Some(old) = self.marker.take() {
            old.detach();
        }
        let (Some(handle), Some(point)) = (self.handle.as_ref(), point) else {
            return;
        };
        match handle.add_marker(point, CANDIDATE_COLOR, "Lokasi kandidat") {
            Ok(marker) => self.marker = Some(marker),
            Err(e) => log::warn!("candidate marker failed: {}", e),
        }
        handle.pan_to(point);
    }

    fn teardown(&mut self) {
        self.listeners.clear();
        if let Some(marker) = self.marker.take() {
            marker.detach();
        }
        self.handle = None;
    }
}

fn coordinate_text(value: f64) -> String {
    format!("{:.6}", value)
}

#[component]
pub fn LocationStep(
    wizard: RwSignal<RelocationWizard>,
    /// Runs after the wizard was reset by "Hapus lokasi".
    on_clear: Callback<()>,
) -> impl IntoView {
    let lat_text = RwSignal::new(String::new());
    let lng_text = RwSignal::new(String::new());
    let address_text = RwSignal::new(String::new());
    let geocoding = RwSignal::new(false);
    let error = RwSignal::new(None::<String>);
    let map_error = RwSignal::new(None::<String>);
    let geo_seq = RequestSeq::new();

    let container = NodeRef::<html::Div>::new();
    let map = StoredValue::new_local(PickerMap::default());

    let choose_point = move |point: LatLng| {
        wizard.update(|w| w.set_location(point.lat, point.lng, ""));
        lat_text.set(coordinate_text(point.lat));
        lng_text.set(coordinate_text(point.lng));
        address_text.set(String::new());
        error.set(None);

        let ticket = geo_seq.next();
        geocoding.set(true);
        spawn_local(async move {
            let result = maps_api::reverse_geocode(point).await;
            if !geo_seq.is_current(ticket) {
                return;
            }
            geocoding.set(false);
            match result {
                Ok(found) => address_text.set(found.address),
                Err(e) => log::warn!("reverse geocode failed: {}", e),
            }
        });
    };

    Effect::new(move |_| {
        let address = address_text.get();
        wizard.update(|w| w.set_address(&address));
    });

    let location = Memo::new(move |_| wizard.with(|w| w.location()));
    Effect::new(move |_| {
        let point = location.get();
        map.update_value(|m| m.show_point(point));
    });

    Effect::new(move |_| {
        let Some(el) = container.get() else {
            return;
        };
        let el: web_sys::HtmlElement = el.into();
        spawn_local(async move {
            if let Err(e) = load_maps_sdk().await {
                map_error.set(Some(format!("{}. Masukkan koordinat secara manual.", e)));
                return;
            }
            let center = wizard.with_untracked(|w| w.location()).unwrap_or(DEFAULT_CENTER);
            let built = MapHandle::new(&el, center, PICKER_ZOOM).and_then(|handle| {
                let listener = handle.on_click_position(choose_point)?;
                Ok((handle, listener))
            });
            match built {
                Ok((handle, listener)) => {
                    let point = wizard.with_untracked(|w| w.location());
                    map.update_value(|m| {
                        m.teardown();
                        m.handle = Some(handle);
                        m.listeners.push(listener);
                        m.show_point(point);
                    });
                }
                Err(e) => {
                    log::error!("location picker init failed: {}", e);
                    map_error.set(Some("Peta tidak dapat ditampilkan".to_string()));
                }
            }
        });
    });

    on_cleanup(move || {
        map.try_update_value(|m| m.teardown());
    });

    let apply_manual = move |_: ev::MouseEvent| match LatLng::parse(&lat_text.get_untracked(), &lng_text.get_untracked()) {
        Some(point) => choose_point(point),
        None => error.set(Some("Koordinat tidak valid".to_string())),
    };

    let clear = move |_: ev::MouseEvent| {
        geo_seq.invalidate();
        geocoding.set(false);
        wizard.update(|w| w.clear_location());
        lat_text.set(String::new());
        lng_text.set(String::new());
        address_text.set(String::new());
        error.set(None);
        on_clear.run(());
    };

    let has_location = move || location.with(|l| l.is_some());

    view! {
        <div class="wizard-location">
            <ErrorBar message=map_error />
            <div class="map-wrapper map-wrapper--picker">
                <div class="map-canvas" node_ref=container></div>
            </div>
            <div class="form-grid">
                <label>"Latitude"</label>
                <Input value=lat_text placeholder="-6.914700" />
                <label>"Longitude"</label>
                <Input value=lng_text placeholder="107.609800" />
                <label>"Alamat"</label>
                <Input value=address_text placeholder="Alamat lokasi" />
            </div>
            <Show when=move || geocoding.get()>
                <div class="wizard-hint">"Mencari alamat..."</div>
            </Show>
            <ErrorBar message=error />
            <div class="wizard-actions">
                <Button appearance=ButtonAppearance::Secondary on_click=apply_manual>
                    "Gunakan koordinat"
                </Button>
                <Button
                    appearance=ButtonAppearance::Subtle
                    disabled=Signal::derive(move || !has_location())
                    on_click=clear
                >
                    "Hapus lokasi"
                </Button>
            </div>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_coordinate_text_round_trips_through_parse() {
        let lat = coordinate_text(-6.9147123);
        let lng = coordinate_text(107.6098);
        assert_eq!(lat, "-6.914712");
        assert_eq!(LatLng::parse(&lat, &lng), LatLng::new(-6.914712, 107.6098));
    }
}

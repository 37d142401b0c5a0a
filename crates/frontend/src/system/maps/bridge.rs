//! Thin typed wrapper over the `google.maps` JS namespace.
//!
//! Everything goes through `Reflect`, so there are no extern bindings to
//! keep in sync with the SDK.

use contracts::shared::geo::LatLng;
use std::any::Any;

use js_sys::{Array, Function, Object, Reflect};
use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};

type JsResult<T> = Result<T, String>;

fn js_err(e: JsValue) -> String {
    e.as_string().unwrap_or_else(|| format!("{:?}", e))
}

fn get(target: &JsValue, key: &str) -> JsResult<JsValue> {
    let value = Reflect::get(target, &JsValue::from_str(key)).map_err(js_err)?;
    if value.is_undefined() {
        return Err(format!("{} tidak tersedia", key));
    }
    Ok(value)
}

fn call(target: &JsValue, method: &str, args: &[JsValue]) -> JsResult<JsValue> {
    let func = get(target, method)?
        .dyn_into::<Function>()
        .map_err(|_| format!("{} bukan fungsi", method))?;
    let args: Array = args.iter().collect();
    Reflect::apply(&func, target, &args).map_err(js_err)
}

fn construct(ctor: &str, args: &[JsValue]) -> JsResult<JsValue> {
    let ctor = get(&maps_ns()?, ctor)?
        .dyn_into::<Function>()
        .map_err(|_| format!("{} bukan konstruktor", ctor))?;
    let args: Array = args.iter().collect();
    Reflect::construct(&ctor, &args).map_err(js_err)
}

fn object(fields: &[(&str, JsValue)]) -> JsValue {
    let obj = Object::new();
    for (key, value) in fields {
        let _ = Reflect::set(&obj, &JsValue::from_str(key), value);
    }
    obj.into()
}

fn maps_ns() -> JsResult<JsValue> {
    let window = web_sys::window().ok_or_else(|| "window tidak tersedia".to_string())?;
    get(&get(&window, "google")?, "maps")
}

fn lat_lng_literal(p: LatLng) -> JsValue {
    object(&[("lat", p.lat.into()), ("lng", p.lng.into())])
}

/// Registered SDK listener; removed from the SDK when dropped.
pub struct MapListener {
    handle: JsValue,
    _closure: Box<dyn Any>,
}

impl Drop for MapListener {
    fn drop(&mut self) {
        if let Ok(event) = maps_ns().and_then(|ns| get(&ns, "event")) {
            let _ = call(&event, "removeListener", &[self.handle.clone()]);
        }
    }
}

fn add_listener(target: &JsValue, event_name: &str, f: impl FnMut() + 'static) -> JsResult<MapListener> {
    let closure = Closure::<dyn FnMut()>::new(f);
    let event = get(&maps_ns()?, "event")?;
    let handle = call(
        &event,
        "addListener",
        &[target.clone(), JsValue::from_str(event_name), closure.as_ref().clone()],
    )?;
    Ok(MapListener {
        handle,
        _closure: Box::new(closure),
    })
}

pub struct MapMarker {
    inner: JsValue,
}

impl MapMarker {
    pub fn on_click(&self, f: impl FnMut() + 'static) -> JsResult<MapListener> {
        add_listener(&self.inner, "click", f)
    }

    pub fn detach(&self) {
        let _ = call(&self.inner, "setMap", &[JsValue::NULL]);
    }
}

pub struct MapHandle {
    map: JsValue,
    overlay: JsValue,
}

impl MapHandle {
    pub fn new(container: &web_sys::HtmlElement, center: LatLng, zoom: f64) -> JsResult<Self> {
        let options = object(&[
            ("center", lat_lng_literal(center)),
            ("zoom", zoom.into()),
            ("mapTypeControl", false.into()),
            ("streetViewControl", false.into()),
        ]);
        let map = construct("Map", &[container.clone().into(), options])?;

        // An empty overlay exposes the projection used for popup placement.
        let overlay = construct("OverlayView", &[])?;
        let noop = Function::new_no_args("");
        for hook in ["onAdd", "draw", "onRemove"] {
            let _ = Reflect::set(&overlay, &JsValue::from_str(hook), &noop);
        }
        call(&overlay, "setMap", &[map.clone()])?;

        Ok(Self { map, overlay })
    }

    pub fn add_marker(&self, position: LatLng, color: &str, title: &str) -> JsResult<MapMarker> {
        let symbol_path = get(&get(&maps_ns()?, "SymbolPath")?, "CIRCLE")?;
        let icon = object(&[
            ("path", symbol_path),
            ("fillColor", JsValue::from_str(color)),
            ("fillOpacity", 0.9.into()),
            ("strokeColor", JsValue::from_str("#ffffff")),
            ("strokeWeight", 1.5.into()),
            ("scale", 8.0.into()),
        ]);
        let options = object(&[
            ("position", lat_lng_literal(position)),
            ("map", self.map.clone()),
            ("title", JsValue::from_str(title)),
            ("icon", icon),
        ]);
        Ok(MapMarker {
            inner: construct("Marker", &[options])?,
        })
    }

    pub fn on(&self, event_name: &str, f: impl FnMut() + 'static) -> JsResult<MapListener> {
        add_listener(&self.map, event_name, f)
    }

    pub fn pan_to(&self, position: LatLng) {
        let _ = call(&self.map, "panTo", &[lat_lng_literal(position)]);
    }

    /// Pixel offset of `position` inside the map container, once the
    /// projection is ready.
    pub fn container_pixel(&self, position: LatLng) -> Option<(f64, f64)> {
        let projection = call(&self.overlay, "getProjection", &[]).ok()?;
        if projection.is_undefined() || projection.is_null() {
            return None;
        }
        let latlng = construct("LatLng", &[position.lat.into(), position.lng.into()]).ok()?;
        let point = call(&projection, "fromLatLngToContainerPixel", &[latlng]).ok()?;
        let x = get(&point, "x").ok()?.as_f64()?;
        let y = get(&point, "y").ok()?.as_f64()?;
        Some((x, y))
    }

    /// Map click coordinates from the SDK's `click` event.
    pub fn on_click_position(&self, mut f: impl FnMut(LatLng) + 'static) -> JsResult<MapListener> {
        let closure = Closure::<dyn FnMut(JsValue)>::new(move |event: JsValue| {
            let Ok(latlng) = get(&event, "latLng") else {
                return;
            };
            let lat = call(&latlng, "lat", &[]).ok().and_then(|v| v.as_f64());
            let lng = call(&latlng, "lng", &[]).ok().and_then(|v| v.as_f64());
            if let Some(p) = lat.zip(lng).and_then(|(lat, lng)| LatLng::new(lat, lng)) {
                f(p);
            }
        });
        let event = get(&maps_ns()?, "event")?;
        let handle = call(
            &event,
            "addListener",
            &[self.map.clone(), JsValue::from_str("click"), closure.as_ref().clone()],
        )?;
        Ok(MapListener {
            handle,
            _closure: Box::new(closure),
        })
    }
}

//! One-time injection of the maps SDK `<script>` tag.
//!
//! The load is memoized as a JS promise; every caller awaits the same one.
//! A failed load is forgotten so the next mount can try again.

use std::cell::RefCell;

use js_sys::{Promise, Reflect};
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;
use web_sys::HtmlScriptElement;

use crate::shared::config::config;

const SDK_URL: &str = "https://maps.googleapis.com/maps/api/js";
const SCRIPT_ID: &str = "maps-sdk";

thread_local! {
    static SDK: RefCell<Option<Promise>> = const { RefCell::new(None) };
}

pub fn sdk_url(key: &str) -> String {
    format!("{}?key={}&v=weekly", SDK_URL, urlencoding::encode(key))
}

fn sdk_present() -> bool {
    web_sys::window()
        .and_then(|w| Reflect::get(&w, &JsValue::from_str("google")).ok())
        .filter(|g| !g.is_undefined())
        .and_then(|g| Reflect::get(&g, &JsValue::from_str("maps")).ok())
        .map(|m| !m.is_undefined())
        .unwrap_or(false)
}

fn inject(key: &str) -> Result<Promise, String> {
    let document = web_sys::window()
        .and_then(|w| w.document())
        .ok_or_else(|| "document tidak tersedia".to_string())?;
    let head = document
        .head()
        .ok_or_else(|| "<head> tidak ditemukan".to_string())?;
    let script = document
        .create_element("script")
        .map_err(|e| format!("{:?}", e))?
        .dyn_into::<HtmlScriptElement>()
        .map_err(|_| "bukan elemen script".to_string())?;

    script.set_id(SCRIPT_ID);
    script.set_src(&sdk_url(key));
    script.set_async(true);

    let promise = Promise::new(&mut |resolve, reject| {
        script.set_onload(Some(&resolve));
        script.set_onerror(Some(&reject));
    });

    head.append_child(&script).map_err(|e| format!("{:?}", e))?;
    log::info!("maps SDK script injected");
    Ok(promise)
}

/// Resolves once `google.maps` is usable.
pub async fn load_maps_sdk() -> Result<(), String> {
    if sdk_present() {
        return Ok(());
    }
    let key = config()
        .maps_api_key
        .clone()
        .ok_or_else(|| "API key peta belum dikonfigurasi".to_string())?;

    let promise = SDK.with(|slot| -> Result<Promise, String> {
        let mut slot = slot.borrow_mut();
        if let Some(p) = slot.as_ref() {
            return Ok(p.clone());
        }
        let p = inject(&key)?;
        *slot = Some(p.clone());
        Ok(p)
    })?;

    match JsFuture::from(promise).await {
        Ok(_) if sdk_present() => Ok(()),
        Ok(_) => Err("SDK peta termuat tetapi google.maps tidak tersedia".to_string()),
        Err(e) => {
            log::error!("maps SDK failed to load: {:?}", e);
            SDK.with(|slot| slot.borrow_mut().take());
            if let Some(old) = web_sys::window()
                .and_then(|w| w.document())
                .and_then(|d| d.get_element_by_id(SCRIPT_ID))
            {
                old.remove();
            }
            Err("Gagal memuat peta".to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sdk_url_encodes_key() {
        assert_eq!(
            sdk_url("a b"),
            "https://maps.googleapis.com/maps/api/js?key=a%20b&v=weekly"
        );
    }
}

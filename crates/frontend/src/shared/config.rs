//! Runtime configuration.
//!
//! Values baked in at compile time win; otherwise the API is assumed to run
//! on port 3000 of the host that served the page.

use once_cell::sync::Lazy;

/// Rows per page on master lists. Read without touching the browser.
pub const MASTER_PAGE_SIZE: usize = 10;

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub api_base: String,
    pub maps_api_key: Option<String>,
    pub search_debounce_ms: u32,
    pub relocation_page_size: usize,
    pub master_page_size: usize,
}

pub static CONFIG: Lazy<AppConfig> = Lazy::new(|| AppConfig {
    api_base: option_env!("ATM_API_BASE_URL")
        .map(|s| s.trim_end_matches('/').to_string())
        .unwrap_or_else(api_base_from_location),
    maps_api_key: option_env!("ATM_MAPS_API_KEY")
        .filter(|k| !k.is_empty())
        .map(str::to_string),
    search_debounce_ms: 300,
    relocation_page_size: contracts::usecases::u501_relocation_analysis::RESULT_PAGE_SIZE,
    master_page_size: MASTER_PAGE_SIZE,
});

pub fn config() -> &'static AppConfig {
    &CONFIG
}

fn api_base_from_location() -> String {
    let window = match web_sys::window() {
        Some(w) => w,
        None => return String::new(),
    };
    let location = window.location();
    let protocol = location.protocol().unwrap_or_else(|_| "http:".to_string());
    let hostname = location
        .hostname()
        .unwrap_or_else(|_| "127.0.0.1".to_string());
    format!("{}//{}:3000/api", protocol, hostname)
}

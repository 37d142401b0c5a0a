pub mod api_utils;
pub mod components;
pub mod config;
pub mod debounce;
pub mod icons;
pub mod list_utils;
pub mod number_format;
pub mod page_frame;
pub mod page_standard;
pub mod request_seq;

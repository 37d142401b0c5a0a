//! Tabs: `page` wraps content, `registry` maps keys to views,
//! `tab_labels` holds titles and detail-key helpers.

pub mod page;
pub mod registry;
pub mod tab_labels;

pub use page::TabPage;
pub use tab_labels::{detail_tab_label, tab_label_for_key};

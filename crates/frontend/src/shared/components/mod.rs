pub mod bar_chart;
pub mod confirm_dialog;
pub mod line_chart;
pub mod load_state;
pub mod pagination_controls;
pub mod period_select;
pub mod stat_card;
pub mod tier_badge;

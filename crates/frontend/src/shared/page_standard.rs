//! Page category constants.
//!
//! Every page rendered inside a tab declares an HTML `id` of the form
//! `{module}--{category}` (e.g. `"a001_atm--list"`) and a
//! `data-page-category` taken from the constants below.

/// Table with filters and pagination.
pub const PAGE_CAT_LIST: &str = "list";

/// Single record.
pub const PAGE_CAT_DETAIL: &str = "detail";

/// Charts and aggregates.
pub const PAGE_CAT_DASHBOARD: &str = "dashboard";

/// Report driven by selectors (performance, CBA).
pub const PAGE_CAT_REPORT: &str = "report";

/// Multi-step workflow.
pub const PAGE_CAT_USECASE: &str = "usecase";

/// Full-bleed page such as the map.
pub const PAGE_CAT_CUSTOM: &str = "custom";

pub const ALL_CATEGORIES: &[&str] = &[
    PAGE_CAT_LIST,
    PAGE_CAT_DETAIL,
    PAGE_CAT_DASHBOARD,
    PAGE_CAT_REPORT,
    PAGE_CAT_USECASE,
    PAGE_CAT_CUSTOM,
];

/// `{module}--{category}` with both halves present.
pub fn is_valid_page_id(id: &str) -> bool {
    match id.split_once("--") {
        Some((module, category)) => !module.is_empty() && ALL_CATEGORIES.contains(&category),
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_ids() {
        assert!(is_valid_page_id("a001_atm--list"));
        assert!(is_valid_page_id("u501_relocation_analysis--usecase"));
        assert!(!is_valid_page_id("a001_atm"));
        assert!(!is_valid_page_id("--list"));
        assert!(!is_valid_page_id("a001_atm--grid"));
    }
}

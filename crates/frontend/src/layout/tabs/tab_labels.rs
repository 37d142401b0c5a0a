//! Tab titles per key.

use contracts::usecases::common::UseCaseMetadata;
use contracts::usecases::u501_relocation_analysis::RelocationAnalysis;

pub const ATM_DETAIL_PREFIX: &str = "a001_atm_detail_";
pub const RELOCATION_DETAIL_PREFIX: &str = "a003_relocation_detail_";

/// Readable title for a list/page key; empty for unknown keys.
pub fn tab_label_for_key(key: &str) -> &'static str {
    match key {
        "d400_fleet_summary" => "Dashboard",
        "d401_map_view" => "Peta ATM",
        "a001_atm" => "Master ATM",
        "a002_branch" => "Cabang",
        "a003_relocation" => "Pengajuan Relokasi",
        "p900_atm_performance" => "Performa ATM",
        "p901_atm_cba" => "CBA ATM",
        "u501_relocation_analysis" => RelocationAnalysis::display_name(),
        k if k.starts_with(ATM_DETAIL_PREFIX) => "ATM",
        k if k.starts_with(RELOCATION_DETAIL_PREFIX) => "Relokasi",
        _ => "",
    }
}

/// "ATM · ATM Braga".
pub fn detail_tab_label(entity_label: &str, identifier: &str) -> String {
    format!("{} · {}", entity_label, identifier)
}

pub fn atm_detail_key(id: i64) -> String {
    format!("{}{}", ATM_DETAIL_PREFIX, id)
}

pub fn relocation_detail_key(id: i64) -> String {
    format!("{}{}", RELOCATION_DETAIL_PREFIX, id)
}

/// Id carried by a detail key, `None` when the suffix is not a number.
pub fn detail_id(key: &str, prefix: &str) -> Option<i64> {
    key.strip_prefix(prefix)?.parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detail_keys_round_trip() {
        let key = atm_detail_key(42);
        assert_eq!(key, "a001_atm_detail_42");
        assert_eq!(detail_id(&key, ATM_DETAIL_PREFIX), Some(42));
        assert_eq!(detail_id("a001_atm_detail_x", ATM_DETAIL_PREFIX), None);
        assert_eq!(detail_id("a001_atm", ATM_DETAIL_PREFIX), None);
    }

    #[test]
    fn test_labels() {
        assert_eq!(tab_label_for_key("a001_atm"), "Master ATM");
        assert_eq!(tab_label_for_key(&relocation_detail_key(3)), "Relokasi");
        assert_eq!(tab_label_for_key("nope"), "");
        assert_eq!(detail_tab_label("ATM", "ATM Braga"), "ATM · ATM Braga");
    }
}

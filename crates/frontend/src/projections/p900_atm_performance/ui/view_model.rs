//! What the performance screen shows for one fetch result.

use contracts::enums::tier::tier_style_of;
use contracts::projections::p900_atm_performance::PerformanceRecord;
use contracts::shared::api_error::ApiError;
use contracts::shared::envelope::ListPage;

use crate::shared::number_format::{format_number, format_rupiah};

#[derive(Debug, Clone, PartialEq)]
pub struct PerformanceCard {
    pub atm_id: i64,
    pub title: String,
    pub subtitle: String,
    pub tier_label: &'static str,
    pub tier_color: &'static str,
    pub tier_background: &'static str,
    pub volume: String,
    pub nominal: String,
    pub fee: String,
}

impl From<&PerformanceRecord> for PerformanceCard {
    fn from(r: &PerformanceRecord) -> Self {
        let style = tier_style_of(r.tier);
        Self {
            atm_id: r.atm_id,
            title: r.display_name().to_string(),
            subtitle: r.address.clone().unwrap_or_else(|| r.code.clone()),
            tier_label: style.label,
            tier_color: style.color,
            tier_background: style.background,
            volume: format_number(r.volume_trx),
            nominal: format_rupiah(r.nominal_trx),
            fee: format_rupiah(r.fee),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct PerformanceView {
    pub cards: Vec<PerformanceCard>,
    pub error: Option<String>,
}

impl PerformanceView {
    pub fn from_result(result: Result<ListPage<PerformanceRecord>, ApiError>) -> Self {
        match result {
            Ok(page) => Self {
                cards: page.items.iter().map(PerformanceCard::from).collect(),
                error: None,
            },
            Err(e) if e.is_empty() => Self::default(),
            Err(e) => Self {
                cards: Vec::new(),
                error: Some(e.user_message()),
            },
        }
    }

    /// Nothing to show and nothing went wrong.
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty() && self.error.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use contracts::shared::envelope::decode_response;

    #[test]
    fn test_one_record_one_card() {
        let body = r#"{"data":[{"atm_id":1,"atm_name":"ATM Braga","tier":2,"volume_trx":500,"nominal_trx":"25000000","fee":10000}]}"#;
        let view = PerformanceView::from_result(decode_response(200, body));
        assert_eq!(view.error, None);
        assert_eq!(view.cards.len(), 1);
        let card = &view.cards[0];
        assert_eq!(card.tier_label, "TIER 2");
        assert_eq!(card.volume, "500");
        assert_eq!(card.fee, "Rp. 10.000");
        assert_eq!(card.title, "ATM Braga");
    }

    #[test]
    fn test_error_body_gives_message_and_no_cards() {
        let body = r#"{"message":"Periode tidak valid"}"#;
        let view = PerformanceView::from_result(decode_response(500, body));
        assert!(view.cards.is_empty());
        assert_eq!(view.error.as_deref(), Some("Periode tidak valid"));
        assert!(!view.is_empty());
    }

    #[test]
    fn test_empty_payload_is_empty_state() {
        let view = PerformanceView::from_result(decode_response(200, r#"{"data":null}"#));
        assert!(view.is_empty());
        let view = PerformanceView::from_result(decode_response(200, r#"{"data":[]}"#));
        assert!(view.is_empty());
    }
}

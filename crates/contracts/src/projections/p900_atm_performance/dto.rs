use serde::{Deserialize, Serialize};

use crate::enums::tier::deserialize_opt_tier;
use crate::enums::{Period, Tier};
use crate::shared::serde_helpers::{de_f64_or_zero, de_opt_i64, de_string_or_default, or_nonempty};

/// One machine's performance in one period.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "PerformanceRecordWire")]
pub struct PerformanceRecord {
    pub atm_id: i64,
    pub code: String,
    pub name: String,
    pub address: Option<String>,
    pub period_id: Option<i64>,
    pub volume_trx: f64,
    pub nominal_trx: f64,
    pub fee: f64,
    pub tier: Option<Tier>,
}

/// Rows joined from the machine table carry both `id` and `atm_id`;
/// `atm_id` wins, `id` is only used when it is the sole key.
#[derive(Deserialize)]
struct PerformanceRecordWire {
    #[serde(default, deserialize_with = "de_opt_i64")]
    atm_id: Option<i64>,
    #[serde(default, deserialize_with = "de_opt_i64")]
    id: Option<i64>,
    #[serde(default, deserialize_with = "de_string_or_default")]
    code: String,
    #[serde(default, deserialize_with = "de_string_or_default")]
    atm_code: String,
    #[serde(default, deserialize_with = "de_string_or_default")]
    name: String,
    #[serde(default, deserialize_with = "de_string_or_default")]
    atm_name: String,
    #[serde(default)]
    address: Option<String>,
    #[serde(default, deserialize_with = "de_opt_i64")]
    period_id: Option<i64>,
    #[serde(default, deserialize_with = "de_f64_or_zero")]
    volume_trx: f64,
    #[serde(default, deserialize_with = "de_f64_or_zero")]
    nominal_trx: f64,
    #[serde(default, deserialize_with = "de_f64_or_zero")]
    fee: f64,
    #[serde(default, deserialize_with = "deserialize_opt_tier")]
    tier: Option<Tier>,
}

impl TryFrom<PerformanceRecordWire> for PerformanceRecord {
    type Error = String;

    fn try_from(w: PerformanceRecordWire) -> Result<Self, Self::Error> {
        let atm_id = w
            .atm_id
            .or(w.id)
            .ok_or_else(|| "missing or invalid atm_id".to_string())?;
        Ok(Self {
            atm_id,
            code: or_nonempty(w.code, w.atm_code),
            name: or_nonempty(w.name, w.atm_name),
            address: w.address,
            period_id: w.period_id,
            volume_trx: w.volume_trx,
            nominal_trx: w.nominal_trx,
            fee: w.fee,
            tier: w.tier,
        })
    }
}

impl PerformanceRecord {
    pub fn display_name(&self) -> &str {
        match (self.name.is_empty(), self.code.is_empty()) {
            (false, _) => &self.name,
            (true, false) => &self.code,
            (true, true) => "-",
        }
    }
}

/// Query of `GET /atms-performance`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PerformanceQuery {
    pub period_id: u8,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub branch_id: Option<i64>,
}

impl PerformanceQuery {
    pub fn new(period: Period, branch_id: Option<i64>) -> Self {
        Self {
            period_id: period.id(),
            branch_id,
        }
    }

    pub fn to_query_string(&self) -> String {
        serde_qs::to_string(self).unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::envelope::{decode_response, ListPage};

    #[test]
    fn test_query_string() {
        let q = PerformanceQuery::new(Period::Q1, Some(6));
        assert_eq!(q.to_query_string(), "period_id=1&branch_id=6");
        assert_eq!(PerformanceQuery::new(Period::Q3, None).to_query_string(), "period_id=3");
    }

    #[test]
    fn test_decode_record() {
        let r: PerformanceRecord = serde_json::from_str(
            r#"{"atm_id":11,"atm_name":"ATM Braga","tier":"2","volume_trx":"500","fee":10000,"nominal_trx":null}"#,
        )
        .unwrap();
        assert_eq!(r.tier, Tier::new(2));
        assert_eq!(r.volume_trx, 500.0);
        assert_eq!(r.fee, 10000.0);
        assert_eq!(r.nominal_trx, 0.0);
        assert_eq!(r.display_name(), "ATM Braga");
    }

    #[test]
    fn test_row_with_own_id_and_atm_id() {
        let page: ListPage<PerformanceRecord> = decode_response(
            200,
            r#"{"data":[{"id":12,"atm_id":1,"code":"A1","atm_name":"ATM Braga","volume_trx":90}]}"#,
        )
        .unwrap();
        assert_eq!(page.items.len(), 1);
        assert_eq!(page.items[0].atm_id, 1);
        assert_eq!(page.items[0].display_name(), "ATM Braga");

        let only_id: PerformanceRecord = serde_json::from_str(r#"{"id":"7"}"#).unwrap();
        assert_eq!(only_id.atm_id, 7);
        assert!(serde_json::from_str::<PerformanceRecord>(r#"{"code":"A1"}"#).is_err());
    }
}

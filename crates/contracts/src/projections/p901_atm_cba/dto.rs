use serde::{Deserialize, Serialize};

use crate::domain::a001_atm::AtmCosts;
use crate::enums::Period;
use crate::shared::serde_helpers::{
    de_f64_or_zero, de_opt_f64, de_opt_i64, de_string_or_default, or_nonempty,
};

/// Cost-benefit figures of one machine in one period.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "CbaRecordWire")]
pub struct CbaRecord {
    pub atm_id: Option<i64>,
    pub name: String,
    pub code: String,
    pub period_id: Option<i64>,
    pub fee: f64,
    #[serde(flatten)]
    pub costs: AtmCosts,
    pub net_benefit: Option<f64>,
}

#[derive(Deserialize)]
struct CbaRecordWire {
    #[serde(default, deserialize_with = "de_opt_i64")]
    atm_id: Option<i64>,
    #[serde(default, deserialize_with = "de_string_or_default")]
    name: String,
    #[serde(default, deserialize_with = "de_string_or_default")]
    atm_name: String,
    #[serde(default, deserialize_with = "de_string_or_default")]
    code: String,
    #[serde(default, deserialize_with = "de_string_or_default")]
    atm_code: String,
    #[serde(default, deserialize_with = "de_opt_i64")]
    period_id: Option<i64>,
    #[serde(default, deserialize_with = "de_f64_or_zero")]
    fee: f64,
    #[serde(flatten)]
    costs: AtmCosts,
    #[serde(default, deserialize_with = "de_opt_f64")]
    net_benefit: Option<f64>,
}

impl From<CbaRecordWire> for CbaRecord {
    fn from(w: CbaRecordWire) -> Self {
        Self {
            atm_id: w.atm_id,
            name: or_nonempty(w.name, w.atm_name),
            code: or_nonempty(w.code, w.atm_code),
            period_id: w.period_id,
            fee: w.fee,
            costs: w.costs,
            net_benefit: w.net_benefit,
        }
    }
}

impl CbaRecord {
    pub fn total_cost(&self) -> f64 {
        self.costs.total()
    }

    /// Server figure when sent, `fee - total_cost` otherwise.
    pub fn net_benefit_or_derived(&self) -> f64 {
        self.net_benefit.unwrap_or_else(|| self.fee - self.total_cost())
    }

    pub fn is_profitable(&self) -> bool {
        self.net_benefit_or_derived() >= 0.0
    }
}

/// Query of `GET /atm-cba`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CbaQuery {
    pub period_id: u8,
    pub atm_id: i64,
}

impl CbaQuery {
    pub fn new(period: Period, atm_id: i64) -> Self {
        Self {
            period_id: period.id(),
            atm_id,
        }
    }

    pub fn to_query_string(&self) -> String {
        serde_qs::to_string(self).unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_derived_net_benefit() {
        let r: CbaRecord = serde_json::from_str(
            r#"{"atm_id":1,"fee":"1000000","rent_cost":400000,"electricity_cost":"100000"}"#,
        )
        .unwrap();
        assert_eq!(r.total_cost(), 500_000.0);
        assert_eq!(r.net_benefit_or_derived(), 500_000.0);
        assert!(r.is_profitable());
    }

    #[test]
    fn test_server_net_benefit_wins() {
        let r: CbaRecord =
            serde_json::from_str(r#"{"fee":100,"machine_cost":50,"net_benefit":-20}"#).unwrap();
        assert_eq!(r.net_benefit_or_derived(), -20.0);
        assert!(!r.is_profitable());
    }

    #[test]
    fn test_name_and_atm_name_together() {
        let r: CbaRecord =
            serde_json::from_str(r#"{"name":"","atm_name":"ATM Braga","atm_code":"A1","fee":1}"#)
                .unwrap();
        assert_eq!(r.name, "ATM Braga");
        assert_eq!(r.code, "A1");
    }

    #[test]
    fn test_query_string() {
        assert_eq!(CbaQuery::new(Period::Q2, 7).to_query_string(), "period_id=2&atm_id=7");
    }
}

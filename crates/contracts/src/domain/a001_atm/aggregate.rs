use serde::{Deserialize, Deserializer, Serialize};

use crate::enums::{MachineType, Tier};
use crate::shared::geo::LatLng;
use crate::shared::serde_helpers::{de_id, de_opt_f64, de_opt_i64, de_string_or_default};
use crate::enums::tier::deserialize_opt_tier;

/// Operating cost components of a machine (per period, in Rupiah).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AtmCosts {
    #[serde(default, deserialize_with = "de_opt_f64")]
    pub electricity_cost: Option<f64>,
    #[serde(default, deserialize_with = "de_opt_f64")]
    pub electronic_cost: Option<f64>,
    #[serde(default, deserialize_with = "de_opt_f64")]
    pub rent_cost: Option<f64>,
    #[serde(default, deserialize_with = "de_opt_f64")]
    pub machine_cost: Option<f64>,
    #[serde(default, deserialize_with = "de_opt_f64")]
    pub replenishment_cost: Option<f64>,
}

impl AtmCosts {
    /// Missing components count as zero.
    pub fn total(&self) -> f64 {
        self.components().iter().map(|(_, v)| v.unwrap_or(0.0)).sum()
    }

    /// (label, value) pairs in display order.
    pub fn components(&self) -> [(&'static str, Option<f64>); 5] {
        [
            ("Biaya Listrik", self.electricity_cost),
            ("Biaya Elektronik", self.electronic_cost),
            ("Biaya Sewa", self.rent_cost),
            ("Biaya Mesin", self.machine_cost),
            ("Biaya Replenishment", self.replenishment_cost),
        ]
    }
}

/// Reference to the owning branch as embedded in machine payloads.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BranchRef {
    #[serde(deserialize_with = "de_id")]
    pub id: i64,
    #[serde(default, deserialize_with = "de_string_or_default")]
    pub name: String,
    #[serde(default)]
    pub branch_code: Option<String>,
}

fn de_opt_machine_type<'de, D: Deserializer<'de>>(d: D) -> Result<Option<MachineType>, D::Error> {
    let raw = Option::<String>::deserialize(d)?;
    Ok(raw.as_deref().and_then(MachineType::from_code))
}

/// ATM/CRM machine.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Atm {
    #[serde(deserialize_with = "de_id")]
    pub id: i64,
    #[serde(default, deserialize_with = "de_string_or_default")]
    pub code: String,
    #[serde(default, deserialize_with = "de_string_or_default")]
    pub name: String,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default, deserialize_with = "de_opt_f64")]
    pub latitude: Option<f64>,
    #[serde(default, deserialize_with = "de_opt_f64")]
    pub longitude: Option<f64>,
    #[serde(default, rename = "type", deserialize_with = "de_opt_machine_type")]
    pub machine_type: Option<MachineType>,
    #[serde(default)]
    pub brand: Option<String>,
    #[serde(default, deserialize_with = "de_opt_i64")]
    pub branch_id: Option<i64>,
    #[serde(default)]
    pub branch: Option<BranchRef>,
    #[serde(default, deserialize_with = "deserialize_opt_tier")]
    pub tier: Option<Tier>,
    #[serde(flatten)]
    pub costs: AtmCosts,
}

impl Atm {
    pub fn position(&self) -> Option<LatLng> {
        LatLng::new(self.latitude?, self.longitude?)
    }

    pub fn branch_name(&self) -> &str {
        self.branch.as_ref().map(|b| b.name.as_str()).unwrap_or("-")
    }

    pub fn effective_branch_id(&self) -> Option<i64> {
        self.branch_id.or_else(|| self.branch.as_ref().map(|b| b.id))
    }
}

/// Payload of `POST /atms`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateAtmDto {
    pub code: String,
    pub name: String,
    pub address: String,
    #[serde(rename = "type")]
    pub machine_type: MachineType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub brand: Option<String>,
    pub branch_id: i64,
    pub latitude: f64,
    pub longitude: f64,
    #[serde(flatten)]
    pub costs: AtmCosts,
}

/// A single failed form field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    pub field: &'static str,
    pub message: String,
}

impl FieldError {
    fn required(field: &'static str, label: &str) -> Self {
        Self {
            field,
            message: format!("{} wajib diisi", label),
        }
    }
}

/// Raw create form, as typed by the user.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AtmForm {
    pub code: String,
    pub name: String,
    pub address: String,
    pub machine_type: String,
    pub brand: String,
    pub branch_id: Option<i64>,
    pub latitude: String,
    pub longitude: String,
    pub electricity_cost: String,
    pub electronic_cost: String,
    pub rent_cost: String,
    pub machine_cost: String,
    pub replenishment_cost: String,
}

fn parse_cost(
    field: &'static str,
    label: &str,
    raw: &str,
    errors: &mut Vec<FieldError>,
) -> Option<f64> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    match raw.replace('.', "").replace(',', ".").parse::<f64>() {
        Ok(v) if v >= 0.0 && v.is_finite() => Some(v),
        _ => {
            errors.push(FieldError {
                field,
                message: format!("{} harus berupa angka positif", label),
            });
            None
        }
    }
}

impl AtmForm {
    /// Check required fields and build the payload; reports every problem at once.
    pub fn validate(&self) -> Result<CreateAtmDto, Vec<FieldError>> {
        let mut errors = Vec::new();

        let text = |field: &'static str, label: &str, value: &str, errors: &mut Vec<FieldError>| {
            let v = value.trim();
            if v.is_empty() {
                errors.push(FieldError::required(field, label));
            }
            v.to_string()
        };

        let code = text("code", "Kode ATM", &self.code, &mut errors);
        let name = text("name", "Nama", &self.name, &mut errors);
        let address = text("address", "Alamat", &self.address, &mut errors);

        let machine_type = if self.machine_type.trim().is_empty() {
            errors.push(FieldError::required("type", "Tipe mesin"));
            None
        } else {
            let parsed = MachineType::from_code(&self.machine_type);
            if parsed.is_none() {
                errors.push(FieldError {
                    field: "type",
                    message: "Tipe mesin tidak dikenal".to_string(),
                });
            }
            parsed
        };

        if self.branch_id.is_none() {
            errors.push(FieldError::required("branch_id", "Cabang"));
        }

        let position = if self.latitude.trim().is_empty() || self.longitude.trim().is_empty() {
            errors.push(FieldError::required("coordinates", "Koordinat"));
            None
        } else {
            let parsed = LatLng::parse(&self.latitude, &self.longitude);
            if parsed.is_none() {
                errors.push(FieldError {
                    field: "coordinates",
                    message: "Koordinat tidak valid".to_string(),
                });
            }
            parsed
        };

        let costs = AtmCosts {
            electricity_cost: parse_cost("electricity_cost", "Biaya listrik", &self.electricity_cost, &mut errors),
            electronic_cost: parse_cost("electronic_cost", "Biaya elektronik", &self.electronic_cost, &mut errors),
            rent_cost: parse_cost("rent_cost", "Biaya sewa", &self.rent_cost, &mut errors),
            machine_cost: parse_cost("machine_cost", "Biaya mesin", &self.machine_cost, &mut errors),
            replenishment_cost: parse_cost(
                "replenishment_cost",
                "Biaya replenishment",
                &self.replenishment_cost,
                &mut errors,
            ),
        };

        match (machine_type, self.branch_id, position) {
            (Some(machine_type), Some(branch_id), Some(position)) if errors.is_empty() => {
                Ok(CreateAtmDto {
                    code,
                    name,
                    address,
                    machine_type,
                    brand: Some(self.brand.trim().to_string()).filter(|b| !b.is_empty()),
                    branch_id,
                    latitude: position.lat,
                    longitude: position.lng,
                    costs,
                })
            }
            _ => Err(errors),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filled_form() -> AtmForm {
        AtmForm {
            code: "ATM-001".into(),
            name: "ATM Dago".into(),
            address: "Jl. Ir. H. Juanda No. 1".into(),
            machine_type: "CRM".into(),
            brand: "Hyosung".into(),
            branch_id: Some(6),
            latitude: "-6.8915".into(),
            longitude: "107.6107".into(),
            rent_cost: "2.500.000".into(),
            ..Default::default()
        }
    }

    #[test]
    fn test_valid_form() {
        let dto = filled_form().validate().unwrap();
        assert_eq!(dto.machine_type, MachineType::Crm);
        assert_eq!(dto.branch_id, 6);
        assert_eq!(dto.costs.rent_cost, Some(2_500_000.0));
        assert_eq!(dto.costs.electricity_cost, None);
    }

    #[test]
    fn test_reports_all_missing_fields() {
        let errors = AtmForm::default().validate().unwrap_err();
        let fields: Vec<_> = errors.iter().map(|e| e.field).collect();
        assert_eq!(
            fields,
            vec!["code", "name", "address", "type", "branch_id", "coordinates"]
        );
    }

    #[test]
    fn test_bad_numbers() {
        let mut form = filled_form();
        form.latitude = "-95".into();
        form.machine_cost = "abc".into();
        let errors = form.validate().unwrap_err();
        assert!(errors.iter().any(|e| e.field == "coordinates"));
        assert!(errors.iter().any(|e| e.field == "machine_cost"));
    }

    #[test]
    fn test_decode_machine_payload() {
        let atm: Atm = serde_json::from_str(
            r#"{"id":"5","code":"A5","name":"ATM Braga","latitude":"-6.917","longitude":107.609,
                "type":"atm","tier":3,"branch":{"id":6,"name":"KC Braga"},"rent_cost":"1000"}"#,
        )
        .unwrap();
        assert_eq!(atm.id, 5);
        assert_eq!(atm.machine_type, Some(MachineType::Atm));
        assert_eq!(atm.tier, Tier::new(3));
        assert_eq!(atm.effective_branch_id(), Some(6));
        assert_eq!(atm.branch_name(), "KC Braga");
        assert_eq!(atm.costs.rent_cost, Some(1000.0));
        assert!(atm.position().is_some());
    }

    #[test]
    fn test_costs_total_ignores_missing() {
        let costs = AtmCosts {
            electricity_cost: Some(100.0),
            rent_cost: Some(50.0),
            ..Default::default()
        };
        assert_eq!(costs.total(), 150.0);
    }
}

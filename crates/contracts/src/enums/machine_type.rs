use serde::{Deserialize, Serialize};

/// Kind of managed machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MachineType {
    #[serde(rename = "ATM", alias = "atm")]
    Atm,
    #[serde(rename = "CRM", alias = "crm")]
    Crm,
}

impl MachineType {
    /// Value used in the `type` query parameter and payloads.
    pub fn code(&self) -> &'static str {
        match self {
            MachineType::Atm => "ATM",
            MachineType::Crm => "CRM",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            MachineType::Atm => "ATM (Tarik Tunai)",
            MachineType::Crm => "CRM (Setor Tarik)",
        }
    }

    pub fn all() -> [MachineType; 2] {
        [MachineType::Atm, MachineType::Crm]
    }

    pub fn from_code(code: &str) -> Option<Self> {
        match code.trim().to_uppercase().as_str() {
            "ATM" => Some(MachineType::Atm),
            "CRM" => Some(MachineType::Crm),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_codes() {
        for t in MachineType::all() {
            assert_eq!(MachineType::from_code(t.code()), Some(t));
        }
        assert_eq!(MachineType::from_code(" crm "), Some(MachineType::Crm));
        assert_eq!(MachineType::from_code("teller"), None);
    }

    #[test]
    fn test_serde_accepts_lowercase() {
        let t: MachineType = serde_json::from_str("\"atm\"").unwrap();
        assert_eq!(t, MachineType::Atm);
        assert_eq!(serde_json::to_string(&MachineType::Crm).unwrap(), "\"CRM\"");
    }
}

use serde::{Deserialize, Serialize};

/// Fixed quarterly buckets used by every performance and CBA query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Period {
    #[default]
    Q1,
    Q2,
    Q3,
    Q4,
}

impl Period {
    /// Id sent as `period_id`.
    pub fn id(&self) -> u8 {
        match self {
            Period::Q1 => 1,
            Period::Q2 => 2,
            Period::Q3 => 3,
            Period::Q4 => 4,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Period::Q1 => "Januari - Maret",
            Period::Q2 => "April - Juni",
            Period::Q3 => "Juli - September",
            Period::Q4 => "Oktober - Desember",
        }
    }

    pub fn short_label(&self) -> &'static str {
        match self {
            Period::Q1 => "Q1",
            Period::Q2 => "Q2",
            Period::Q3 => "Q3",
            Period::Q4 => "Q4",
        }
    }

    pub fn all() -> [Period; 4] {
        [Period::Q1, Period::Q2, Period::Q3, Period::Q4]
    }

    pub fn from_id(id: u8) -> Option<Self> {
        Period::all().into_iter().find(|p| p.id() == id)
    }

    pub fn from_label(label: &str) -> Option<Self> {
        let label = label.trim();
        Period::all()
            .into_iter()
            .find(|p| p.label() == label || p.short_label() == label)
    }
}

/// Total: any unknown label resolves to period 1.
pub fn get_period_id(label: &str) -> u8 {
    Period::from_label(label).unwrap_or_default().id()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_labels() {
        assert_eq!(get_period_id("Januari - Maret"), 1);
        assert_eq!(get_period_id("April - Juni"), 2);
        assert_eq!(get_period_id("Juli - September"), 3);
        assert_eq!(get_period_id("Oktober - Desember"), 4);
    }

    #[test]
    fn test_unknown_labels_fall_back_to_one() {
        for label in ["", "Q5", "januari - maret", "2024", "Oktober-Desember"] {
            assert_eq!(get_period_id(label), 1, "label {:?}", label);
        }
    }

    #[test]
    fn test_id_round_trip() {
        for p in Period::all() {
            assert_eq!(Period::from_id(p.id()), Some(p));
            assert_eq!(get_period_id(p.label()), p.id());
        }
        assert_eq!(Period::from_id(0), None);
        assert_eq!(Period::from_id(5), None);
    }
}

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Performance bucket of a machine, 0 (best) .. 4.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Tier(u8);

/// Colors and label for a tier badge or map marker.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TierStyle {
    pub label: &'static str,
    pub color: &'static str,
    pub background: &'static str,
}

pub const DEFAULT_TIER_STYLE: TierStyle = TierStyle {
    label: "N/A",
    color: "#6b7280",
    background: "#f3f4f6",
};

const TIER_STYLES: [TierStyle; 5] = [
    TierStyle {
        label: "TIER 0",
        color: "#7c3aed",
        background: "#ede9fe",
    },
    TierStyle {
        label: "TIER 1",
        color: "#16a34a",
        background: "#dcfce7",
    },
    TierStyle {
        label: "TIER 2",
        color: "#2563eb",
        background: "#dbeafe",
    },
    TierStyle {
        label: "TIER 3",
        color: "#d97706",
        background: "#fef3c7",
    },
    TierStyle {
        label: "TIER 4",
        color: "#dc2626",
        background: "#fee2e2",
    },
];

impl Tier {
    pub const MAX: u8 = 4;

    pub fn new(code: u8) -> Option<Self> {
        (code <= Self::MAX).then_some(Tier(code))
    }

    /// Codes above the range saturate to the worst tier.
    pub const fn clamped(code: u8) -> Self {
        Tier(if code > Self::MAX { Self::MAX } else { code })
    }

    pub fn code(&self) -> u8 {
        self.0
    }

    pub fn style(&self) -> TierStyle {
        TIER_STYLES[self.0 as usize]
    }

    pub fn label(&self) -> &'static str {
        self.style().label
    }

    pub fn all() -> impl Iterator<Item = Tier> {
        (0..=Self::MAX).map(Tier)
    }
}

impl Serialize for Tier {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u8(self.0)
    }
}

impl<'de> Deserialize<'de> for Tier {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let code = u8::deserialize(deserializer)?;
        Tier::new(code).ok_or_else(|| serde::de::Error::custom(format!("tier out of range: {}", code)))
    }
}

/// Backend sends tiers as numbers, numeric strings, or null.
/// Anything unrecognized deserializes to `None` on an `Option<Tier>` field
/// instead of failing the whole payload.
pub fn deserialize_opt_tier<'de, D>(deserializer: D) -> Result<Option<Tier>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(raw.and_then(|v| match v {
        serde_json::Value::Number(n) => n.as_i64().and_then(|n| TierInput::Number(n).tier()),
        serde_json::Value::String(s) => TierInput::Text(&s).tier(),
        _ => None,
    }))
}

/// A tier as it arrives from JSON or UI code.
#[derive(Debug, Clone, PartialEq)]
pub enum TierInput<'a> {
    Number(i64),
    Text(&'a str),
}

impl<'a> TierInput<'a> {
    pub fn tier(&self) -> Option<Tier> {
        match self {
            TierInput::Number(n) => u8::try_from(*n).ok().and_then(Tier::new),
            TierInput::Text(s) => {
                let s = s.trim();
                let digits = s
                    .strip_prefix("TIER")
                    .or_else(|| s.strip_prefix("Tier"))
                    .or_else(|| s.strip_prefix("tier"))
                    .unwrap_or(s)
                    .trim();
                digits.parse::<u8>().ok().and_then(Tier::new)
            }
        }
    }
}

impl From<i64> for TierInput<'static> {
    fn from(n: i64) -> Self {
        TierInput::Number(n)
    }
}

impl<'a> From<&'a str> for TierInput<'a> {
    fn from(s: &'a str) -> Self {
        TierInput::Text(s)
    }
}

/// Badge style for a tier given as number or string; gray for anything else.
pub fn get_tier_styles<'a>(input: impl Into<TierInput<'a>>) -> TierStyle {
    input
        .into()
        .tier()
        .map(|t| t.style())
        .unwrap_or(DEFAULT_TIER_STYLE)
}

pub fn get_tier_color<'a>(input: impl Into<TierInput<'a>>) -> &'static str {
    get_tier_styles(input).color
}

/// Style for an optional, already parsed tier.
pub fn tier_style_of(tier: Option<Tier>) -> TierStyle {
    tier.map(|t| t.style()).unwrap_or(DEFAULT_TIER_STYLE)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_number_and_string_are_symmetric() {
        for code in 0..=4i64 {
            let s = code.to_string();
            assert_eq!(get_tier_styles(code), get_tier_styles(s.as_str()));
            assert_eq!(get_tier_color(code), get_tier_color(s.as_str()));
            assert_eq!(get_tier_styles(code).label, format!("TIER {}", code));
        }
    }

    #[test]
    fn test_unrecognized_falls_back_to_gray() {
        for input in [TierInput::Number(-1), TierInput::Number(5), TierInput::Number(99)] {
            assert_eq!(get_tier_styles(input), DEFAULT_TIER_STYLE);
        }
        for s in ["", "five", "6", "-1", "2.5"] {
            assert_eq!(get_tier_styles(s), DEFAULT_TIER_STYLE, "input {:?}", s);
        }
        assert_eq!(get_tier_color(7i64), "#6b7280");
    }

    #[test]
    fn test_prefixed_text() {
        assert_eq!(get_tier_styles("TIER 3").label, "TIER 3");
        assert_eq!(get_tier_styles("tier 1").label, "TIER 1");
    }

    #[test]
    fn test_deserialize_optional_tier() {
        #[derive(serde::Deserialize)]
        struct Row {
            #[serde(default, deserialize_with = "deserialize_opt_tier")]
            tier: Option<Tier>,
        }
        let parse = |s: &str| serde_json::from_str::<Row>(s).unwrap().tier;
        assert_eq!(parse(r#"{"tier":2}"#), Tier::new(2));
        assert_eq!(parse(r#"{"tier":"4"}"#), Tier::new(4));
        assert_eq!(parse(r#"{"tier":9}"#), None);
        assert_eq!(parse(r#"{"tier":null}"#), None);
        assert_eq!(parse(r#"{}"#), None);
    }
}

use serde::{Deserialize, Serialize};

/// Kind of public place found around a relocation candidate.
///
/// Mapping is total: categories without a keyword land in `Other`, which the
/// wizard shows as its own group.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PlaceCategory {
    Education,
    Health,
    Worship,
    Shopping,
    Transport,
    Office,
    Food,
    Lodging,
    Government,
    Other(String),
}

/// First match wins, so more specific keywords come before generic ones.
const KEYWORDS: &[(&str, PlaceCategory)] = &[
    ("university", PlaceCategory::Education),
    ("school", PlaceCategory::Education),
    ("sekolah", PlaceCategory::Education),
    ("kampus", PlaceCategory::Education),
    ("hospital", PlaceCategory::Health),
    ("rumah sakit", PlaceCategory::Health),
    ("clinic", PlaceCategory::Health),
    ("klinik", PlaceCategory::Health),
    ("pharmacy", PlaceCategory::Health),
    ("apotek", PlaceCategory::Health),
    ("mosque", PlaceCategory::Worship),
    ("masjid", PlaceCategory::Worship),
    ("church", PlaceCategory::Worship),
    ("gereja", PlaceCategory::Worship),
    ("place_of_worship", PlaceCategory::Worship),
    ("shopping_mall", PlaceCategory::Shopping),
    ("mall", PlaceCategory::Shopping),
    ("supermarket", PlaceCategory::Shopping),
    ("market", PlaceCategory::Shopping),
    ("pasar", PlaceCategory::Shopping),
    ("store", PlaceCategory::Shopping),
    ("city_hall", PlaceCategory::Government),
    ("local_government_office", PlaceCategory::Government),
    ("kantor pemerintah", PlaceCategory::Government),
    ("police", PlaceCategory::Government),
    ("fire_station", PlaceCategory::Government),
    ("station", PlaceCategory::Transport),
    ("stasiun", PlaceCategory::Transport),
    ("terminal", PlaceCategory::Transport),
    ("airport", PlaceCategory::Transport),
    ("spbu", PlaceCategory::Transport),
    ("office", PlaceCategory::Office),
    ("kantor", PlaceCategory::Office),
    ("restaurant", PlaceCategory::Food),
    ("cafe", PlaceCategory::Food),
    ("food", PlaceCategory::Food),
    ("rumah makan", PlaceCategory::Food),
    ("hotel", PlaceCategory::Lodging),
    ("lodging", PlaceCategory::Lodging),
    ("penginapan", PlaceCategory::Lodging),
];

impl PlaceCategory {
    /// Classify a raw provider category string.
    pub fn classify(raw: &str) -> PlaceCategory {
        let normalized = raw.trim().to_lowercase();
        KEYWORDS
            .iter()
            .find(|(keyword, _)| normalized.contains(keyword))
            .map(|(_, category)| category.clone())
            .unwrap_or_else(|| PlaceCategory::Other(raw.trim().to_string()))
    }

    pub fn label(&self) -> &str {
        match self {
            PlaceCategory::Education => "Pendidikan",
            PlaceCategory::Health => "Kesehatan",
            PlaceCategory::Worship => "Tempat Ibadah",
            PlaceCategory::Shopping => "Perbelanjaan",
            PlaceCategory::Transport => "Transportasi",
            PlaceCategory::Office => "Perkantoran",
            PlaceCategory::Food => "Kuliner",
            PlaceCategory::Lodging => "Penginapan",
            PlaceCategory::Government => "Pemerintahan",
            PlaceCategory::Other(_) => "Lainnya",
        }
    }

    /// Stable key, all `Other` values share one group.
    pub fn key(&self) -> &'static str {
        match self {
            PlaceCategory::Education => "education",
            PlaceCategory::Health => "health",
            PlaceCategory::Worship => "worship",
            PlaceCategory::Shopping => "shopping",
            PlaceCategory::Transport => "transport",
            PlaceCategory::Office => "office",
            PlaceCategory::Food => "food",
            PlaceCategory::Lodging => "lodging",
            PlaceCategory::Government => "government",
            PlaceCategory::Other(_) => "other",
        }
    }

    /// Display order of groups, `Other` last.
    pub fn groups() -> [PlaceCategory; 10] {
        [
            PlaceCategory::Shopping,
            PlaceCategory::Education,
            PlaceCategory::Health,
            PlaceCategory::Worship,
            PlaceCategory::Transport,
            PlaceCategory::Office,
            PlaceCategory::Government,
            PlaceCategory::Food,
            PlaceCategory::Lodging,
            PlaceCategory::Other(String::new()),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keyword_matching() {
        assert_eq!(PlaceCategory::classify("shopping_mall"), PlaceCategory::Shopping);
        assert_eq!(PlaceCategory::classify("Pasar Tradisional"), PlaceCategory::Shopping);
        assert_eq!(PlaceCategory::classify("SD Negeri / School"), PlaceCategory::Education);
        assert_eq!(PlaceCategory::classify("Rumah Sakit Umum"), PlaceCategory::Health);
        assert_eq!(PlaceCategory::classify("train_station"), PlaceCategory::Transport);
        assert_eq!(PlaceCategory::classify("gas_station"), PlaceCategory::Transport);
        assert_eq!(PlaceCategory::classify("police_station"), PlaceCategory::Government);
        assert_eq!(PlaceCategory::classify("fire_station"), PlaceCategory::Government);
        assert_eq!(PlaceCategory::classify("city_hall"), PlaceCategory::Government);
        assert_eq!(PlaceCategory::classify("Kantor Cabang"), PlaceCategory::Office);
    }

    #[test]
    fn test_no_keyword_is_shadowed() {
        for (keyword, category) in KEYWORDS {
            assert_eq!(&PlaceCategory::classify(keyword), category, "{}", keyword);
        }
    }

    #[test]
    fn test_unmatched_is_visible() {
        let c = PlaceCategory::classify("  amusement_park ");
        assert_eq!(c, PlaceCategory::Other("amusement_park".to_string()));
        assert_eq!(c.key(), "other");
        assert_eq!(c.label(), "Lainnya");
    }

    #[test]
    fn test_every_group_has_distinct_key() {
        let mut keys: Vec<_> = PlaceCategory::groups().iter().map(|c| c.key()).collect();
        keys.sort();
        keys.dedup();
        assert_eq!(keys.len(), PlaceCategory::groups().len());
    }
}

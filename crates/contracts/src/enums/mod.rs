pub mod machine_type;
pub mod period;
pub mod place_category;
pub mod tier;

pub use machine_type::MachineType;
pub use period::{get_period_id, Period};
pub use place_category::PlaceCategory;
pub use tier::{get_tier_color, get_tier_styles, Tier, TierInput, TierStyle};

pub mod dto;

pub use dto::{CbaQuery, CbaRecord};

pub mod dto;

pub use dto::{PerformanceQuery, PerformanceRecord};

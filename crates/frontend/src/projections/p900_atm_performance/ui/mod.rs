pub mod report;
pub mod view_model;

pub use report::PerformanceReport;

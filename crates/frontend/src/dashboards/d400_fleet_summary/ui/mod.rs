pub mod dashboard;
mod widget;

pub use dashboard::FleetSummaryDashboard;

pub mod d400_fleet_summary;
pub mod d401_map_view;

pub use d400_fleet_summary::ui::FleetSummaryDashboard;
pub use d401_map_view::ui::MapView;

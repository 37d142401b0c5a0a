pub mod d400_fleet_summary;

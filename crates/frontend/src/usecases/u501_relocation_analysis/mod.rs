pub mod api;
mod location;
mod results;
pub mod view;

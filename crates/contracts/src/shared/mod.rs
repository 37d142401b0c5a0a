pub mod api_error;
pub mod envelope;
pub mod geo;
pub mod pagination;
pub mod serde_helpers;

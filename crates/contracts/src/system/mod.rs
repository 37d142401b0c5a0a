pub mod auth;
pub mod maps;

pub mod auth;
pub mod maps;
pub mod pages;

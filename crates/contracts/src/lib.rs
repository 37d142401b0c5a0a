//! Wire types and pure helpers shared by the ATM fleet dashboard.

pub mod dashboards;
pub mod domain;
pub mod enums;
pub mod projections;
pub mod shared;
pub mod system;
pub mod usecases;

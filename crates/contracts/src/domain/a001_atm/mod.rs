pub mod aggregate;
pub mod query;

pub use aggregate::{Atm, AtmCosts, AtmForm, BranchRef, CreateAtmDto, FieldError};
pub use query::AtmListQuery;

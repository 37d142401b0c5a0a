pub mod aggregate;

pub use aggregate::{Branch, BranchLevel, BranchTree};

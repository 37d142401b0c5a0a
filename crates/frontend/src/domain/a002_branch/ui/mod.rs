pub mod picker;
pub mod tree;

pub mod a001_atm;
pub mod a002_branch;
pub mod a003_relocation;

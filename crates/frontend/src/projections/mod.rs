pub mod p900_atm_performance;
pub mod p901_atm_cba;

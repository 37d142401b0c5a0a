pub mod u501_relocation_analysis;

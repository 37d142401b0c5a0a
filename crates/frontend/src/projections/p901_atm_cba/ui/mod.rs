mod report;

pub use report::CbaReport;

mod report;
mod report_category;

pub use report::{CreateReport, Report};
pub use report_category::ReportCategory;

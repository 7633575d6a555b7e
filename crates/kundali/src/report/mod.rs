pub mod json_dir;
pub mod source;
pub mod types;

pub use json_dir::JsonDirSource;
pub use source::{fetch_report, ReportSection, ReportSections, ReportSource, SectionFailure};
pub use types::{ChartData, ChartsResponse};

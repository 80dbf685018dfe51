pub mod ingest;
pub mod report;

pub use ingest::IngestRequest;
pub use report::{CountsResponse, ReportQuery, ReportResponse};

mod health;
mod ingest;
mod report;

pub use health::health_check;
pub use ingest::ingest_event;
pub use report::get_report;

pub mod event_processor;
pub mod hourly_stats_repository;
pub mod reference_data_repository;

pub use event_processor::EventProcessor;
pub use hourly_stats_repository::HourlyStatsRepository;
pub use reference_data_repository::{ReferenceData, ReferenceDataRepository};

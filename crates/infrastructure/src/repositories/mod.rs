pub mod hourly_stats_repository;
pub mod reference_data_repository;

pub use hourly_stats_repository::SqliteHourlyStatsRepository;
pub use reference_data_repository::SqliteReferenceDataRepository;

use sqlx::SqlitePool;
use std::sync::Arc;
use tollgate_application::ports::{HourlyStatsRepository, ReferenceDataRepository};
use tollgate_infrastructure::repositories::{
    SqliteHourlyStatsRepository, SqliteReferenceDataRepository,
};

pub struct Repositories {
    pub reference_data: Arc<dyn ReferenceDataRepository>,
    pub hourly_stats: Arc<dyn HourlyStatsRepository>,
}

impl Repositories {
    pub fn new(pool: SqlitePool) -> Self {
        Self {
            reference_data: Arc::new(SqliteReferenceDataRepository::new(pool.clone())),
            hourly_stats: Arc::new(SqliteHourlyStatsRepository::new(pool)),
        }
    }
}

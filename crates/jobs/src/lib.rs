pub mod reference_reload;
pub mod runner;
pub mod stats_flush;

pub use reference_reload::ReferenceReloadJob;
pub use runner::JobRunner;
pub use stats_flush::StatsFlushJob;

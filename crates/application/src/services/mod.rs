pub mod reference_cache;
pub mod stats_aggregator;

pub use reference_cache::{ReferenceCache, ReferenceSnapshot};
pub use stats_aggregator::StatsAggregator;

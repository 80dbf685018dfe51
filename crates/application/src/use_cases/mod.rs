pub mod admission;

pub use admission::IngestEventUseCase;

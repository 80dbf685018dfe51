mod ingest_event;

pub use ingest_event::IngestEventUseCase;

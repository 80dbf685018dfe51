pub mod logging_event_processor;

pub use logging_event_processor::LoggingEventProcessor;

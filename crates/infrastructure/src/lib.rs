//! Tollgate Infrastructure Layer
//!
//! SQLite-backed implementations of the application ports plus the
//! downstream event processor.
pub mod database;
pub mod processing;
pub mod repositories;

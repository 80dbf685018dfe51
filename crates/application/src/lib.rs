//! Tollgate Application Layer
//!
//! Ports to the backing store plus the in-memory admission core: the
//! reloadable reference cache, the stats aggregator and the admission
//! pipeline that consults both once per event.
pub mod ports;
pub mod services;
pub mod use_cases;

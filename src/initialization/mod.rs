//! Application initialization.
//!
//! Process-wide setup that must happen once before any operation runs.

mod logger;

pub use logger::init_logger_with;

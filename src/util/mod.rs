//! Utility modules for dataforge

pub mod logging;

pub use logging::{init_logging, LoggingConfig};

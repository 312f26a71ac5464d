//! Ambient helpers.

pub mod logger;

pub use logger::setup_logger;

//! Process-wide tracing/logging setup.

pub mod logging;

pub use logging::{init, init_with, LogFormat};

//! Foncii Infrastructure Library
//!
//! Process-level concerns shared by the binaries: tracing subscriber setup
//! and shutdown.

pub mod telemetry;

pub use telemetry::{init_telemetry, shutdown_telemetry, DEFAULT_LOG_FILTER};

//! # metlab-observability
//!
//! Tracing subscriber setup driven by `[observability]` config and
//! `METLAB_LOG`, structured events for the operations users care about, and
//! span macros for the recommend / catalog / export paths.

pub mod tracing_setup;

pub use tracing_setup::{build_filter, init_tracing, init_tracing_with_filter};

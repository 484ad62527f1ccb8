//! Command-line driver for the class field analysis.
//!
//! - `args` - `tsz-classinfo` arguments
//! - `driver` - Input discovery and per-file analysis
//! - `reporter` - Text, JSON and diagnostic rendering
//! - `tracing_config` - `TSZ_LOG` subscriber setup

pub mod args;
pub mod driver;
pub mod reporter;
pub mod tracing_config;

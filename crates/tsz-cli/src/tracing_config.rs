//! Tracing setup for `tsz-classinfo`.
//!
//! `TSZ_LOG` (or `RUST_LOG`) selects what is logged, `TSZ_LOG_FORMAT` how:
//!
//! - `text` (default): flat `tracing-subscriber` lines
//! - `tree`: indented spans via `tracing-tree`
//! - `json`: one JSON object per event
//!
//! ```bash
//! # every member classification of every class
//! TSZ_LOG=tsz_class_fields=trace TSZ_LOG_FORMAT=tree tsz-classinfo src/
//!
//! # per-file and per-class summaries as JSON
//! TSZ_LOG=debug TSZ_LOG_FORMAT=json tsz-classinfo a.ts
//! ```
//!
//! Nothing is installed unless one of the filter variables is set.

use tracing_subscriber::prelude::*;
use tracing_subscriber::{EnvFilter, Registry, fmt};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Text,
    Tree,
    Json,
}

impl LogFormat {
    /// Parse a `TSZ_LOG_FORMAT` value; anything unknown is `Text`.
    pub fn parse(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "tree" => Self::Tree,
            "json" => Self::Json,
            _ => Self::Text,
        }
    }

    fn from_env() -> Self {
        Self::parse(&std::env::var("TSZ_LOG_FORMAT").unwrap_or_default())
    }
}

/// `TSZ_LOG` wins over `RUST_LOG`; `None` when neither is set.
fn build_filter() -> Option<EnvFilter> {
    match std::env::var("TSZ_LOG") {
        Ok(directives) => Some(EnvFilter::builder().parse_lossy(directives)),
        Err(_) if std::env::var_os("RUST_LOG").is_some() => Some(EnvFilter::from_default_env()),
        Err(_) => None,
    }
}

/// Install the global subscriber, writing to stderr so stdout stays
/// parseable under `--json`.
pub fn init_tracing() {
    let Some(filter) = build_filter() else {
        return;
    };

    match LogFormat::from_env() {
        LogFormat::Tree => {
            let tree_layer = tracing_tree::HierarchicalLayer::default()
                .with_indent_amount(2)
                .with_indent_lines(true)
                .with_deferred_spans(true)
                .with_targets(true)
                .with_writer(std::io::stderr);
            Registry::default().with(filter).with(tree_layer).init();
        }
        LogFormat::Json => {
            let json_layer = fmt::layer().json().with_writer(std::io::stderr);
            Registry::default().with(filter).with(json_layer).init();
        }
        LogFormat::Text => {
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_writer(std::io::stderr)
                .init();
        }
    }
}

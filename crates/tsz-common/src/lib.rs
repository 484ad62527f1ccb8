//! Common types and utilities for the tsz class-field transform.
//!
//! This crate provides foundational types used across all tsz crates:
//! - Diagnostics (`Diagnostic`, `DiagnosticCategory`, message templates)
//! - Line/character positions for byte offsets (`LineMap`, `Position`)

// Diagnostic types and the message table
pub mod diagnostics;
pub use diagnostics::{Diagnostic, DiagnosticCategory};

// Position types for line/column source locations
pub mod position;
pub use position::{LineMap, Position};

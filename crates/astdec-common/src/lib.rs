//! Common types for the astdec decorator transform crates.
//!
//! This crate provides the foundational types used across the workspace:
//! - Diagnostics (`Diagnostic`, `DiagnosticCategory`) handed back to the host
//! - Diagnostic codes for every error the transform core can raise

pub mod diagnostics;
pub use diagnostics::{Diagnostic, DiagnosticCategory, diagnostic_codes};

//! Diagnostic types surfaced to the host compilation driver.
//!
//! The transform core never recovers from an error; the driver receives a
//! single `Diagnostic` per aborted compilation unit and decides whether to stop
//! the whole run or only the offending file.

use serde::Serialize;

// =============================================================================
// Diagnostic Types
// =============================================================================

/// Diagnostic category.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum DiagnosticCategory {
    Warning = 0,
    Error = 1,
    Suggestion = 2,
    Message = 3,
}

/// Related information for a diagnostic (e.g. the member a decorator was attached to).
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct DiagnosticRelatedInformation {
    pub file: String,
    pub start: u32,
    pub length: u32,
    pub message_text: String,
    pub category: DiagnosticCategory,
    pub code: u32,
}

/// A transform diagnostic with optional related information.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Diagnostic {
    pub file: String,
    pub start: u32,
    pub length: u32,
    pub message_text: String,
    pub category: DiagnosticCategory,
    pub code: u32,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub related_information: Vec<DiagnosticRelatedInformation>,
}

impl Diagnostic {
    /// Create a new error diagnostic.
    #[must_use]
    pub fn error(
        file: impl Into<String>,
        start: u32,
        length: u32,
        message: impl Into<String>,
        code: u32,
    ) -> Self {
        Self {
            file: file.into(),
            start,
            length,
            message_text: message.into(),
            category: DiagnosticCategory::Error,
            code,
            related_information: Vec::new(),
        }
    }

    /// Add related information to this diagnostic.
    #[must_use]
    pub fn with_related(
        mut self,
        file: impl Into<String>,
        start: u32,
        length: u32,
        message: impl Into<String>,
    ) -> Self {
        self.related_information.push(DiagnosticRelatedInformation {
            file: file.into(),
            start,
            length,
            message_text: message.into(),
            category: DiagnosticCategory::Message,
            code: 0,
        });
        self
    }

    #[must_use]
    pub const fn is_error(&self) -> bool {
        matches!(self.category, DiagnosticCategory::Error)
    }
}

/// Stable codes for transform diagnostics.
pub mod diagnostic_codes {
    pub const INVALID_DECORATOR_TARGET: u32 = 9001;
    pub const INVALID_ACCESSOR_INTERCEPTOR: u32 = 9002;
    pub const INTERCEPTOR_NOT_DEFINED: u32 = 9003;
    pub const INTERCEPTOR_NOT_A_FUNCTION: u32 = 9004;
    pub const UNRESOLVED_DECORATOR_OWNER: u32 = 9005;
    pub const TRANSFORMER_CONFIGURATION: u32 = 9006;
}

#[cfg(test)]
#[path = "../tests/diagnostics.rs"]
mod tests;

//! Errors raised by the transform core.
//!
//! Every error is synchronous and aborts the compilation unit. Transformers
//! validate before they mutate, so an `Err` always leaves the tree as it was.

use astdec_ast::{NodeArena, NodeIndex};
use astdec_common::{Diagnostic, diagnostic_codes};
use std::fmt;
use thiserror::Error;

pub type Result<T, E = TransformError> = std::result::Result<T, E>;

/// Member shape a transformer can be applied to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TargetShape {
    Property,
    Method,
}

impl fmt::Display for TargetShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Property => "property",
            Self::Method => "method",
        })
    }
}

#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum TransformError {
    #[error("Applying @{decorator} decorator to something other than {expected} is not allowed")]
    InvalidTarget {
        decorator: &'static str,
        expected: TargetShape,
    },

    #[error("Accessor interceptor can only be function, free variable or object property")]
    InvalidInterceptor,

    #[error("{0} is not defined")]
    InterceptorNotDefined(String),

    #[error("{0} is not a function")]
    InterceptorNotFunction(String),

    #[error("Decorator @{decorator} is not attached to a member of a class")]
    Resolution { decorator: String },

    #[error(transparent)]
    Configuration(#[from] ConfigurationError),
}

#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum ConfigurationError {
    #[error(
        "Storage \"{storage}\" for accessor \"{member}\" collides with an existing class member; \
         use a different privacy level or set publicStorageSuffix"
    )]
    StorageCollision { member: String, storage: String },

    #[error("Cannot derive a storage name for a computed member key")]
    UnnamedMember,

    #[error("Invalid module pattern \"{pattern}\": {message}")]
    InvalidPattern { pattern: String, message: String },
}

impl TransformError {
    pub const fn code(&self) -> u32 {
        match self {
            Self::InvalidTarget { .. } => diagnostic_codes::INVALID_DECORATOR_TARGET,
            Self::InvalidInterceptor => diagnostic_codes::INVALID_ACCESSOR_INTERCEPTOR,
            Self::InterceptorNotDefined(_) => diagnostic_codes::INTERCEPTOR_NOT_DEFINED,
            Self::InterceptorNotFunction(_) => diagnostic_codes::INTERCEPTOR_NOT_A_FUNCTION,
            Self::Resolution { .. } => diagnostic_codes::UNRESOLVED_DECORATOR_OWNER,
            Self::Configuration(_) => diagnostic_codes::TRANSFORMER_CONFIGURATION,
        }
    }

    /// Diagnostic positioned on `at` (usually the decorator being processed).
    pub fn to_diagnostic(&self, file: &str, arena: &NodeArena, at: NodeIndex) -> Diagnostic {
        let (start, end) = arena.get(at).map_or((0, 0), |node| (node.pos, node.end));
        Diagnostic::error(
            file,
            start,
            end.saturating_sub(start),
            self.to_string(),
            self.code(),
        )
    }
}

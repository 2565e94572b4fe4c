//! Decorator transforms.
//!
//! Rewrites decorated class members into plain declarations:
//! - `@getter` / `@setter` / `@accessor`: storage property plus accessor methods
//! - `@bind`: instance-bound methods, on a method or on a whole class
//!
//! `CompilationPass` drives a whole compilation unit; hosts that run their own
//! traversal call the dispatcher (`process_class_member_decorator`,
//! `process_class_decorator`) directly with a `TransformContext`.

pub mod accessor;
pub mod bind;
pub mod context;
pub mod dispatch;
pub mod error;
pub mod hoist;
pub mod options;
pub mod pass;
pub mod privacy;
pub mod registry;
pub mod tracing_config;

pub use accessor::{AccessorKind, apply_accessor};
pub use bind::apply_binding;
pub use context::TransformContext;
pub use dispatch::{Dispatch, process_class_decorator, process_class_member_decorator};
pub use error::{ConfigurationError, Result, TargetShape, TransformError};
pub use options::{AccessorConfig, ModuleFilter, PluginOptions, Privacy};
pub use pass::{CompilationPass, PassStats};
pub use privacy::{StorageKey, storage_key};
pub use registry::{TransformerKind, TransformerMap};

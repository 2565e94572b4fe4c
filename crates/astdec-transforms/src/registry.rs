//! Transformer registry.
//!
//! The set of transformers is closed: each `TransformerKind` declares the member
//! shape it applies to. A `TransformerMap` maps decorator names to kinds and
//! carries the resolved options; it is built once before a pass and exposes no
//! way to register anything afterwards.

use crate::error::{ConfigurationError, TargetShape};
use crate::options::{AccessorConfig, ModuleMatcher, PluginOptions};
use rustc_hash::FxHashMap;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TransformerKind {
    /// `@getter(interceptor?)`
    Getter,
    /// `@setter(interceptor?)`
    Setter,
    /// `@accessor(getInterceptor?, setInterceptor?)`
    Accessor,
    /// `@bind` on a method, or on a class to bind all of its methods.
    Bind,
}

impl TransformerKind {
    pub const ALL: [TransformerKind; 4] = [Self::Getter, Self::Setter, Self::Accessor, Self::Bind];

    /// Default decorator name the kind is registered under.
    pub const fn decorator_name(self) -> &'static str {
        match self {
            Self::Getter => "getter",
            Self::Setter => "setter",
            Self::Accessor => "accessor",
            Self::Bind => "bind",
        }
    }

    /// Member shape the transformer accepts.
    pub const fn target(self) -> TargetShape {
        match self {
            Self::Getter | Self::Setter | Self::Accessor => TargetShape::Property,
            Self::Bind => TargetShape::Method,
        }
    }

    /// Whether the transformer also accepts a class-level decorator.
    pub const fn applies_to_class(self) -> bool {
        matches!(self, Self::Bind)
    }
}

/// Immutable decorator-name → transformer table for one pass.
#[derive(Clone, Debug)]
pub struct TransformerMap {
    entries: FxHashMap<String, TransformerKind>,
    accessor: AccessorConfig,
    exclude: ModuleMatcher,
}

impl TransformerMap {
    /// Every built-in transformer under its default name.
    pub fn from_options(options: &PluginOptions) -> Result<Self, ConfigurationError> {
        let mut builder = TransformerMapBuilder::new(options)?;
        for kind in TransformerKind::ALL {
            builder = builder.register(kind.decorator_name(), kind);
        }
        Ok(builder.build())
    }

    pub fn builder(options: &PluginOptions) -> Result<TransformerMapBuilder, ConfigurationError> {
        TransformerMapBuilder::new(options)
    }

    pub fn get(&self, name: &str) -> Option<TransformerKind> {
        self.entries.get(name).copied()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub const fn accessor_config(&self) -> &AccessorConfig {
        &self.accessor
    }

    /// Whether a decorator imported from `source` must be left to the runtime.
    pub fn is_excluded_module(&self, source: &str) -> bool {
        self.exclude.matches(source)
    }
}

pub struct TransformerMapBuilder {
    entries: FxHashMap<String, TransformerKind>,
    accessor: AccessorConfig,
    exclude: ModuleMatcher,
}

impl TransformerMapBuilder {
    fn new(options: &PluginOptions) -> Result<Self, ConfigurationError> {
        Ok(Self {
            entries: FxHashMap::default(),
            accessor: AccessorConfig::resolve(options)?,
            exclude: ModuleMatcher::new(&options.exclude)?,
        })
    }

    /// Register `kind` under `name`; a later registration of the same name wins.
    #[must_use]
    pub fn register(mut self, name: impl Into<String>, kind: TransformerKind) -> Self {
        self.entries.insert(name.into(), kind);
        self
    }

    pub fn build(self) -> TransformerMap {
        TransformerMap {
            entries: self.entries,
            accessor: self.accessor,
            exclude: self.exclude,
        }
    }
}

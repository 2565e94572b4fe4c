//! Plugin configuration.
//!
//! `PluginOptions` is the JSON shape hosts load (camelCase keys, every field
//! optional). It is resolved once into `AccessorConfig` and the dispatcher's
//! module exclusion matcher when the `TransformerMap` is built; nothing reads
//! the raw options during a pass.

use crate::error::ConfigurationError;
use anyhow::{Context, Result};
use globset::{Glob, GlobSet, GlobSetBuilder};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Naming and visibility of a synthesized storage member.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Privacy {
    /// Same name as the decorated member.
    None,
    /// `_name`: conventionally private, still publicly reachable.
    Soft,
    /// `#_name`: a true private member.
    #[default]
    Hard,
}

/// Modules selected by package name or by import path pattern.
#[derive(Clone, Debug, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ModuleFilter {
    /// Package names; `pkg` matches `pkg` and `pkg/sub/path`.
    #[serde(default)]
    pub node_modules: Vec<String>,
    /// Glob patterns matched against relative or absolute import sources.
    #[serde(default)]
    pub paths: Vec<String>,
}

#[derive(Clone, Debug, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InterceptorContextOptions {
    /// Do not pass `this` to imported interceptors unless excluded.
    #[serde(default)]
    pub disable_by_default: bool,
    /// Imported interceptors whose default context policy is inverted.
    #[serde(default)]
    pub exclude: ModuleFilter,
}

#[derive(Clone, Debug, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TransformAccessorOptions {
    #[serde(default)]
    pub privacy: Option<Privacy>,
    #[serde(default)]
    pub preserve_decorators_for_both_accessors: bool,
    #[serde(default)]
    pub single_accessor_decorators: ModuleFilter,
    #[serde(default)]
    pub use_class_name_for_static: bool,
    #[serde(default)]
    pub interceptor_context: InterceptorContextOptions,
    /// Appended to the storage name when privacy is `none`.
    #[serde(default)]
    pub public_storage_suffix: Option<String>,
}

#[derive(Clone, Debug, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TransformersOptions {
    #[serde(default)]
    pub accessor: TransformAccessorOptions,
}

#[derive(Clone, Debug, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PluginOptions {
    /// Plugin-wide storage privacy; the accessor transformer's own setting wins.
    #[serde(default)]
    pub privacy: Option<Privacy>,
    /// Decorators imported from these modules are left for the runtime.
    #[serde(default)]
    pub exclude: ModuleFilter,
    #[serde(default)]
    pub transformers: TransformersOptions,
}

impl PluginOptions {
    pub fn from_json(text: &str) -> Result<Self> {
        serde_json::from_str(text).context("failed to parse decorator plugin options")
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read plugin options {}", path.display()))?;
        Self::from_json(&text).with_context(|| format!("in {}", path.display()))
    }
}

// =============================================================================
// Resolved configuration
// =============================================================================

/// Compiled form of a `ModuleFilter`.
#[derive(Clone, Debug, Default)]
pub struct ModuleMatcher {
    node_modules: Vec<String>,
    paths: Option<GlobSet>,
}

impl ModuleMatcher {
    pub fn new(filter: &ModuleFilter) -> Result<Self, ConfigurationError> {
        let paths = if filter.paths.is_empty() {
            None
        } else {
            let mut builder = GlobSetBuilder::new();
            for pattern in &filter.paths {
                let glob = Glob::new(pattern).map_err(|err| ConfigurationError::InvalidPattern {
                    pattern: pattern.clone(),
                    message: err.kind().to_string(),
                })?;
                builder.add(glob);
            }
            let set = builder
                .build()
                .map_err(|err| ConfigurationError::InvalidPattern {
                    pattern: filter.paths.join(", "),
                    message: err.kind().to_string(),
                })?;
            Some(set)
        };
        Ok(Self {
            node_modules: filter.node_modules.clone(),
            paths,
        })
    }

    pub fn is_empty(&self) -> bool {
        self.node_modules.is_empty() && self.paths.is_none()
    }

    /// Whether an import source belongs to the filter.
    pub fn matches(&self, source: &str) -> bool {
        let is_path = source.starts_with('.') || source.starts_with('/');
        if is_path {
            return self.paths.as_ref().is_some_and(|set| set.is_match(source));
        }
        self.node_modules.iter().any(|module| {
            source == module
                || source
                    .strip_prefix(module.as_str())
                    .is_some_and(|rest| rest.starts_with('/'))
        })
    }
}

/// Accessor transformer settings after defaults and overrides are applied.
#[derive(Clone, Debug)]
pub struct AccessorConfig {
    pub privacy: Privacy,
    pub preserve_decorators_for_both_accessors: bool,
    pub single_accessor_decorators: ModuleMatcher,
    pub use_class_name_for_static: bool,
    pub context_disabled_by_default: bool,
    pub context_exclude: ModuleMatcher,
    pub public_storage_suffix: Option<String>,
}

impl Default for AccessorConfig {
    fn default() -> Self {
        Self {
            privacy: Privacy::Hard,
            preserve_decorators_for_both_accessors: false,
            single_accessor_decorators: ModuleMatcher::default(),
            use_class_name_for_static: false,
            context_disabled_by_default: false,
            context_exclude: ModuleMatcher::default(),
            public_storage_suffix: None,
        }
    }
}

impl AccessorConfig {
    pub fn resolve(plugin: &PluginOptions) -> Result<Self, ConfigurationError> {
        let accessor = &plugin.transformers.accessor;
        Ok(Self {
            privacy: accessor.privacy.or(plugin.privacy).unwrap_or_default(),
            preserve_decorators_for_both_accessors: accessor
                .preserve_decorators_for_both_accessors,
            single_accessor_decorators: ModuleMatcher::new(&accessor.single_accessor_decorators)?,
            use_class_name_for_static: accessor.use_class_name_for_static,
            context_disabled_by_default: accessor.interceptor_context.disable_by_default,
            context_exclude: ModuleMatcher::new(&accessor.interceptor_context.exclude)?,
            public_storage_suffix: accessor
                .public_storage_suffix
                .clone()
                .filter(|suffix| !suffix.is_empty()),
        })
    }

    /// Whether an interceptor reference may observe `this`.
    ///
    /// `import_source` is the module an imported interceptor comes from; in-file
    /// references that cannot be classified pass `None`.
    pub fn allow_this_context(&self, import_source: Option<&str>) -> bool {
        let enabled = !self.context_disabled_by_default;
        match import_source {
            Some(source) if self.context_exclude.matches(source) => !enabled,
            _ => enabled,
        }
    }
}

#[cfg(test)]
#[path = "../tests/options.rs"]
mod tests;

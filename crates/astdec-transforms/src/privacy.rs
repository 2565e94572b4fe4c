//! Privacy-aware storage creation for accessor synthesis.
//!
//! The storage key is a pure function of the member name and the privacy
//! level, so deriving it twice gives the same key. Collisions with existing
//! members are reported, never resolved by renaming.

use crate::error::ConfigurationError;
use crate::options::Privacy;
use astdec_ast::{NodeArena, NodeIndex, NodeKind, NodeList, PropertyData, to_identifier};

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum StorageKey {
    /// Ordinary (or string-literal) property name.
    Public(String),
    /// `#name`, stored without the `#`.
    Private(String),
}

impl StorageKey {
    pub fn name(&self) -> &str {
        match self {
            Self::Public(name) | Self::Private(name) => name,
        }
    }

    pub const fn is_private(&self) -> bool {
        matches!(self, Self::Private(_))
    }

    /// Whether member access needs bracket syntax: `this["my-prop"]`.
    pub fn needs_computed_access(&self) -> bool {
        matches!(self, Self::Public(name) if !is_identifier_name(name))
    }

    /// Key node for a property declaration or member access.
    pub fn add_key_node(&self, arena: &mut NodeArena) -> NodeIndex {
        match self {
            Self::Private(name) => arena.add_private_name(name.as_str()),
            Self::Public(name) if is_identifier_name(name) => arena.add_identifier(name.as_str()),
            Self::Public(name) => arena.add_string(name.as_str()),
        }
    }
}

pub fn is_identifier_name(name: &str) -> bool {
    let mut chars = name.chars();
    chars
        .next()
        .is_some_and(|c| c.is_alphabetic() || c == '_' || c == '$')
        && chars.all(|c| c.is_alphanumeric() || c == '_' || c == '$')
}

/// Storage key for a member called `name`.
///
/// `hard` gives `#_name`, `soft` gives `_name`, `none` keeps `name` (plus the
/// configured suffix, if any).
pub fn storage_key(privacy: Privacy, name: &str, public_suffix: Option<&str>) -> StorageKey {
    match privacy {
        Privacy::Hard => StorageKey::Private(format!("_{}", to_identifier(name))),
        Privacy::Soft => StorageKey::Public(format!("_{}", to_identifier(name))),
        Privacy::None => StorageKey::Public(format!("{name}{}", public_suffix.unwrap_or(""))),
    }
}

/// Fail when `key` would clash with the accessor generated for `member` or with
/// another member of `klass` on the same side (static or instance).
pub fn check_storage_collision(
    arena: &NodeArena,
    klass: NodeIndex,
    member: NodeIndex,
    key: &StorageKey,
) -> Result<(), ConfigurationError> {
    let Some((_, _, is_static)) = arena.member_key(member) else {
        return Ok(());
    };
    let collision = || ConfigurationError::StorageCollision {
        member: arena.member_name(member).unwrap_or_default(),
        storage: match key {
            StorageKey::Private(name) => format!("#{name}"),
            StorageKey::Public(name) => name.clone(),
        },
    };

    let members = arena
        .get_class(klass)
        .map(|class| class.members.nodes.as_slice())
        .unwrap_or_default();
    for &other in members {
        let Some((other_key, computed, other_static)) = arena.member_key(other) else {
            continue;
        };
        if computed || other_static != is_static {
            continue;
        }
        let other_private = arena.kind(other_key) == Some(NodeKind::PrivateName);
        if other_private == key.is_private()
            && arena.member_name(other).as_deref() == Some(key.name())
        {
            return Err(collision());
        }
    }
    Ok(())
}

/// Storage property carrying the original initializer of `member`.
pub fn create_storage(arena: &mut NodeArena, member: NodeIndex, key: &StorageKey) -> NodeIndex {
    let (value, is_static) = arena
        .get_property(member)
        .map_or((None, false), |prop| (prop.value, prop.is_static));
    let key = key.add_key_node(arena);
    arena.add_property(PropertyData {
        key,
        computed: false,
        is_static,
        value,
        decorators: NodeList::new(),
    })
}

#[cfg(test)]
#[path = "../tests/privacy.rs"]
mod tests;

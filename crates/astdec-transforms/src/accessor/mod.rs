//! Accessor synthesis: `@getter`, `@setter` and `@accessor`.
//!
//! A decorated property is replaced, at its position, by a storage property
//! followed by the generated accessor method(s):
//!
//! ```text
//! @getter(trim) name = "x";
//! ```
//! becomes
//! ```text
//! #_name = "x";
//! get name() {
//!     return trim.call(this, this.#_name);
//! }
//! ```
//!
//! Everything that can fail is checked before the tree is touched.

pub mod interceptor;
pub mod methods;

use crate::context::TransformContext;
use crate::error::{ConfigurationError, Result, TargetShape, TransformError};
use crate::hoist::{hoist_anchor, hoist_declarations};
use crate::options::AccessorConfig;
use crate::privacy::{check_storage_collision, create_storage, storage_key};
use astdec_ast::{Binding, NodeArena, NodeIndex, NodeList, resolve_binding};
use interceptor::{AccessorType, ThisContext, plan_interceptor, prepare_interceptor};
use methods::{AccessorSignature, build_getter, build_setter};
use tracing::debug;

pub use interceptor::{InterceptorPlan, PreparedInterceptor};

const SETTER_PARAM: &str = "value";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AccessorKind {
    Getter,
    Setter,
    /// Getter and setter sharing one storage.
    Both,
}

impl AccessorKind {
    pub const fn decorator_name(self) -> &'static str {
        match self {
            Self::Getter => "getter",
            Self::Setter => "setter",
            Self::Both => "accessor",
        }
    }

    const fn has_getter(self) -> bool {
        matches!(self, Self::Getter | Self::Both)
    }

    const fn has_setter(self) -> bool {
        matches!(self, Self::Setter | Self::Both)
    }
}

/// Rewrite the property `member` of `klass` as storage plus accessor method(s).
///
/// `decorator` is the decorator being processed; its arguments are the
/// interceptors (`(get)`, `(set)` or `(get, set)` depending on `kind`) and it
/// is dropped, while every other decorator of the property moves to the
/// generated methods.
pub fn apply_accessor(
    ctx: &mut TransformContext<'_>,
    kind: AccessorKind,
    klass: NodeIndex,
    member: NodeIndex,
    decorator: NodeIndex,
    config: &AccessorConfig,
) -> Result<()> {
    let arena = &*ctx.arena;
    let Some(property) = arena.get_property(member) else {
        return Err(TransformError::InvalidTarget {
            decorator: kind.decorator_name(),
            expected: TargetShape::Property,
        });
    };
    let signature = AccessorSignature {
        key: property.key,
        computed: property.computed,
        is_static: property.is_static,
    };
    let leftovers: Vec<NodeIndex> = property
        .decorators
        .iter()
        .filter(|&dec| dec != decorator)
        .collect();

    let is_member_of_class = arena
        .get_class(klass)
        .is_some_and(|class| class.members.position(member).is_some());
    if !is_member_of_class {
        return Err(TransformError::Resolution {
            decorator: kind.decorator_name().to_string(),
        });
    }

    let args = arena.decorator_arguments(decorator);
    let (get_arg, set_arg) = match kind {
        AccessorKind::Getter => (args.first().copied(), None),
        AccessorKind::Setter => (None, args.first().copied()),
        AccessorKind::Both => (args.first().copied(), args.get(1).copied()),
    };
    for arg in [get_arg, set_arg].into_iter().flatten() {
        interceptor::assert_interceptor(arena, arg)?;
    }

    let name = arena
        .member_name(member)
        .ok_or(ConfigurationError::UnnamedMember)?;
    let storage = storage_key(config.privacy, &name, config.public_storage_suffix.as_deref());
    check_storage_collision(arena, klass, member, &storage)?;

    let owner = if config.use_class_name_for_static && signature.is_static {
        arena
            .get_class(klass)
            .and_then(|class| class.name.clone())
    } else {
        None
    };
    let receiver = owner
        .clone()
        .map_or(ThisContext::MethodCall, ThisContext::Identifier);

    let get_plan = get_arg
        .map(|arg| plan_interceptor(arena, config, klass, arg, receiver.clone()))
        .transpose()?;
    let set_plan = set_arg
        .map(|arg| plan_interceptor(arena, config, klass, arg, receiver.clone()))
        .transpose()?;

    let needs_hoisting = get_plan
        .iter()
        .chain(set_plan.iter())
        .any(InterceptorPlan::needs_hoisting);
    let anchor = if needs_hoisting {
        Some(
            hoist_anchor(arena, klass).ok_or_else(|| TransformError::Resolution {
                decorator: kind.decorator_name().to_string(),
            })?,
        )
    } else {
        None
    };

    let setter_leftovers: Vec<NodeIndex> = if kind == AccessorKind::Both {
        if config.preserve_decorators_for_both_accessors {
            leftovers
                .iter()
                .copied()
                .filter(|&dec| !is_single_accessor_decorator(arena, config, klass, dec))
                .collect()
        } else {
            Vec::new()
        }
    } else {
        leftovers.clone()
    };

    // Validation done; mutate.
    let mut declarations = Vec::new();
    let get_interceptor = get_plan.map(|plan| {
        let (prepared, declaration) = prepare_interceptor(ctx, plan, AccessorType::Get);
        declarations.extend(declaration);
        prepared
    });
    let set_interceptor = set_plan.map(|plan| {
        let (prepared, declaration) = prepare_interceptor(ctx, plan, AccessorType::Set);
        declarations.extend(declaration);
        prepared
    });

    // The parameter must not shadow the interceptor or the storage owner.
    let shadows_value = owner.as_deref() == Some(SETTER_PARAM)
        || set_interceptor
            .as_ref()
            .and_then(|prepared| prepared.root_name(ctx.arena))
            == Some(SETTER_PARAM);
    let param = if shadows_value {
        ctx.uids.generate(SETTER_PARAM)
    } else {
        SETTER_PARAM.to_string()
    };

    let arena = &mut *ctx.arena;
    let storage_node = create_storage(arena, member, &storage);
    let mut replacements = vec![storage_node];

    if kind.has_getter() {
        replacements.push(build_getter(
            arena,
            signature,
            owner.as_deref(),
            &storage,
            get_interceptor.as_ref(),
            leftovers.into(),
        ));
    }
    if kind.has_setter() {
        let (signature, decorators) = if kind == AccessorKind::Both {
            let key = arena.clone_subtree(signature.key);
            let decorators: NodeList = setter_leftovers
                .into_iter()
                .map(|dec| arena.clone_subtree(dec))
                .collect();
            (AccessorSignature { key, ..signature }, decorators)
        } else {
            (signature, setter_leftovers.into())
        };
        replacements.push(build_setter(
            arena,
            signature,
            owner.as_deref(),
            &storage,
            set_interceptor.as_ref(),
            &param,
            decorators,
        ));
    }

    arena.replace_with_multiple(member, &replacements);
    if let Some(anchor) = anchor {
        hoist_declarations(arena, anchor, &declarations);
    }

    debug!(
        decorator = kind.decorator_name(),
        member = %name,
        storage = storage.name(),
        hoisted = declarations.len(),
        "synthesized accessor"
    );
    Ok(())
}

/// Whether `decorator` is imported from a module whose decorators must only
/// stay on the getter.
fn is_single_accessor_decorator(
    arena: &NodeArena,
    config: &AccessorConfig,
    klass: NodeIndex,
    decorator: NodeIndex,
) -> bool {
    if config.single_accessor_decorators.is_empty() {
        return false;
    }
    let Some(name) = arena.decorator_name(decorator) else {
        return false;
    };
    matches!(
        resolve_binding(arena, klass, name),
        Some(Binding::Import { source, .. }) if config.single_accessor_decorators.matches(&source)
    )
}

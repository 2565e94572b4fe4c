//! Decorator dispatch.
//!
//! Routes one decorator occurrence to the transformer registered under its
//! name. Unknown names, and names imported from an excluded module, are left
//! untouched for the runtime to evaluate.

use crate::accessor::{AccessorKind, apply_accessor};
use crate::bind::apply_binding;
use crate::context::TransformContext;
use crate::error::{Result, TransformError};
use crate::registry::{TransformerKind, TransformerMap};
use astdec_ast::{Binding, MethodKind, NodeArena, NodeIndex, resolve_binding};
use tracing::{debug, trace};

/// Outcome of dispatching one decorator.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Dispatch {
    /// The transformer ran and the tree was rewritten.
    Applied(TransformerKind),
    /// No transformer applies; the decorator stays in place.
    Inert,
}

/// Dispatch a decorator attached to a class member.
pub fn process_class_member_decorator(
    ctx: &mut TransformContext<'_>,
    transformers: &TransformerMap,
    decorator: NodeIndex,
) -> Result<Dispatch> {
    let arena = &*ctx.arena;
    let member = arena.parent(decorator);
    let name = arena.decorator_name(decorator).unwrap_or_default().to_string();
    let klass = if arena.is_class_member(member) {
        arena.enclosing_class(member)
    } else {
        None
    };
    let Some(klass) = klass else {
        return Err(TransformError::Resolution { decorator: name });
    };

    let Some(kind) = lookup(arena, transformers, decorator, &name) else {
        return Ok(Dispatch::Inert);
    };
    debug!(
        decorator = %name,
        ?kind,
        member = member.0,
        klass = klass.0,
        "dispatching member decorator"
    );

    let accessor = match kind {
        TransformerKind::Getter => AccessorKind::Getter,
        TransformerKind::Setter => AccessorKind::Setter,
        TransformerKind::Accessor => AccessorKind::Both,
        TransformerKind::Bind => {
            apply_binding(ctx, klass, &[member], Some(decorator))?;
            return Ok(Dispatch::Applied(kind));
        }
    };
    apply_accessor(
        ctx,
        accessor,
        klass,
        member,
        decorator,
        transformers.accessor_config(),
    )?;
    Ok(Dispatch::Applied(kind))
}

/// Dispatch a decorator attached to a class.
///
/// Only transformers that accept a class (`@bind`) run here; a member-only
/// transformer on a class is an invalid target.
pub fn process_class_decorator(
    ctx: &mut TransformContext<'_>,
    transformers: &TransformerMap,
    decorator: NodeIndex,
) -> Result<Dispatch> {
    let arena = &*ctx.arena;
    let klass = arena.parent(decorator);
    let name = arena.decorator_name(decorator).unwrap_or_default().to_string();
    if arena.get_class(klass).is_none() {
        return Err(TransformError::Resolution { decorator: name });
    }

    let Some(kind) = lookup(arena, transformers, decorator, &name) else {
        return Ok(Dispatch::Inert);
    };
    if !kind.applies_to_class() {
        return Err(TransformError::InvalidTarget {
            decorator: kind.decorator_name(),
            expected: kind.target(),
        });
    }
    debug!(decorator = %name, ?kind, klass = klass.0, "dispatching class decorator");

    let methods = bindable_methods(arena, transformers, klass);
    apply_binding(ctx, klass, &methods, Some(decorator))?;
    Ok(Dispatch::Applied(kind))
}

/// Registered transformer for `name`, unless the decorator comes from an
/// excluded module.
fn lookup(
    arena: &NodeArena,
    transformers: &TransformerMap,
    decorator: NodeIndex,
    name: &str,
) -> Option<TransformerKind> {
    let kind = transformers.get(name)?;
    if let Some(Binding::Import { source, .. }) = resolve_binding(arena, decorator, name)
        && transformers.is_excluded_module(&source)
    {
        trace!(decorator = name, %source, "decorator imported from excluded module");
        return None;
    }
    Some(kind)
}

/// Instance methods a class-level `@bind` applies to. Methods carrying their
/// own `@bind` are left to their member decorator.
fn bindable_methods(
    arena: &NodeArena,
    transformers: &TransformerMap,
    klass: NodeIndex,
) -> Vec<NodeIndex> {
    let Some(class) = arena.get_class(klass) else {
        return Vec::new();
    };
    class
        .members
        .iter()
        .filter(|&member| {
            arena
                .get_method(member)
                .is_some_and(|method| method.kind == MethodKind::Method && !method.is_static)
                && !has_own_binding(arena, transformers, member)
        })
        .collect()
}

fn has_own_binding(arena: &NodeArena, transformers: &TransformerMap, member: NodeIndex) -> bool {
    arena.decorators_of(member).is_some_and(|decorators| {
        decorators.iter().any(|dec| {
            arena.decorator_name(dec).is_some_and(|name| {
                lookup(arena, transformers, dec, name) == Some(TransformerKind::Bind)
            })
        })
    })
}

#[cfg(test)]
#[path = "../tests/dispatch.rs"]
mod tests;

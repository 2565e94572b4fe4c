//! Accessor interceptors.
//!
//! An interceptor argument is classified once (`plan_interceptor`, read-only)
//! and then materialized (`prepare_interceptor`): inline functions are hoisted
//! to a fresh declaration before the class, references are used as they are.
//! The resulting `PreparedInterceptor` builds the call wrapped around the stored
//! or assigned value.

use crate::context::TransformContext;
use crate::error::{Result, TransformError};
use crate::options::AccessorConfig;
use astdec_ast::{
    Binding, FunctionData, NodeArena, NodeData, NodeIndex, NodeKind, VariableKind, resolve_binding,
};
use tracing::trace;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AccessorType {
    Get,
    Set,
}

impl AccessorType {
    /// Name hint for a hoisted interceptor of this type.
    pub const fn interceptor_hint(self) -> &'static str {
        match self {
            Self::Get => "getInterceptor",
            Self::Set => "setInterceptor",
        }
    }
}

/// What an interceptor call passes as `this`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ThisContext {
    /// `f(value)`
    None,
    /// `f.call(ClassName, value)`, for static members addressed by class name.
    Identifier(String),
    /// `f.call(this, value)`
    MethodCall,
}

impl ThisContext {
    fn add_receiver(&self, arena: &mut NodeArena) -> Option<NodeIndex> {
        match self {
            Self::None => None,
            Self::Identifier(name) => Some(arena.add_identifier(name.as_str())),
            Self::MethodCall => Some(arena.add_this()),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum InterceptorSource {
    /// `function (v) {}` hoisted to `function _getInterceptor(v) {}`; a named
    /// `function f(v) {}` to `const _getInterceptor = function f(v) {};`.
    InlineFunction,
    /// `(v) => v` hoisted to `const _getInterceptor = (v) => v;`.
    InlineArrow,
    /// Identifier or `object.property`, called in place.
    Reference,
}

/// Decision taken for one interceptor argument before anything is mutated.
#[derive(Clone, Debug)]
pub struct InterceptorPlan {
    node: NodeIndex,
    source: InterceptorSource,
    this_context: ThisContext,
}

impl InterceptorPlan {
    pub const fn this_context(&self) -> &ThisContext {
        &self.this_context
    }

    pub const fn needs_hoisting(&self) -> bool {
        !matches!(self.source, InterceptorSource::Reference)
    }
}

/// Reject interceptor arguments that are not an inline function, an arrow, an
/// identifier or a plain `object.property` reference.
pub fn assert_interceptor(arena: &NodeArena, interceptor: NodeIndex) -> Result<()> {
    match arena.kind(interceptor) {
        Some(NodeKind::FunctionExpression | NodeKind::ArrowFunction | NodeKind::Identifier) => {
            Ok(())
        }
        Some(NodeKind::Member) if is_property_reference(arena, interceptor) => Ok(()),
        _ => Err(TransformError::InvalidInterceptor),
    }
}

/// `a.b.c`: non-computed accesses down to an identifier or `this`.
fn is_property_reference(arena: &NodeArena, idx: NodeIndex) -> bool {
    match arena.get(idx).map(|node| &node.data) {
        Some(NodeData::Identifier(_) | NodeData::This) => true,
        Some(NodeData::Member(access)) => {
            !access.computed
                && arena.kind(access.property) == Some(NodeKind::Identifier)
                && is_property_reference(arena, access.object)
        }
        _ => false,
    }
}

/// Classify `interceptor` and decide its call style.
///
/// `receiver` is what a context-receiving call passes as `this`; it is only
/// used when the interceptor may observe a context at all.
pub fn plan_interceptor(
    arena: &NodeArena,
    config: &AccessorConfig,
    klass: NodeIndex,
    interceptor: NodeIndex,
    receiver: ThisContext,
) -> Result<InterceptorPlan> {
    assert_interceptor(arena, interceptor)?;

    let (source, receives_context) = match arena.kind(interceptor) {
        Some(NodeKind::FunctionExpression) => (InterceptorSource::InlineFunction, true),
        Some(NodeKind::ArrowFunction) => (InterceptorSource::InlineArrow, false),
        Some(NodeKind::Identifier) => {
            let name = arena.identifier_text(interceptor).unwrap_or_default();
            (
                InterceptorSource::Reference,
                identifier_receives_context(arena, config, klass, name)?,
            )
        }
        _ => (
            InterceptorSource::Reference,
            config.allow_this_context(None),
        ),
    };

    let this_context = if receives_context {
        receiver
    } else {
        ThisContext::None
    };
    trace!(
        interceptor = interceptor.0,
        ?source,
        ?this_context,
        "planned interceptor"
    );
    Ok(InterceptorPlan {
        node: interceptor,
        source,
        this_context,
    })
}

fn identifier_receives_context(
    arena: &NodeArena,
    config: &AccessorConfig,
    klass: NodeIndex,
    name: &str,
) -> Result<bool> {
    let binding = resolve_binding(arena, klass, name)
        .ok_or_else(|| TransformError::InterceptorNotDefined(name.to_string()))?;
    match binding {
        Binding::Function(_) => Ok(true),
        Binding::Variable { initializer, .. } => {
            match initializer.and_then(|init| arena.kind(init)) {
                Some(NodeKind::FunctionExpression) => Ok(true),
                Some(NodeKind::ArrowFunction) => Ok(false),
                _ => Err(TransformError::InterceptorNotFunction(name.to_string())),
            }
        }
        Binding::Class(_) => Err(TransformError::InterceptorNotFunction(name.to_string())),
        Binding::Import { source, .. } => Ok(config.allow_this_context(Some(&source))),
        Binding::Parameter(_) => Ok(config.allow_this_context(None)),
    }
}

/// An interceptor ready to be called from a generated accessor.
#[derive(Clone, Debug)]
pub struct PreparedInterceptor {
    callee: NodeIndex,
    this_context: ThisContext,
}

impl PreparedInterceptor {
    /// Leftmost identifier of the callee: `f` for `f` and for `f.a.b`.
    pub fn root_name<'a>(&self, arena: &'a NodeArena) -> Option<&'a str> {
        let mut current = self.callee;
        loop {
            match &arena.get(current)?.data {
                NodeData::Identifier(name) => return Some(name),
                NodeData::Member(access) => current = access.object,
                _ => return None,
            }
        }
    }

    /// `f(value)` or `f.call(receiver, value)`.
    pub fn call(&self, arena: &mut NodeArena, value: NodeIndex) -> NodeIndex {
        let callee = arena.clone_subtree(self.callee);
        match self.this_context.add_receiver(arena) {
            None => arena.add_call(callee, vec![value]),
            Some(receiver) => {
                let call = arena.add_property_access(callee, "call");
                arena.add_call(call, vec![receiver, value])
            }
        }
    }
}

/// Materialize a plan. Returns the interceptor and the declaration to hoist,
/// if the interceptor was written inline.
pub fn prepare_interceptor(
    ctx: &mut TransformContext<'_>,
    plan: InterceptorPlan,
    ty: AccessorType,
) -> (PreparedInterceptor, Option<NodeIndex>) {
    let arena = &mut *ctx.arena;
    let (callee, declaration) = match plan.source {
        InterceptorSource::Reference => (plan.node, None),
        // A named function expression keeps its own name for references
        // inside its body; only the outer binding is fresh.
        InterceptorSource::InlineFunction
            if arena
                .get_function(plan.node)
                .is_some_and(|function| function.name.is_some()) =>
        {
            let name = ctx.uids.generate(ty.interceptor_hint());
            let declaration = arena.add_variable(VariableKind::Const, name.as_str(), Some(plan.node));
            (arena.add_identifier(name), Some(declaration))
        }
        InterceptorSource::InlineArrow => {
            let name = ctx.uids.generate(ty.interceptor_hint());
            let declaration = arena.add_variable(VariableKind::Const, name.as_str(), Some(plan.node));
            (arena.add_identifier(name), Some(declaration))
        }
        InterceptorSource::InlineFunction => {
            let name = ctx.uids.generate(ty.interceptor_hint());
            let function = arena.get_function(plan.node).cloned().unwrap_or_default();
            let declaration = arena.add_function_declaration(FunctionData {
                name: Some(name.clone()),
                is_arrow: false,
                ..function
            });
            (arena.add_identifier(name), Some(declaration))
        }
    };
    (
        PreparedInterceptor {
            callee,
            this_context: plan.this_context,
        },
        declaration,
    )
}

#[cfg(test)]
#[path = "../../tests/interceptor.rs"]
mod tests;

//! Method binding: `@bind`.
//!
//! Public methods keep their definition and get an instance field inserted
//! in front of them:
//!
//! ```text
//! render = this.render.bind(this);
//! render() {}
//! ```
//!
//! Private methods cannot be read back through `this.#name` before the field
//! is defined, so they are turned into the field itself. Non-generators become
//! an arrow function; generators are hoisted before the class and bound:
//!
//! ```text
//! function* _items() {}
//! class List {
//!     #items = _items.bind(this);
//! }
//! ```

use crate::context::TransformContext;
use crate::error::{Result, TargetShape, TransformError};
use crate::hoist::{hoist_anchor, hoist_declarations};
use astdec_ast::{
    FunctionData, MethodData, MethodKind, NodeArena, NodeIndex, NodeKind, NodeList, PropertyData,
};
use tracing::debug;

const DECORATOR: &str = "bind";

/// Bind every method in `methods` (members of `klass`) to the instance.
///
/// `decorator` is the decorator that requested the binding, on a method or on
/// the class itself; it is removed once the binding is applied. Either every
/// method is rewritten or, on error, none is.
pub fn apply_binding(
    ctx: &mut TransformContext<'_>,
    klass: NodeIndex,
    methods: &[NodeIndex],
    decorator: Option<NodeIndex>,
) -> Result<()> {
    let arena = &*ctx.arena;
    let mut public = Vec::new();
    let mut private = Vec::new();
    for &method in methods {
        let Some(data) = arena.get_method(method) else {
            return Err(invalid_target());
        };
        if data.kind != MethodKind::Method {
            return Err(invalid_target());
        }
        let is_member_of_class = arena
            .get_class(klass)
            .is_some_and(|class| class.members.position(method).is_some());
        if !is_member_of_class {
            return Err(TransformError::Resolution {
                decorator: DECORATOR.to_string(),
            });
        }
        if arena.is_private_member(method) {
            private.push(method);
        } else {
            public.push(method);
        }
    }

    let has_generators = private
        .iter()
        .any(|&method| arena.get_method(method).is_some_and(|data| data.is_generator));
    let anchor = if has_generators {
        Some(
            hoist_anchor(arena, klass).ok_or_else(|| TransformError::Resolution {
                decorator: DECORATOR.to_string(),
            })?,
        )
    } else {
        None
    };

    // Validation done; mutate.
    if let Some(decorator) = decorator {
        ctx.arena.remove(decorator);
    }

    for &method in &public {
        bind_public(ctx.arena, method);
    }

    let mut declarations = Vec::new();
    for &method in &private {
        declarations.extend(bind_private(ctx, method));
    }
    if let Some(anchor) = anchor {
        hoist_declarations(ctx.arena, anchor, &declarations);
    }

    debug!(
        klass = klass.0,
        public = public.len(),
        private = private.len(),
        hoisted = declarations.len(),
        "bound methods"
    );
    Ok(())
}

const fn invalid_target() -> TransformError {
    TransformError::InvalidTarget {
        decorator: DECORATOR,
        expected: TargetShape::Method,
    }
}

/// Insert `key = this.key.bind(this);` before the method.
fn bind_public(arena: &mut NodeArena, method: NodeIndex) {
    let Some(data) = arena.get_method(method) else {
        return;
    };
    let (key, computed, is_static) = (data.key, data.computed, data.is_static);
    let access_computed = computed || arena.kind(key) != Some(NodeKind::Identifier);

    let this = arena.add_this();
    let accessed_key = arena.clone_subtree(key);
    let target = arena.add_member(this, accessed_key, access_computed);
    let value = bound(arena, target);

    let field_key = arena.clone_subtree(key);
    let field = arena.add_property(PropertyData {
        key: field_key,
        computed,
        is_static,
        value: Some(value),
        decorators: NodeList::new(),
    });
    arena.insert_before(method, &[field]);
}

/// Replace a private method by a field holding the bound function. Returns the
/// declaration to hoist for generators.
fn bind_private(ctx: &mut TransformContext<'_>, method: NodeIndex) -> Option<NodeIndex> {
    let data = ctx.arena.get_method(method).cloned()?;
    let MethodData {
        key,
        is_static,
        params,
        body,
        is_generator,
        is_async,
        decorators,
        ..
    } = data;

    let (value, declaration) = if is_generator {
        let name = ctx
            .uids
            .generate(&ctx.arena.member_name(method).unwrap_or_default());
        let declaration = ctx.arena.add_function_declaration(FunctionData {
            name: Some(name.clone()),
            params,
            body,
            is_arrow: false,
            is_generator: true,
            is_async,
        });
        let function = ctx.arena.add_identifier(name);
        (bound(ctx.arena, function), Some(declaration))
    } else {
        let arrow = ctx.arena.add_function_expression(FunctionData {
            name: None,
            params,
            body,
            is_arrow: true,
            is_generator: false,
            is_async,
        });
        (arrow, None)
    };

    let field = ctx.arena.add_property(PropertyData {
        key,
        computed: false,
        is_static,
        value: Some(value),
        decorators,
    });
    ctx.arena.replace_with(method, field);
    declaration
}

/// `target.bind(this)`
fn bound(arena: &mut NodeArena, target: NodeIndex) -> NodeIndex {
    let bind = arena.add_property_access(target, "bind");
    let this = arena.add_this();
    arena.add_call(bind, vec![this])
}

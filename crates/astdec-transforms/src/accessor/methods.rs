//! Getter and setter method builders.

use super::interceptor::PreparedInterceptor;
use crate::privacy::StorageKey;
use astdec_ast::{MethodData, MethodKind, NodeArena, NodeIndex, NodeList};

/// Key and flags shared by the generated accessor methods of one property.
#[derive(Clone, Copy, Debug)]
pub struct AccessorSignature {
    pub key: NodeIndex,
    pub computed: bool,
    pub is_static: bool,
}

/// `this.<storage>` or `ClassName.<storage>`.
pub fn storage_access(arena: &mut NodeArena, owner: Option<&str>, storage: &StorageKey) -> NodeIndex {
    let object = match owner {
        Some(class_name) => arena.add_identifier(class_name),
        None => arena.add_this(),
    };
    let property = storage.add_key_node(arena);
    arena.add_member(object, property, storage.needs_computed_access())
}

/// `get key() { return owner.storage; }`, optionally through an interceptor.
pub fn build_getter(
    arena: &mut NodeArena,
    signature: AccessorSignature,
    owner: Option<&str>,
    storage: &StorageKey,
    interceptor: Option<&PreparedInterceptor>,
    decorators: NodeList,
) -> NodeIndex {
    let value = storage_access(arena, owner, storage);
    let value = match interceptor {
        Some(interceptor) => interceptor.call(arena, value),
        None => value,
    };
    let ret = arena.add_return(Some(value));
    let body = arena.add_block(vec![ret]);
    arena.add_method(MethodData {
        kind: MethodKind::Get,
        key: signature.key,
        computed: signature.computed,
        is_static: signature.is_static,
        params: NodeList::new(),
        body,
        is_generator: false,
        is_async: false,
        decorators,
    })
}

/// `set key(param) { owner.storage = param; }`, optionally through an interceptor.
pub fn build_setter(
    arena: &mut NodeArena,
    signature: AccessorSignature,
    owner: Option<&str>,
    storage: &StorageKey,
    interceptor: Option<&PreparedInterceptor>,
    param: &str,
    decorators: NodeList,
) -> NodeIndex {
    let declared = arena.add_identifier(param);
    let value = arena.add_identifier(param);
    let value = match interceptor {
        Some(interceptor) => interceptor.call(arena, value),
        None => value,
    };
    let target = storage_access(arena, owner, storage);
    let assign = arena.add_assign(target, value);
    let stmt = arena.add_expression_statement(assign);
    let body = arena.add_block(vec![stmt]);
    arena.add_method(MethodData {
        kind: MethodKind::Set,
        key: signature.key,
        computed: signature.computed,
        is_static: signature.is_static,
        params: vec![declared].into(),
        body,
        is_generator: false,
        is_async: false,
        decorators,
    })
}

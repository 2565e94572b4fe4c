//! Tree builders shared by the integration tests.

#![allow(dead_code)]

use astdec_ast::*;
use astdec_transforms::{CompilationPass, PassStats, PluginOptions, Result};

pub fn ident(arena: &mut NodeArena, name: &str) -> NodeIndex {
    arena.add_identifier(name)
}

/// `@name`
pub fn bare_decorator(arena: &mut NodeArena, name: &str) -> NodeIndex {
    let expression = arena.add_identifier(name);
    arena.add_decorator(expression)
}

/// `@name(args...)`
pub fn call_decorator(arena: &mut NodeArena, name: &str, args: Vec<NodeIndex>) -> NodeIndex {
    let callee = arena.add_identifier(name);
    let call = arena.add_call(callee, args);
    arena.add_decorator(call)
}

fn key_node(arena: &mut NodeArena, name: &str) -> NodeIndex {
    match name.strip_prefix('#') {
        Some(private) => arena.add_private_name(private),
        None => arena.add_identifier(name),
    }
}

/// `name = value;` (`#name` for a private field).
pub fn property(
    arena: &mut NodeArena,
    name: &str,
    value: Option<&str>,
    decorators: Vec<NodeIndex>,
) -> NodeIndex {
    let key = key_node(arena, name);
    let value = value.map(|text| arena.add_raw(text));
    arena.add_property(PropertyData {
        key,
        computed: false,
        is_static: false,
        value,
        decorators: decorators.into(),
    })
}

pub fn static_property(
    arena: &mut NodeArena,
    name: &str,
    value: Option<&str>,
    decorators: Vec<NodeIndex>,
) -> NodeIndex {
    let key = key_node(arena, name);
    let value = value.map(|text| arena.add_raw(text));
    arena.add_property(PropertyData {
        key,
        computed: false,
        is_static: true,
        value,
        decorators: decorators.into(),
    })
}

/// `name(params) { return body; }`
pub fn method(
    arena: &mut NodeArena,
    name: &str,
    params: &[&str],
    body: &str,
    decorators: Vec<NodeIndex>,
) -> NodeIndex {
    method_with(arena, name, params, body, MethodKind::Method, false, decorators)
}

pub fn generator_method(
    arena: &mut NodeArena,
    name: &str,
    body: &str,
    decorators: Vec<NodeIndex>,
) -> NodeIndex {
    method_with(arena, name, &[], body, MethodKind::Method, true, decorators)
}

pub fn method_with(
    arena: &mut NodeArena,
    name: &str,
    params: &[&str],
    body: &str,
    kind: MethodKind,
    is_generator: bool,
    decorators: Vec<NodeIndex>,
) -> NodeIndex {
    let key = key_node(arena, name);
    let params: Vec<NodeIndex> = params.iter().map(|p| arena.add_identifier(*p)).collect();
    let value = arena.add_raw(body);
    let ret = arena.add_return(Some(value));
    let body = arena.add_block(vec![ret]);
    arena.add_method(MethodData {
        kind,
        key,
        computed: false,
        is_static: false,
        params: params.into(),
        body,
        is_generator,
        is_async: false,
        decorators: decorators.into(),
    })
}

/// `function (v) { return body; }` or `(v) => body`.
pub fn inline_function(arena: &mut NodeArena, param: &str, body: &str, is_arrow: bool) -> NodeIndex {
    let param = arena.add_identifier(param);
    let value = arena.add_raw(body);
    let body = if is_arrow {
        value
    } else {
        let ret = arena.add_return(Some(value));
        arena.add_block(vec![ret])
    };
    arena.add_function_expression(FunctionData {
        params: vec![param].into(),
        body,
        is_arrow,
        ..FunctionData::default()
    })
}

/// `function name(v) { return v; }`
pub fn function_declaration(arena: &mut NodeArena, name: &str) -> NodeIndex {
    let param = arena.add_identifier("v");
    let value = arena.add_identifier("v");
    let ret = arena.add_return(Some(value));
    let body = arena.add_block(vec![ret]);
    arena.add_function_declaration(FunctionData {
        name: Some(name.to_string()),
        params: vec![param].into(),
        body,
        ..FunctionData::default()
    })
}

/// `import { name } from "source";`
pub fn named_import(arena: &mut NodeArena, names: &[&str], source: &str) -> NodeIndex {
    let specifiers = names
        .iter()
        .map(|name| ImportSpecifier::Named {
            imported: name.to_string(),
            local: name.to_string(),
        })
        .collect();
    arena.add_import(source, specifiers)
}

pub fn class(arena: &mut NodeArena, name: &str, members: Vec<NodeIndex>) -> NodeIndex {
    arena.add_class(ClassData {
        name: Some(name.to_string()),
        members: members.into(),
        ..ClassData::default()
    })
}

/// Program made of `prelude` followed by `class`.
pub fn program(arena: &mut NodeArena, prelude: Vec<NodeIndex>, class: NodeIndex) -> NodeIndex {
    let mut statements = prelude;
    statements.push(class);
    arena.add_program(statements)
}

pub fn print(arena: &NodeArena, idx: NodeIndex) -> String {
    Printer::emit_to_string(arena, idx)
}

pub fn run(options: &str, arena: &mut NodeArena, root: NodeIndex) -> Result<PassStats> {
    let options = PluginOptions::from_json(options).expect("test options parse");
    let pass = CompilationPass::from_options(&options).expect("transformer map builds");
    pass.run(arena, root)
}

/// Class members, in order, printed one per entry.
pub fn members(arena: &NodeArena, class: NodeIndex) -> Vec<String> {
    arena
        .get_class(class)
        .expect("class node")
        .members
        .iter()
        .map(|member| print(arena, member))
        .collect()
}

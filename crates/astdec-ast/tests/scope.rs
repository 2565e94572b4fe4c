use super::*;
use crate::base::NodeList;
use crate::node::{ClassData, FunctionData, PropertyData};

#[test]
fn test_to_identifier() {
    assert_eq!(to_identifier("value"), "value");
    assert_eq!(to_identifier("my-prop"), "myProp");
    assert_eq!(to_identifier("1st"), "_1st");
    assert_eq!(to_identifier("--"), "_");
}

#[test]
fn test_generate_sequence() {
    let mut uids = UidGenerator::new();
    assert_eq!(uids.generate("getInterceptor"), "_getInterceptor");
    assert_eq!(uids.generate("getInterceptor"), "_getInterceptor2");
    assert_eq!(uids.generate("getInterceptor"), "_getInterceptor3");
}

#[test]
fn test_generate_strips_underscores_and_digits() {
    let mut uids = UidGenerator::new();
    assert_eq!(uids.generate("_foo2"), "_foo");
    assert_eq!(uids.generate("foo"), "_foo2");
}

#[test]
fn test_generate_avoids_names_in_tree() {
    let mut arena = NodeArena::new();
    let init = arena.add_number("1");
    let taken = arena.add_variable(VariableKind::Const, "_setInterceptor", Some(init));
    let program = arena.add_program(vec![taken]);

    let mut uids = UidGenerator::for_tree(&arena, program);
    assert!(uids.is_used("_setInterceptor"));
    assert_eq!(uids.generate("setInterceptor"), "_setInterceptor2");
}

#[test]
fn test_generate_avoids_words_in_raw_text() {
    let mut arena = NodeArena::new();
    let raw = arena.add_raw("var _getInterceptor = _setInterceptor2 + 1");
    let stmt = arena.add_expression_statement(raw);
    let program = arena.add_program(vec![stmt]);

    let mut uids = UidGenerator::for_tree(&arena, program);
    assert!(uids.is_used("var"));
    assert!(uids.is_used("_setInterceptor2"));
    assert!(!uids.is_used("1"));
    assert_eq!(uids.generate("getInterceptor"), "_getInterceptor2");
    assert_eq!(uids.generate("setInterceptor"), "_setInterceptor");
    assert_eq!(uids.generate("setInterceptor"), "_setInterceptor3");
}

#[test]
fn test_resolve_function_variable_and_import() {
    let mut arena = NodeArena::new();
    let import = arena.add_import(
        "lib/trim",
        vec![ImportSpecifier::Named {
            imported: "trim".to_string(),
            local: "t".to_string(),
        }],
    );
    let body = arena.add_block(vec![]);
    let decl = arena.add_function_declaration(FunctionData {
        name: Some("upper".to_string()),
        body,
        ..FunctionData::default()
    });
    let arrow_body = arena.add_identifier("v");
    let arrow = arena.add_function_expression(FunctionData {
        body: arrow_body,
        is_arrow: true,
        ..FunctionData::default()
    });
    let var = arena.add_variable(VariableKind::Const, "lower", Some(arrow));

    let key = arena.add_identifier("p");
    let prop = arena.add_property(PropertyData {
        key,
        computed: false,
        is_static: false,
        value: None,
        decorators: NodeList::new(),
    });
    let class = arena.add_class(ClassData {
        name: Some("A".to_string()),
        members: vec![prop].into(),
        ..ClassData::default()
    });
    let _program = arena.add_program(vec![import, decl, var, class]);

    assert_eq!(resolve_binding(&arena, prop, "upper"), Some(Binding::Function(decl)));
    assert_eq!(
        resolve_binding(&arena, prop, "lower"),
        Some(Binding::Variable {
            declaration: var,
            kind: VariableKind::Const,
            initializer: Some(arrow),
        })
    );
    match resolve_binding(&arena, prop, "t") {
        Some(Binding::Import { source, .. }) => assert_eq!(source, "lib/trim"),
        other => panic!("expected import binding, got {other:?}"),
    }
    assert_eq!(resolve_binding(&arena, prop, "A"), Some(Binding::Class(class)));
    assert_eq!(resolve_binding(&arena, prop, "missing"), None);
}

#[test]
fn test_inner_scope_shadows_outer() {
    let mut arena = NodeArena::new();
    let outer_init = arena.add_number("1");
    let outer = arena.add_variable(VariableKind::Let, "x", Some(outer_init));
    let inner_init = arena.add_number("2");
    let inner = arena.add_variable(VariableKind::Let, "x", Some(inner_init));
    let use_site = arena.add_identifier("x");
    let use_stmt = arena.add_expression_statement(use_site);
    let block = arena.add_block(vec![inner, use_stmt]);
    let _program = arena.add_program(vec![outer, block]);

    match resolve_binding(&arena, use_site, "x") {
        Some(Binding::Variable { declaration, .. }) => assert_eq!(declaration, inner),
        other => panic!("expected inner variable, got {other:?}"),
    }
}

#[test]
fn test_parameters_resolve() {
    let mut arena = NodeArena::new();
    let param = arena.add_identifier("fn");
    let use_site = arena.add_identifier("fn");
    let ret = arena.add_return(Some(use_site));
    let body = arena.add_block(vec![ret]);
    let _func = arena.add_function_declaration(FunctionData {
        name: Some("wrap".to_string()),
        params: vec![param].into(),
        body,
        ..FunctionData::default()
    });
    assert_eq!(
        resolve_binding(&arena, use_site, "fn"),
        Some(Binding::Parameter(param))
    );
}

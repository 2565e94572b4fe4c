use astdec_ast::*;

fn print(arena: &NodeArena, idx: NodeIndex) -> String {
    Printer::emit_to_string(arena, idx)
}

#[test]
fn test_emit_expressions() {
    let mut arena = NodeArena::new();
    let this = arena.add_this();
    let secret = arena.add_private_name("_value");
    let access = arena.add_member(this, secret, false);
    assert_eq!(print(&arena, access), "this.#_value");

    let obj = arena.add_identifier("obj");
    let key = arena.add_string("my-key");
    let computed = arena.add_member(obj, key, true);
    assert_eq!(print(&arena, computed), "obj[\"my-key\"]");

    let f = arena.add_identifier("f");
    let call = arena.add_property_access(f, "call");
    let receiver = arena.add_this();
    let value = arena.add_identifier("value");
    let invoke = arena.add_call(call, vec![receiver, value]);
    assert_eq!(print(&arena, invoke), "f.call(this, value)");
}

#[test]
fn test_emit_string_escapes() {
    let mut arena = NodeArena::new();
    let s = arena.add_string("a\"b\\c\n");
    assert_eq!(print(&arena, s), r#""a\"b\\c\n""#);
}

#[test]
fn test_emit_arrow_and_function() {
    let mut arena = NodeArena::new();
    let param = arena.add_identifier("v");
    let body = arena.add_identifier("v");
    let arrow = arena.add_function_expression(FunctionData {
        params: vec![param].into(),
        body,
        is_arrow: true,
        is_async: true,
        ..FunctionData::default()
    });
    assert_eq!(print(&arena, arrow), "async (v) => v");

    let ret_value = arena.add_number("1");
    let ret = arena.add_return(Some(ret_value));
    let block = arena.add_block(vec![ret]);
    let decl = arena.add_function_declaration(FunctionData {
        name: Some("_gen".to_string()),
        body: block,
        is_generator: true,
        ..FunctionData::default()
    });
    assert_eq!(print(&arena, decl), "function* _gen() {\n    return 1;\n}");
}

#[test]
fn test_emit_parenthesized_callee() {
    let mut arena = NodeArena::new();
    let body = arena.add_block(vec![]);
    let func = arena.add_function_expression(FunctionData {
        body,
        ..FunctionData::default()
    });
    let bind = arena.add_property_access(func, "bind");
    let this = arena.add_this();
    let call = arena.add_call(bind, vec![this]);
    assert_eq!(print(&arena, call), "(function() {}).bind(this)");
}

#[test]
fn test_emit_import_forms() {
    let mut arena = NodeArena::new();
    let import = arena.add_import(
        "decorators",
        vec![
            ImportSpecifier::Default {
                local: "def".to_string(),
            },
            ImportSpecifier::Named {
                imported: "getter".to_string(),
                local: "getter".to_string(),
            },
            ImportSpecifier::Named {
                imported: "setter".to_string(),
                local: "set".to_string(),
            },
        ],
    );
    assert_eq!(
        print(&arena, import),
        "import def, { getter, setter as set } from \"decorators\";"
    );

    let ns = arena.add_import(
        "lib",
        vec![ImportSpecifier::Namespace {
            local: "lib".to_string(),
        }],
    );
    assert_eq!(print(&arena, ns), "import * as lib from \"lib\";");
}

#[test]
fn test_emit_class_with_members_and_decorators() {
    let mut arena = NodeArena::new();

    let dec_expr = arena.add_identifier("observed");
    let dec = arena.add_decorator(dec_expr);
    let key = arena.add_identifier("value");
    let init = arena.add_number("1");
    let prop = arena.add_property(PropertyData {
        key,
        computed: false,
        is_static: true,
        value: Some(init),
        decorators: vec![dec].into(),
    });

    let this = arena.add_this();
    let secret = arena.add_private_name("_value");
    let read = arena.add_member(this, secret, false);
    let ret = arena.add_return(Some(read));
    let body = arena.add_block(vec![ret]);
    let getter_key = arena.add_identifier("value");
    let getter = arena.add_method(MethodData {
        kind: MethodKind::Get,
        key: getter_key,
        computed: false,
        is_static: false,
        params: NodeList::new(),
        body,
        is_generator: false,
        is_async: false,
        decorators: NodeList::new(),
    });

    let gen_key = arena.add_private_name("items");
    let gen_body = arena.add_block(vec![]);
    let generator = arena.add_method(MethodData {
        kind: MethodKind::Method,
        key: gen_key,
        computed: false,
        is_static: false,
        params: NodeList::new(),
        body: gen_body,
        is_generator: true,
        is_async: true,
        decorators: NodeList::new(),
    });

    let base = arena.add_identifier("Base");
    let class = arena.add_class(ClassData {
        name: Some("Foo".to_string()),
        super_class: Some(base),
        members: vec![prop, getter, generator].into(),
        ..ClassData::default()
    });
    let program = arena.add_program(vec![class]);

    let expected = "\
class Foo extends Base {
    @observed
    static value = 1;
    get value() {
        return this.#_value;
    }
    async *#items() {}
}";
    assert_eq!(print(&arena, program), expected);
}

#[test]
fn test_emit_empty_class_expression_in_variable() {
    let mut arena = NodeArena::new();
    let class = arena.add_class(ClassData {
        is_expression: true,
        ..ClassData::default()
    });
    let var = arena.add_variable(VariableKind::Const, "A", Some(class));
    let other = arena.add_raw("run()");
    let stmt = arena.add_expression_statement(other);
    let program = arena.add_program(vec![var, stmt]);
    assert_eq!(print(&arena, program), "const A = class {};\nrun();");
}

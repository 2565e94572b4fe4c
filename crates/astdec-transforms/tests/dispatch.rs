use super::*;
use crate::options::PluginOptions;
use astdec_ast::{ClassData, ImportSpecifier, NodeList, PropertyData, UidGenerator};

fn transformers(json: &str) -> TransformerMap {
    let options = PluginOptions::from_json(json).expect("options parse");
    TransformerMap::from_options(&options).expect("map builds")
}

fn decorator(arena: &mut NodeArena, name: &str) -> NodeIndex {
    let expression = arena.add_identifier(name);
    arena.add_decorator(expression)
}

/// `import { <name> } from "<source>"; class A { @<name> value = 1; }`
fn decorated_property(arena: &mut NodeArena, name: &str, source: &str) -> (NodeIndex, NodeIndex) {
    let import = arena.add_import(
        source,
        vec![ImportSpecifier::Named {
            imported: name.to_string(),
            local: name.to_string(),
        }],
    );
    let dec = decorator(arena, name);
    let key = arena.add_identifier("value");
    let value = arena.add_number("1");
    let property = arena.add_property(PropertyData {
        key,
        computed: false,
        is_static: false,
        value: Some(value),
        decorators: vec![dec].into(),
    });
    let klass = arena.add_class(ClassData {
        name: Some("A".to_string()),
        members: vec![property].into(),
        ..ClassData::default()
    });
    arena.add_program(vec![import, klass]);
    (klass, dec)
}

#[test]
fn test_registered_decorator_is_applied() {
    let mut arena = NodeArena::new();
    let (klass, dec) = decorated_property(&mut arena, "getter", "decorators");
    let map = transformers("{}");
    let mut ctx = TransformContext::with_uids(&mut arena, UidGenerator::new());

    let outcome = process_class_member_decorator(&mut ctx, &map, dec).expect("dispatch");
    assert_eq!(outcome, Dispatch::Applied(TransformerKind::Getter));
    assert_eq!(arena.get_class(klass).map(|c| c.members.len()), Some(2));
}

#[test]
fn test_unknown_decorator_is_inert() {
    let mut arena = NodeArena::new();
    let (klass, dec) = decorated_property(&mut arena, "observed", "lit");
    let map = transformers("{}");
    let mut ctx = TransformContext::with_uids(&mut arena, UidGenerator::new());

    let outcome = process_class_member_decorator(&mut ctx, &map, dec).expect("dispatch");
    assert_eq!(outcome, Dispatch::Inert);
    assert_eq!(arena.get_class(klass).map(|c| c.members.len()), Some(1));
}

#[test]
fn test_excluded_module_is_inert() {
    let mut arena = NodeArena::new();
    let (klass, dec) = decorated_property(&mut arena, "getter", "runtime-decorators/lib");
    let map = transformers(r#"{ "exclude": { "nodeModules": ["runtime-decorators"] } }"#);
    let mut ctx = TransformContext::with_uids(&mut arena, UidGenerator::new());

    let outcome = process_class_member_decorator(&mut ctx, &map, dec).expect("dispatch");
    assert_eq!(outcome, Dispatch::Inert);
    assert_eq!(arena.get_class(klass).map(|c| c.members.len()), Some(1));
    assert!(arena.is_class_member(arena.parent(dec)));
}

#[test]
fn test_detached_decorator_is_a_resolution_error() {
    let mut arena = NodeArena::new();
    let dec = decorator(&mut arena, "getter");
    let map = transformers("{}");
    let mut ctx = TransformContext::with_uids(&mut arena, UidGenerator::new());

    let err = process_class_member_decorator(&mut ctx, &map, dec).expect_err("no owner");
    assert_eq!(
        err,
        TransformError::Resolution {
            decorator: "getter".to_string()
        }
    );
}

#[test]
fn test_member_decorator_on_class_is_a_resolution_error() {
    let mut arena = NodeArena::new();
    let dec = decorator(&mut arena, "bind");
    arena.add_class(ClassData {
        decorators: vec![dec].into(),
        ..ClassData::default()
    });
    let map = transformers("{}");
    let mut ctx = TransformContext::with_uids(&mut arena, UidGenerator::new());

    assert!(matches!(
        process_class_member_decorator(&mut ctx, &map, dec),
        Err(TransformError::Resolution { .. })
    ));
}

#[test]
fn test_member_only_transformer_on_class_is_invalid() {
    let mut arena = NodeArena::new();
    let dec = decorator(&mut arena, "getter");
    let klass = arena.add_class(ClassData {
        name: Some("A".to_string()),
        decorators: vec![dec].into(),
        ..ClassData::default()
    });
    arena.add_program(vec![klass]);
    let map = transformers("{}");
    let mut ctx = TransformContext::with_uids(&mut arena, UidGenerator::new());

    let err = process_class_decorator(&mut ctx, &map, dec).expect_err("getter needs a property");
    assert_eq!(
        err.to_string(),
        "Applying @getter decorator to something other than property is not allowed"
    );
    assert_eq!(arena.decorators_of(klass).map(NodeList::len), Some(1));
}

#[test]
fn test_custom_decorator_name() {
    let mut arena = NodeArena::new();
    let (klass, dec) = decorated_property(&mut arena, "prop", "./decorators");
    let options = PluginOptions::default();
    let map = TransformerMap::builder(&options)
        .expect("builder")
        .register("prop", TransformerKind::Accessor)
        .build();
    assert_eq!(map.len(), 1);
    assert_eq!(map.get("getter"), None);

    let mut ctx = TransformContext::with_uids(&mut arena, UidGenerator::new());
    let outcome = process_class_member_decorator(&mut ctx, &map, dec).expect("dispatch");
    assert_eq!(outcome, Dispatch::Applied(TransformerKind::Accessor));
    assert_eq!(arena.get_class(klass).map(|c| c.members.len()), Some(3));
}

mod common;

use shapegen_core::model::BeanModel;
use shapegen_core::universe::{ClassDescriptor, IdGenerator, IdentityInfo, PropertyDescriptor};
use shapegen_core::{CompileOutput, Compiler, RawType, Settings, TargetType, TypeId, TypeUniverse};

fn library(author_identity: IdentityInfo) -> TypeUniverse {
    TypeUniverse::new()
        .with_type(
            ClassDescriptor::class("lib.Book")
                .with_property(PropertyDescriptor::new("title", RawType::class("String")).required())
                .with_property(PropertyDescriptor::new("author", RawType::class("lib.Author")).required()),
        )
        .with_type(
            ClassDescriptor::class("lib.Author")
                .with_identity(author_identity)
                .with_property(PropertyDescriptor::new("handle", RawType::class("String")).required())
                .with_property(PropertyDescriptor::new("books", common::list_of(RawType::class("lib.Book")))),
        )
}

fn compile_with(universe: &TypeUniverse, root: &str, settings: Settings) -> CompileOutput {
    Compiler::new(settings)
        .unwrap()
        .compile(universe, &[TypeId::new(root)])
        .unwrap()
}

fn bean<'a>(out: &'a CompileOutput, name: &str) -> &'a BeanModel {
    out.declaration(name).and_then(|d| d.as_bean()).unwrap()
}

fn by_handle() -> IdentityInfo {
    IdentityInfo::new(IdGenerator::Property {
        property: "handle".into(),
    })
}

#[test]
fn test_identity_property_gives_object_or_id() {
    let out = compile_with(&library(by_handle()), "lib.Book", Settings::default());
    let author = out.symbols.lookup(&TypeId::new("lib.Author")).unwrap();
    assert_eq!(
        bean(&out, "Book").property("author").unwrap().ty,
        TargetType::union(vec![TargetType::reference(author, vec![]), TargetType::string()])
    );
    assert_eq!(out.declaration_names(), vec!["Book", "Author"]);
}

#[test]
fn test_always_as_id_drops_the_object() {
    let out = compile_with(
        &library(by_handle().always_as_id()),
        "lib.Book",
        Settings::default(),
    );
    assert_eq!(bean(&out, "Book").property("author").unwrap().ty, TargetType::string());
    // only ever referenced by id, so never declared
    assert_eq!(out.declaration_names(), vec!["Book"]);
}

#[test]
fn test_disabled_identity_keeps_plain_reference() {
    let settings = Settings {
        disable_object_identity: true,
        ..Settings::default()
    };
    let out = compile_with(&library(by_handle()), "lib.Book", settings);
    let author = out.symbols.lookup(&TypeId::new("lib.Author")).unwrap();
    assert_eq!(
        bean(&out, "Book").property("author").unwrap().ty,
        TargetType::reference(author, vec![])
    );
}

#[test]
fn test_identity_applies_to_collection_elements() {
    let universe = library(IdentityInfo::new(IdGenerator::IntSequence)).with_type(
        ClassDescriptor::class("lib.Shelf")
            .with_property(PropertyDescriptor::new("authors", common::list_of(RawType::class("lib.Author")))),
    );
    let out = compile_with(&universe, "lib.Shelf", Settings::default());
    let author = out.symbols.lookup(&TypeId::new("lib.Author")).unwrap();
    assert_eq!(
        bean(&out, "Shelf").property("authors").unwrap().ty,
        TargetType::array(TargetType::union(vec![
            TargetType::reference(author, vec![]),
            TargetType::number()
        ]))
    );
}

#[test]
fn test_property_level_identity_overrides_type() {
    let universe = TypeUniverse::new()
        .with_type(
            ClassDescriptor::class("net.Link").with_property(
                PropertyDescriptor::new("target", RawType::class("net.Node"))
                    .required()
                    .with_identity(IdentityInfo::new(IdGenerator::Uuid).always_as_id()),
            ),
        )
        .with_type(ClassDescriptor::class("net.Node").with_identity(IdentityInfo::new(IdGenerator::IntSequence)));
    let out = compile_with(&universe, "net.Link", Settings::default());
    assert_eq!(bean(&out, "Link").property("target").unwrap().ty, TargetType::string());
}

#[test]
fn test_self_referential_identity_terminates() {
    let universe = TypeUniverse::new().with_type(
        ClassDescriptor::class("tree.Node")
            .with_identity(IdentityInfo::new(IdGenerator::IntSequence))
            .with_property(PropertyDescriptor::new("parent", RawType::class("tree.Node")).required())
            .with_property(PropertyDescriptor::new("children", common::list_of(RawType::class("tree.Node")))),
    );
    let out = compile_with(&universe, "tree.Node", Settings::default());
    let node_symbol = out.symbols.lookup(&TypeId::new("tree.Node")).unwrap();
    let node = bean(&out, "Node");
    let object_or_id = TargetType::union(vec![
        TargetType::reference(node_symbol, vec![]),
        TargetType::number(),
    ]);
    assert_eq!(node.property("parent").unwrap().ty, object_or_id);
    assert_eq!(
        node.property("children").unwrap().ty,
        TargetType::array(object_or_id.clone())
    );
    assert_eq!(out.model.len(), 1);
}

#[test]
fn test_inherited_identity() {
    let universe = TypeUniverse::new()
        .with_type(ClassDescriptor::abstract_class("orm.Entity").with_identity(IdentityInfo::new(IdGenerator::StringId)))
        .with_type(ClassDescriptor::class("orm.User").with_superclass(RawType::class("orm.Entity")))
        .with_type(
            ClassDescriptor::class("orm.Session")
                .with_property(PropertyDescriptor::new("user", RawType::class("orm.User")).required()),
        );
    let out = compile_with(&universe, "orm.Session", Settings::default());
    let user = out.symbols.lookup(&TypeId::new("orm.User")).unwrap();
    assert_eq!(
        bean(&out, "Session").property("user").unwrap().ty,
        TargetType::union(vec![TargetType::reference(user, vec![]), TargetType::string()])
    );
}

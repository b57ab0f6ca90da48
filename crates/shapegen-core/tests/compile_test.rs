mod common;

use shapegen_core::diagnostics::Diagnostics;
use shapegen_core::error::{CompileError, ParseError};
use shapegen_core::model::{Primitive, TargetType};
use shapegen_core::parser::{ModelParser, ParsedDeclaration, UniverseParser};
use shapegen_core::resolve::ResolveContext;
use shapegen_core::settings::{CollisionStrategy, NamingSettings};
use shapegen_core::universe::{ClassDescriptor, PropertyDescriptor, Role, SourceTypeRef};
use shapegen_core::{Category, CompileOutput, Compiler, RawType, Settings, TypeId, TypeUniverse};
use anyhow::{Context, Result};
use shapegen_core::settings::BuiltinTransformer;
use std::collections::HashSet;

fn compile(universe: &TypeUniverse, roots: &[&str], settings: Settings) -> Result<CompileOutput> {
    let roots: Vec<TypeId> = roots.iter().map(|r| TypeId::new(*r)).collect();
    Ok(Compiler::new(settings)?.compile(universe, &roots)?)
}

#[test]
fn test_closure_collects_reachable_declarations_in_fifo_order() -> Result<()> {
    let out = compile(&common::shop(), &["shop.Order"], Settings::default())?;
    assert_eq!(
        out.declaration_names(),
        vec!["Order", "OrderLine", "Customer", "Status", "Product"]
    );
    assert!(out.diagnostics.is_empty(), "{:?}", out.diagnostics);
    Ok(())
}

#[test]
fn test_property_types() -> Result<()> {
    let out = compile(&common::shop(), &["shop.Order"], Settings::default())?;
    let order = out.declaration("Order").unwrap().as_bean().unwrap();
    let line = out.symbols.lookup(&TypeId::new("shop.OrderLine")).unwrap();

    let id = order.property("id").unwrap();
    assert_eq!(id.ty, TargetType::number());
    assert!(!id.optional);

    let lines = order.property("lines").unwrap();
    assert_eq!(lines.ty, TargetType::array(TargetType::reference(line, vec![])));
    assert!(lines.optional);

    assert_eq!(
        order.property("attributes").unwrap().ty,
        TargetType::index_signature(TargetType::string(), TargetType::string())
    );
    assert_eq!(order.comments, vec!["A customer order."]);
    Ok(())
}

#[test]
fn test_compilation_is_deterministic() -> Result<()> {
    let universe = common::shop();
    let first = compile(&universe, &["shop.Order", "shop.Product"], Settings::default())?;
    let second = compile(&universe, &["shop.Order", "shop.Product"], Settings::default())?;
    assert_eq!(first.model, second.model);
    assert_eq!(first.declaration_names(), second.declaration_names());
    assert_eq!(
        serde_json::to_string(&first.document()).unwrap(),
        serde_json::to_string(&second.document()).unwrap()
    );
    Ok(())
}

#[test]
fn test_closure_is_complete_and_symbols_unique() -> Result<()> {
    let out = compile(&common::shop(), &["shop.Customer"], Settings::default())?;
    let declared: HashSet<_> = out.model.symbols().collect();
    assert_eq!(declared.len(), out.model.len());
    for declaration in &out.model.declarations {
        for target in declaration.referenced_symbols() {
            assert!(
                declared.contains(&target) || out.symbols.is_external(target),
                "{} is dangling",
                out.symbols.display_name(target)
            );
        }
    }
    Ok(())
}

#[test]
fn test_roots_are_recorded_in_request_order() -> Result<()> {
    let out = compile(&common::shop(), &["shop.Product", "shop.Order"], Settings::default())?;
    let product = out.symbols.lookup(&TypeId::new("shop.Product")).unwrap();
    let order = out.symbols.lookup(&TypeId::new("shop.Order")).unwrap();
    assert_eq!(out.model.roots, vec![product, order]);
    assert_eq!(out.declaration_names()[0], "Product");
    Ok(())
}

#[test]
fn test_empty_roots_give_empty_model() -> Result<()> {
    let out = compile(&common::shop(), &[], Settings::default())?;
    assert!(out.model.is_empty());
    assert!(out.diagnostics.is_empty());
    Ok(())
}

#[test]
fn test_unknown_root_is_reported_not_fatal() -> Result<()> {
    let out = compile(&common::shop(), &["shop.Missing", "shop.Product"], Settings::default())?;
    assert_eq!(out.declaration_names(), vec!["Product"]);
    assert_eq!(out.diagnostics.len(), 1);
    let diagnostic = &out.diagnostics[0];
    assert_eq!(diagnostic.category, Category::ParseFailure);
    assert_eq!(diagnostic.role, Some(Role::Root));
    Ok(())
}

#[test]
fn test_excluded_type_becomes_any() -> Result<()> {
    let settings = Settings {
        exclude: vec!["shop.Customer".into()],
        ..Settings::default()
    };
    let out = compile(&common::shop(), &["shop.Order"], settings)?;
    let order = out.declaration("Order").unwrap().as_bean().unwrap();
    assert_eq!(order.property("customer").unwrap().ty, TargetType::any());
    assert!(out.declaration("Customer").is_none());
    Ok(())
}

/// Delegates to the standard parser but refuses one type.
struct RefusingParser {
    refuse: TypeId,
}

impl ModelParser for RefusingParser {
    fn parse_declaration(
        &self,
        source: &SourceTypeRef,
        ctx: &mut ResolveContext<'_>,
        diagnostics: &mut Diagnostics,
    ) -> Result<ParsedDeclaration, ParseError> {
        if source.identity() == Some(&self.refuse) {
            return Err(ParseError::UnknownType(self.refuse.clone()));
        }
        UniverseParser.parse_declaration(source, ctx, diagnostics)
    }
}

#[test]
fn test_parse_failure_is_isolated() -> Result<()> {
    let compiler = Compiler::new(Settings::default())?.with_parser(RefusingParser {
        refuse: TypeId::new("shop.Customer"),
    });
    let out = compiler.compile(&common::shop(), &[TypeId::new("shop.Order")])?;

    assert_eq!(out.declaration_names(), vec!["Order", "OrderLine", "Status", "Product"]);
    let customer = out
        .symbols
        .lookup(&TypeId::new("shop.Customer"))
        .context("customer keeps its symbol")?;
    assert!(out.symbols.is_external(customer));
    assert_eq!(out.symbols.name_of(customer), Some("Customer"));

    let order = out.declaration("Order").unwrap().as_bean().unwrap();
    assert_eq!(
        order.property("customer").unwrap().ty,
        TargetType::reference(customer, vec![])
    );

    let failures: Vec<_> = out
        .diagnostics
        .iter()
        .filter(|d| d.category == Category::ParseFailure)
        .collect();
    assert_eq!(failures.len(), 1);
    assert_eq!(failures[0].type_id, Some(TypeId::new("shop.Customer")));
    assert_eq!(failures[0].origin, Some(TypeId::new("shop.Order")));
    assert_eq!(failures[0].role, Some(Role::Property("customer".into())));
    Ok(())
}

fn clashing_universe() -> TypeUniverse {
    TypeUniverse::new()
        .with_type(
            ClassDescriptor::class("app.Cart")
                .with_property(PropertyDescriptor::new("billing", RawType::class("billing.Item")))
                .with_property(PropertyDescriptor::new("catalog", RawType::class("catalog.Item"))),
        )
        .with_type(ClassDescriptor::class("billing.Item"))
        .with_type(ClassDescriptor::class("catalog.Item"))
}

#[test]
fn test_name_collision_aborts_by_default() -> Result<()> {
    let err = Compiler::new(Settings::default())?
        .compile(&clashing_universe(), &[TypeId::new("app.Cart")])
        .unwrap_err();
    assert!(matches!(err, CompileError::Naming(_)));
    Ok(())
}

#[test]
fn test_name_collision_qualified() -> Result<()> {
    let settings = Settings {
        naming: NamingSettings {
            collision_strategy: CollisionStrategy::Qualify,
            ..NamingSettings::default()
        },
        ..Settings::default()
    };
    let out = compile(&clashing_universe(), &["app.Cart"], settings)?;
    assert_eq!(out.declaration_names(), vec!["Cart", "BillingItem", "CatalogItem"]);
    Ok(())
}

#[test]
fn test_invalid_settings_rejected_up_front() {
    let mut settings = Settings::default();
    settings
        .custom_type_mappings
        .insert("app.Box<T".into(), "Boxed<T>".into());
    assert!(matches!(Compiler::new(settings), Err(CompileError::Config(_))));
}

#[test]
fn test_type_parameters_flow_through() -> Result<()> {
    let universe = TypeUniverse::new()
        .with_type(
            ClassDescriptor::class("page.Page")
                .with_type_params(&["T"])
                .with_property(PropertyDescriptor::new(
                    "items",
                    common::list_of(RawType::variable("T")),
                )),
        )
        .with_type(ClassDescriptor::class("page.Row"))
        .with_type(ClassDescriptor::class("page.Report").with_property(PropertyDescriptor::new(
            "rows",
            RawType::generic("page.Page", vec![RawType::class("page.Row")]),
        )));
    let out = compile(&universe, &["page.Report"], Settings::default())?;
    assert_eq!(out.declaration_names(), vec!["Report", "Page", "Row"]);

    let page = out.declaration("Page").unwrap().as_bean().unwrap();
    assert_eq!(page.type_params, vec!["T"]);
    assert_eq!(
        page.property("items").unwrap().ty,
        TargetType::array(TargetType::variable("T"))
    );

    let report = out.declaration("Report").unwrap().as_bean().unwrap();
    let rows = &report.property("rows").unwrap().ty;
    assert_eq!(rows.describe(&out.symbols), "Page<Row>");
    assert!(!rows.is_primitive(Primitive::Unknown));
    Ok(())
}

#[test]
fn test_unsupported_property_does_not_abort_the_graph() -> Result<()> {
    let universe = TypeUniverse::new()
        .with_type(
            ClassDescriptor::class("job.Pipeline")
                .with_property(PropertyDescriptor::new("first", RawType::class("job.Step")))
                .with_property(PropertyDescriptor::new("sink", RawType::class("job.Sink"))),
        )
        .with_type(
            ClassDescriptor::class("job.Step")
                .with_property(PropertyDescriptor::new("name", RawType::class("String")))
                .with_property(PropertyDescriptor::new("callback", RawType::opaque("(String) -> Unit"))),
        )
        .with_type(ClassDescriptor::class("job.Sink"));

    let out = compile(&universe, &["job.Pipeline"], Settings::default())?;
    assert_eq!(out.declaration_names(), vec!["Pipeline", "Step", "Sink"]);
    assert_eq!(out.diagnostics.len(), 1);
    assert_eq!(out.diagnostics[0].category, Category::UnsupportedType);

    let step = out.declaration("Step").unwrap().as_bean().unwrap();
    assert_eq!(step.property("callback").unwrap().ty, TargetType::unknown());
    assert_eq!(step.property("name").unwrap().ty, TargetType::string());
    Ok(())
}

fn half_resolved_universe() -> TypeUniverse {
    TypeUniverse::new()
        .with_type(
            ClassDescriptor::class("a.Holder")
                .with_property(PropertyDescriptor::new("item", RawType::class("a.Item")))
                .with_property(PropertyDescriptor::new(
                    "broken",
                    RawType::generic("Map", vec![RawType::class("b.Item"), RawType::opaque("fn()")]),
                )),
        )
        .with_type(ClassDescriptor::class("a.Item"))
        .with_type(ClassDescriptor::class("b.Item"))
}

#[test]
fn test_failed_property_leaves_no_named_symbols() -> Result<()> {
    let out = compile(&half_resolved_universe(), &["a.Holder"], Settings::default())?;
    assert_eq!(out.declaration_names(), vec!["Holder", "Item"]);
    assert_eq!(out.diagnostics.len(), 1);
    assert_eq!(out.diagnostics[0].category, Category::UnsupportedType);

    let holder = out.declaration("Holder").and_then(|d| d.as_bean()).context("Holder")?;
    assert_eq!(holder.property("broken").context("broken")?.ty, TargetType::unknown());

    assert_eq!(out.symbols.lookup(&TypeId::new("b.Item")), None);
    let document = out.document();
    assert!(document.symbols.iter().all(|s| s.key != "b.Item"));
    Ok(())
}

#[test]
fn test_pruned_declaration_does_not_collide() -> Result<()> {
    let universe = TypeUniverse::new()
        .with_type(
            ClassDescriptor::class("app.Envelope")
                .with_property(PropertyDescriptor::new("audit", RawType::class("x.Audit")).unwrapped("audit_", ""))
                .with_property(PropertyDescriptor::new("log", RawType::class("y.Audit"))),
        )
        .with_type(
            ClassDescriptor::class("x.Audit")
                .with_property(PropertyDescriptor::new("by", RawType::class("String")).required()),
        )
        .with_type(ClassDescriptor::class("y.Audit"));
    let settings = Settings {
        transformers: vec![
            BuiltinTransformer::InlinePulledProperties,
            BuiltinTransformer::PruneUnreferenced,
        ],
        ..Settings::default()
    };

    let out = compile(&universe, &["app.Envelope"], settings)?;
    assert_eq!(out.declaration_names(), vec!["Envelope", "Audit"]);
    let audit = out.symbols.lookup(&TypeId::new("y.Audit")).context("y.Audit declared")?;
    assert_eq!(out.symbols.name_of(audit), Some("Audit"));

    let envelope = out.declaration("Envelope").and_then(|d| d.as_bean()).context("Envelope")?;
    let names: Vec<_> = envelope.properties.iter().map(|p| p.name.as_str()).collect();
    assert_eq!(names, vec!["audit_by", "log"]);
    Ok(())
}

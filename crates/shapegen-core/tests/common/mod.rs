#![allow(dead_code)]

use shapegen_core::universe::{
    ClassDescriptor, EnumConstant, NamedType, PropertyDescriptor, RawType, TypeIdInclusion,
    TypeIdKind, TypeInfo, TypeUniverse,
};

pub fn list_of(element: RawType) -> RawType {
    RawType::generic("List", vec![element])
}

/// An order domain with a reference cycle (customer <-> order).
pub fn shop() -> TypeUniverse {
    TypeUniverse::new()
        .with_type(
            ClassDescriptor::class("shop.Order")
                .with_description("A customer order.")
                .with_property(
                    PropertyDescriptor::new("id", RawType::class("long"))
                        .required()
                        .with_field_index(0),
                )
                .with_property(
                    PropertyDescriptor::new("lines", list_of(RawType::class("shop.OrderLine")))
                        .with_field_index(1),
                )
                .with_property(
                    PropertyDescriptor::new("customer", RawType::class("shop.Customer"))
                        .with_field_index(2),
                )
                .with_property(
                    PropertyDescriptor::new("status", RawType::class("shop.Status")).with_field_index(3),
                )
                .with_property(
                    PropertyDescriptor::new(
                        "attributes",
                        RawType::generic("Map", vec![RawType::class("String"), RawType::class("String")]),
                    )
                    .with_field_index(4),
                ),
        )
        .with_type(
            ClassDescriptor::class("shop.OrderLine")
                .with_property(PropertyDescriptor::new("product", RawType::class("shop.Product")).required())
                .with_property(PropertyDescriptor::new("quantity", RawType::class("int")).required()),
        )
        .with_type(
            ClassDescriptor::class("shop.Product")
                .with_property(PropertyDescriptor::new("sku", RawType::class("String")).required()),
        )
        .with_type(
            ClassDescriptor::class("shop.Customer")
                .with_property(PropertyDescriptor::new("name", RawType::class("String")))
                .with_property(PropertyDescriptor::new("orders", list_of(RawType::class("shop.Order")))),
        )
        .with_type(ClassDescriptor::enumeration(
            "shop.Status",
            vec![EnumConstant::named("OPEN"), EnumConstant::named("SHIPPED")],
        ))
        .with_type(ClassDescriptor::class("shop.Unrelated"))
}

/// `vehicle.Vehicle` anchors a union over `kind`, which it declares itself.
pub fn vehicles(include: TypeIdInclusion) -> TypeUniverse {
    TypeUniverse::new()
        .with_type(
            ClassDescriptor::abstract_class("vehicle.Vehicle")
                .with_type_info(TypeInfo::new(include, TypeIdKind::Name).with_property("kind"))
                .with_subtypes(vec![
                    NamedType::named("vehicle.Car", "a"),
                    NamedType::named("vehicle.Bike", "b"),
                ])
                .with_property(PropertyDescriptor::new("kind", RawType::class("String")).required())
                .with_property(PropertyDescriptor::new("wheels", RawType::class("int")).required()),
        )
        .with_type(
            ClassDescriptor::class("vehicle.Car")
                .with_superclass(RawType::class("vehicle.Vehicle"))
                .with_property(PropertyDescriptor::new("doors", RawType::class("int"))),
        )
        .with_type(
            ClassDescriptor::class("vehicle.Bike")
                .with_superclass(RawType::class("vehicle.Vehicle"))
                .with_property(PropertyDescriptor::new("kind", RawType::class("String"))),
        )
        .with_type(
            ClassDescriptor::class("vehicle.Garage")
                .with_property(PropertyDescriptor::new("vehicles", list_of(RawType::class("vehicle.Vehicle")))),
        )
}

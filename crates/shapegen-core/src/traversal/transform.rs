//! Transform visitors for target types.
//!
//! A visitor rebuilds a [`TargetType`] bottom-up: the walker recurses into
//! nested types and hands each rebuilt node to the visitor's hooks, so an
//! implementor only overrides the nodes it cares about.
//!
//! # Example
//!
//! ```ignore
//! struct EraseVariables;
//!
//! impl TypeTransformVisitor for EraseVariables {
//!     type Error = std::convert::Infallible;
//!
//!     fn transform_variable(&self, _name: &str) -> Result<TargetType, Self::Error> {
//!         Ok(TargetType::unknown())
//!     }
//! }
//! ```

use crate::model::{DeclarationModel, ObjectMember, PropertyModel, TargetType};
use crate::naming::Symbol;

pub trait TypeTransformVisitor {
    type Error;

    /// Transform a complete type. Uses the default walker implementation.
    fn transform_type(&self, ty: &TargetType) -> Result<TargetType, Self::Error> {
        walk_transform_type(self, ty)
    }

    fn transform_member(&self, member: &ObjectMember) -> Result<ObjectMember, Self::Error> {
        Ok(ObjectMember {
            name: member.name.clone(),
            ty: self.transform_type(&member.ty)?,
            optional: member.optional,
        })
    }

    /// Called with already-transformed arguments.
    fn transform_reference(&self, symbol: Symbol, args: Vec<TargetType>) -> Result<TargetType, Self::Error> {
        Ok(TargetType::reference(symbol, args))
    }

    /// Called with already-transformed members.
    fn transform_union(&self, members: Vec<TargetType>) -> Result<TargetType, Self::Error> {
        Ok(TargetType::union(members))
    }

    fn transform_variable(&self, name: &str) -> Result<TargetType, Self::Error> {
        Ok(TargetType::variable(name))
    }
}

/// Walk and transform a type, recursively transforming nested types.
pub fn walk_transform_type<V>(visitor: &V, ty: &TargetType) -> Result<TargetType, V::Error>
where
    V: TypeTransformVisitor + ?Sized,
{
    match ty {
        TargetType::Reference { symbol, args } => {
            let new_args: Result<Vec<_>, _> = args.iter().map(|a| visitor.transform_type(a)).collect();
            visitor.transform_reference(*symbol, new_args?)
        }
        TargetType::Array { element } => Ok(TargetType::array(visitor.transform_type(element)?)),
        TargetType::Union { members } => {
            let new_members: Result<Vec<_>, _> =
                members.iter().map(|m| visitor.transform_type(m)).collect();
            visitor.transform_union(new_members?)
        }
        TargetType::Object { members } => {
            let new_members: Result<Vec<_>, _> =
                members.iter().map(|m| visitor.transform_member(m)).collect();
            Ok(TargetType::Object {
                members: new_members?,
            })
        }
        TargetType::IndexSignature { key, value } => Ok(TargetType::index_signature(
            visitor.transform_type(key)?,
            visitor.transform_type(value)?,
        )),
        TargetType::Variable { name } => visitor.transform_variable(name),
        TargetType::Primitive { .. } | TargetType::Literal { .. } | TargetType::Verbatim { .. } => {
            Ok(ty.clone())
        }
    }
}

fn transform_properties<V>(visitor: &V, properties: &[PropertyModel]) -> Result<Vec<PropertyModel>, V::Error>
where
    V: TypeTransformVisitor + ?Sized,
{
    properties
        .iter()
        .map(|p| {
            Ok(PropertyModel {
                ty: visitor.transform_type(&p.ty)?,
                ..p.clone()
            })
        })
        .collect()
}

/// Transform every type inside a declaration: property types, parent and
/// interfaces.
pub fn transform_declaration<V>(visitor: &V, declaration: &DeclarationModel) -> Result<DeclarationModel, V::Error>
where
    V: TypeTransformVisitor + ?Sized,
{
    match declaration {
        DeclarationModel::Bean(bean) => {
            let mut out = bean.clone();
            out.parent = bean
                .parent
                .as_ref()
                .map(|p| visitor.transform_type(p))
                .transpose()?;
            out.interfaces = bean
                .interfaces
                .iter()
                .map(|i| visitor.transform_type(i))
                .collect::<Result<_, _>>()?;
            out.properties = transform_properties(visitor, &bean.properties)?;
            Ok(DeclarationModel::Bean(out))
        }
        DeclarationModel::Enum(e) => {
            let mut out = e.clone();
            out.properties = transform_properties(visitor, &e.properties)?;
            Ok(DeclarationModel::Enum(out))
        }
    }
}

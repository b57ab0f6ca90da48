use super::{ModelTransformer, TransformError};
use crate::model::{Model, Primitive, TargetType};
use crate::naming::SymbolTable;
use crate::traversal::{TypeTransformVisitor, transform_declaration};
use std::convert::Infallible;

/// Normalizes unions and turns `T | undefined` property types into optional
/// properties of type `T`.
///
/// Nested unions are flattened, duplicate members removed and single-member
/// unions collapsed.
#[derive(Debug, Clone, Copy, Default)]
pub struct FoldOptionalWrappers;

struct NormalizeUnions;

impl TypeTransformVisitor for NormalizeUnions {
    type Error = Infallible;

    fn transform_union(&self, members: Vec<TargetType>) -> Result<TargetType, Self::Error> {
        let mut flat: Vec<TargetType> = Vec::with_capacity(members.len());
        for member in members {
            let nested = match member {
                TargetType::Union { members } => members,
                other => vec![other],
            };
            for ty in nested {
                if !flat.contains(&ty) {
                    flat.push(ty);
                }
            }
        }
        Ok(collapse(flat))
    }
}

fn collapse(mut members: Vec<TargetType>) -> TargetType {
    if members.len() == 1 {
        members.remove(0)
    } else {
        TargetType::union(members)
    }
}

impl ModelTransformer for FoldOptionalWrappers {
    fn name(&self) -> &str {
        "fold-optional-wrappers"
    }

    fn transform(&self, _symbols: &SymbolTable, model: Model) -> Result<Model, TransformError> {
        let mut declarations = Vec::with_capacity(model.declarations.len());
        for declaration in &model.declarations {
            let Ok(mut declaration) = transform_declaration(&NormalizeUnions, declaration);
            for property in declaration.properties_mut() {
                let TargetType::Union { members } = &property.ty else {
                    continue;
                };
                let has_undefined = members.iter().any(|m| m.is_primitive(Primitive::Undefined));
                if !has_undefined || members.len() < 2 {
                    continue;
                }
                let rest: Vec<TargetType> = members
                    .iter()
                    .filter(|m| !m.is_primitive(Primitive::Undefined))
                    .cloned()
                    .collect();
                property.ty = collapse(rest);
                property.optional = true;
            }
            declarations.push(declaration);
        }
        Ok(Model {
            declarations,
            roots: model.roots,
        })
    }
}

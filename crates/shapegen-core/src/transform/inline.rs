use super::{ModelTransformer, TransformError};
use crate::model::{DeclarationModel, Model, PropertyModel, TargetType};
use crate::naming::{Symbol, SymbolTable};
use std::collections::HashMap;

/// Replaces every property carrying a pull directive with the properties of
/// the declaration it references, renamed with the directive's prefix and
/// suffix. Pulls nest; a pull cycle keeps the offending property as-is.
///
/// The pulled declaration itself stays in the model; run `prune-unreferenced`
/// afterwards to drop it when nothing else uses it.
#[derive(Debug, Clone, Copy, Default)]
pub struct InlinePulledProperties;

impl ModelTransformer for InlinePulledProperties {
    fn name(&self) -> &str {
        "inline-pulled-properties"
    }

    fn transform(&self, _symbols: &SymbolTable, mut model: Model) -> Result<Model, TransformError> {
        let snapshot: HashMap<Symbol, Vec<PropertyModel>> = model
            .declarations
            .iter()
            .map(|d| (d.symbol(), d.properties().to_vec()))
            .collect();

        for declaration in &mut model.declarations {
            if !declaration.properties().iter().any(|p| p.pull.is_some()) {
                continue;
            }
            let mut stack = vec![declaration.symbol()];
            let expanded = expand(declaration.properties(), &snapshot, &mut stack);
            *declaration.properties_mut() = expanded;
            if let DeclarationModel::Bean(bean) = declaration {
                tracing::trace!(origin = %bean.origin, "inlined pulled properties");
            }
        }
        Ok(model)
    }
}

fn expand(
    properties: &[PropertyModel],
    snapshot: &HashMap<Symbol, Vec<PropertyModel>>,
    stack: &mut Vec<Symbol>,
) -> Vec<PropertyModel> {
    let mut out = Vec::with_capacity(properties.len());
    for property in properties {
        let target = match (&property.pull, &property.ty) {
            (Some(pull), TargetType::Reference { symbol, .. }) => {
                snapshot.get(symbol).map(|props| (pull, *symbol, props))
            }
            _ => None,
        };
        match target {
            Some((pull, symbol, pulled)) if !stack.contains(&symbol) => {
                stack.push(symbol);
                for inner in expand(pulled, snapshot, stack) {
                    out.push(PropertyModel {
                        name: format!("{}{}{}", pull.prefix, inner.name, pull.suffix),
                        ..inner
                    });
                }
                stack.pop();
            }
            _ => out.push(PropertyModel {
                pull: None,
                ..property.clone()
            }),
        }
    }
    out
}

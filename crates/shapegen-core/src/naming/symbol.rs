//! Per-compilation symbol table.
//!
//! Every declaration the compiler emits is referred to by a [`Symbol`]: a
//! stable handle allocated on first sight of a type identity. Final output names
//! are assigned in one pass after the closure completes, so the model graph can
//! reference types before their names are known.

use crate::error::NamingError;
use crate::settings::{CollisionStrategy, NamingSettings};
use crate::universe::TypeId;
use indexmap::IndexMap;
use lasso::{Key, Rodeo, Spur};
use serde::{Serialize, Serializer};
use std::collections::HashSet;

const EXTERNAL_PREFIX: &str = "external::";

/// Opaque handle to a declaration (or external name) in a [`SymbolTable`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Symbol(Spur);

impl Symbol {
    /// Allocation index within the owning table.
    pub fn index(self) -> usize {
        self.0.into_usize()
    }
}

impl Serialize for Symbol {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_u64(self.index() as u64)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SymbolKind {
    /// A declaration the compiler parses and emits.
    Declared,
    /// A name emitted verbatim; no declaration is generated for it.
    External,
}

#[derive(Debug, Clone)]
struct SymbolEntry {
    kind: SymbolKind,
    name: Option<String>,
}

/// Serializable view of one table entry.
#[derive(Debug, Clone, Serialize)]
pub struct SymbolInfo {
    pub symbol: Symbol,
    pub key: String,
    pub kind: SymbolKind,
    pub name: Option<String>,
}

#[derive(Debug, Default)]
pub struct SymbolTable {
    keys: Rodeo,
    entries: IndexMap<Symbol, SymbolEntry>,
}

impl SymbolTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// The symbol for a declared type, allocated on first request.
    pub fn symbol_for(&mut self, id: &TypeId) -> Symbol {
        let symbol = Symbol(self.keys.get_or_intern(id.as_str()));
        self.entries.entry(symbol).or_insert(SymbolEntry {
            kind: SymbolKind::Declared,
            name: None,
        });
        symbol
    }

    /// The symbol for a verbatim external name (a mapping target, say).
    pub fn external(&mut self, name: &str) -> Symbol {
        let key = format!("{EXTERNAL_PREFIX}{name}");
        let symbol = Symbol(self.keys.get_or_intern(&key));
        self.entries.entry(symbol).or_insert(SymbolEntry {
            kind: SymbolKind::External,
            name: Some(name.to_string()),
        });
        symbol
    }

    pub fn lookup(&self, id: &TypeId) -> Option<Symbol> {
        self.keys
            .get(id.as_str())
            .map(Symbol)
            .filter(|symbol| self.entries.contains_key(symbol))
    }

    /// Forget every symbol outside `live`. Symbols interned while resolving a
    /// type that later failed never reach the model and must not take part
    /// in naming.
    pub fn retain(&mut self, live: &HashSet<Symbol>) {
        let before = self.entries.len();
        self.entries.retain(|symbol, _| live.contains(symbol));
        let dropped = before - self.entries.len();
        if dropped > 0 {
            tracing::debug!(dropped, "dropped unused symbols");
        }
    }

    /// Mark a declared symbol as excluded from the graph. Its simple name is
    /// still emitted where it is referenced.
    pub fn mark_external(&mut self, symbol: Symbol) {
        if let Some(entry) = self.entries.get_mut(&symbol) {
            entry.kind = SymbolKind::External;
        }
    }

    pub fn is_external(&self, symbol: Symbol) -> bool {
        self.entries
            .get(&symbol)
            .is_some_and(|e| e.kind == SymbolKind::External)
    }

    pub fn contains(&self, symbol: Symbol) -> bool {
        self.entries.contains_key(&symbol)
    }

    /// The type identity behind a declared symbol.
    pub fn type_id(&self, symbol: Symbol) -> Option<TypeId> {
        let key = self.keys.try_resolve(&symbol.0)?;
        if key.starts_with(EXTERNAL_PREFIX) {
            return None;
        }
        Some(TypeId::new(key))
    }

    /// Assigned output name, available once [`SymbolTable::assign_names`] ran
    /// (external names are known immediately).
    pub fn name_of(&self, symbol: Symbol) -> Option<&str> {
        self.entries.get(&symbol)?.name.as_deref()
    }

    /// Name if assigned, otherwise the raw key. For messages and sorting.
    pub fn display_name(&self, symbol: Symbol) -> String {
        if let Some(name) = self.name_of(symbol) {
            return name.to_string();
        }
        self.keys
            .try_resolve(&symbol.0)
            .map(|k| k.trim_start_matches(EXTERNAL_PREFIX).to_string())
            .unwrap_or_else(|| format!("#{}", symbol.index()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn symbols(&self) -> impl Iterator<Item = Symbol> + '_ {
        self.entries.keys().copied()
    }

    pub fn describe(&self) -> Vec<SymbolInfo> {
        self.entries
            .iter()
            .map(|(symbol, entry)| SymbolInfo {
                symbol: *symbol,
                key: self.keys.resolve(&symbol.0).to_string(),
                kind: entry.kind,
                name: entry.name.clone(),
            })
            .collect()
    }

    /// Assign final names to every symbol.
    ///
    /// External symbols keep their verbatim names and claim them first.
    /// Declared symbols take their derived name in allocation order; clashes
    /// are settled by the configured [`CollisionStrategy`].
    pub fn assign_names(&mut self, naming: &NamingSettings) -> Result<(), NamingError> {
        self.assign_with(naming, naming.collision_strategy)
    }

    /// Names for use while the model is still being transformed. Never fails:
    /// under [`CollisionStrategy::Fail`] clashes get a numeric suffix until the
    /// final assignment decides.
    pub fn assign_provisional_names(&mut self, naming: &NamingSettings) {
        let strategy = match naming.collision_strategy {
            CollisionStrategy::Fail => CollisionStrategy::NumericSuffix,
            other => other,
        };
        // neither lenient strategy reports a collision
        let _ = self.assign_with(naming, strategy);
    }

    fn assign_with(
        &mut self,
        naming: &NamingSettings,
        strategy: CollisionStrategy,
    ) -> Result<(), NamingError> {
        let mut taken: HashSet<String> = HashSet::new();
        let mut external_names: Vec<(Symbol, String)> = Vec::new();
        let mut declared: Vec<(Symbol, TypeId, String)> = Vec::new();

        for (symbol, entry) in &self.entries {
            let key = self.keys.resolve(&symbol.0);
            match (entry.kind, key.strip_prefix(EXTERNAL_PREFIX)) {
                (_, Some(name)) => external_names.push((*symbol, name.to_string())),
                (SymbolKind::External, None) => {
                    // Excluded or unparsable declaration; referenced by simple name.
                    let id = TypeId::new(key);
                    let name = derive_name(&id, naming);
                    external_names.push((*symbol, name));
                }
                (SymbolKind::Declared, None) => {
                    let id = TypeId::new(key);
                    let name = derive_name(&id, naming);
                    declared.push((*symbol, id, name));
                }
            }
        }

        let mut assigned: Vec<(Symbol, String)> = Vec::with_capacity(self.entries.len());
        for (symbol, name) in external_names {
            taken.insert(name.clone());
            assigned.push((symbol, name));
        }

        let mut clashes: IndexMap<String, Vec<usize>> = IndexMap::new();
        for (i, (_, _, name)) in declared.iter().enumerate() {
            clashes.entry(name.clone()).or_default().push(i);
        }

        for (name, members) in &clashes {
            let clashing = members.len() > 1 || taken.contains(name);
            if !clashing {
                let (symbol, _, _) = &declared[members[0]];
                taken.insert(name.clone());
                assigned.push((*symbol, name.clone()));
                continue;
            }
            match strategy {
                CollisionStrategy::Fail => {
                    return Err(NamingError::Collision {
                        name: name.clone(),
                        types: members
                            .iter()
                            .map(|&i| declared[i].1.to_string())
                            .collect(),
                    });
                }
                CollisionStrategy::Qualify => {
                    for &i in members {
                        let (symbol, id, base) = &declared[i];
                        let qualified = qualify(id, base);
                        let unique = unique_name(&qualified, &taken);
                        taken.insert(unique.clone());
                        assigned.push((*symbol, unique));
                    }
                }
                CollisionStrategy::NumericSuffix => {
                    for &i in members {
                        let (symbol, _, base) = &declared[i];
                        let unique = unique_name(base, &taken);
                        taken.insert(unique.clone());
                        assigned.push((*symbol, unique));
                    }
                }
            }
        }

        for (symbol, name) in assigned {
            if let Some(entry) = self.entries.get_mut(&symbol) {
                entry.name = Some(name);
            }
        }
        Ok(())
    }
}

/// Output name for a declared type: explicit override, else the simple name
/// with prefix/suffix rules applied.
pub fn derive_name(id: &TypeId, naming: &NamingSettings) -> String {
    if let Some(custom) = naming.custom_type_naming.get(id.as_str()) {
        return custom.clone();
    }
    let mut name = id.simple_name().to_string();
    if let Some(prefix) = &naming.remove_type_name_prefix {
        if let Some(rest) = name.strip_prefix(prefix.as_str()) {
            if !rest.is_empty() {
                name = rest.to_string();
            }
        }
    }
    if let Some(suffix) = &naming.remove_type_name_suffix {
        if let Some(rest) = name.strip_suffix(suffix.as_str()) {
            if !rest.is_empty() {
                name = rest.to_string();
            }
        }
    }
    format!(
        "{}{}{}",
        naming.add_type_name_prefix.as_deref().unwrap_or(""),
        name,
        naming.add_type_name_suffix.as_deref().unwrap_or("")
    )
}

/// `com.acme.billing.Item` named `Item` -> `BillingItem`.
fn qualify(id: &TypeId, base: &str) -> String {
    match id.namespace().last() {
        Some(segment) => format!("{}{}", capitalize(segment), base),
        None => base.to_string(),
    }
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

fn unique_name(base: &str, taken: &HashSet<String>) -> String {
    if !taken.contains(base) {
        return base.to_string();
    }
    (2..)
        .map(|n| format!("{base}{n}"))
        .find(|candidate| !taken.contains(candidate))
        .unwrap_or_else(|| base.to_string())
}

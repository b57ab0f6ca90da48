pub mod generic_name;
pub mod symbol;

pub use generic_name::{GenericName, GenericNameError};
pub use symbol::{Symbol, SymbolInfo, SymbolKind, SymbolTable, derive_name};

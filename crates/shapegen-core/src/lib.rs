//! Shapegen compiler core.
//!
//! Compiles the object-oriented type graph described by a [`TypeUniverse`]
//! into structural declarations: beans with properties, enums, tagged unions.
//! The output [`Model`] references types through a per-compilation
//! [`SymbolTable`] and is meant to be handed to a language emitter.
//!
//! ```ignore
//! let compiler = Compiler::new(Settings::default())?;
//! let output = compiler.compile(&universe, &[TypeId::new("com.acme.Order")])?;
//! for declaration in &output.model.declarations { /* emit */ }
//! ```

pub mod closure;
pub mod compiler;
pub mod diagnostics;
pub mod error;
pub mod model;
pub mod naming;
pub mod ordering;
pub mod parser;
pub mod resolve;
pub mod settings;
pub mod tagged_union;
pub mod transform;
pub mod traversal;
pub mod universe;

pub use compiler::{CompileOutput, CompiledDocument, Compiler};
pub use diagnostics::{Category, Diagnostic, Severity};
pub use error::{CompileError, ConfigError};
pub use model::{DeclarationModel, Model, TargetType};
pub use naming::{GenericName, Symbol, SymbolTable};
pub use settings::Settings;
pub use universe::{ClassDescriptor, PropertyDescriptor, RawType, TypeId, TypeUniverse};

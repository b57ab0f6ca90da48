pub mod transform;

pub use transform::{TypeTransformVisitor, transform_declaration, walk_transform_type};

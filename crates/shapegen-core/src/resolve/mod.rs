//! Type resolution: turning a [`RawType`](crate::universe::RawType) into a
//! [`TargetType`](crate::model::TargetType) through an ordered chain of stages.

pub mod chain;
pub mod custom;
pub mod exclusion;
pub mod identity;
pub mod semantic;
pub mod structural;

pub use chain::{
    ChainPosition, ResolveContext, ResolveFn, Resolution, Resolved, Resolver, ResolverChain,
};
pub use custom::CustomMappings;
pub use exclusion::ExclusionFilter;

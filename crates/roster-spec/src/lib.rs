//! Composable specifications over persisted entities.
//!
//! A [`Specification`] describes filter criteria as data. The same value can
//! be evaluated in memory against an [`Entity`] (with a [`JoinContext`]
//! supplying related entities) or compiled into a backend-neutral
//! [`Clause`] for a query builder to render.
//!
//! # Example
//!
//! ```ignore
//! use roster_spec::prelude::*;
//!
//! let spec = Specification::attribute_equals("username", "m1")
//!     & Specification::joined_attribute_equals("team", "name", "teamA");
//!
//! if evaluate(&spec, &member, &teams)? {
//!     // matched
//! }
//! ```

pub mod compile;
pub mod context;
pub mod error;
pub mod operators;
pub mod schema;
pub mod specification;
pub mod value;

#[cfg(test)]
mod fixtures;

pub use compile::{Clause, Join};
pub use context::{JoinContext, SliceContext};
pub use error::SpecError;
pub use schema::{Attribute, Entity, Relation, Schema};
pub use specification::Specification;
pub use value::{Value, ValueKind};

/// Evaluate `spec` against `entity`, resolving joins through `ctx`.
///
/// Unknown attribute or relation names are reported before evaluation
/// starts, regardless of short-circuiting.
pub fn evaluate<E, C>(spec: &Specification, entity: &E, ctx: &C) -> Result<bool, SpecError>
where
    E: Entity + ?Sized,
    C: JoinContext + ?Sized,
{
    spec.is_satisfied_by(entity, ctx)
}


/// Prelude module - import everything you need with `use roster_spec::prelude::*`
pub mod prelude {
    pub use crate::compile::{Clause, Join};
    pub use crate::context::{JoinContext, SliceContext};
    pub use crate::error::SpecError;
    pub use crate::evaluate;
    pub use crate::schema::{Attribute, Entity, Relation, Schema};
    pub use crate::specification::Specification;
    pub use crate::value::{Value, ValueKind};
}

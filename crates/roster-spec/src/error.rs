//! Specification errors.

use thiserror::Error;

use crate::value::ValueKind;

/// Configuration mistakes in a specification.
///
/// An empty filter value is not an error; it yields a no-op specification.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SpecError {
    #[error("entity `{entity}` has no attribute `{attribute}`")]
    UnknownAttribute {
        entity: &'static str,
        attribute: String,
    },

    #[error("entity `{entity}` has no relation `{relation}`")]
    UnknownRelation {
        entity: &'static str,
        relation: String,
    },

    #[error("attribute `{entity}.{attribute}` is {expected}, got a {found} value")]
    TypeMismatch {
        entity: &'static str,
        attribute: &'static str,
        expected: ValueKind,
        found: ValueKind,
    },
}

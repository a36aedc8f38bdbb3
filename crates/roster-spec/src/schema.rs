//! Static entity schemas.
//!
//! A schema names the attributes and relations a specification may refer
//! to. Schemas are declared as `static` items next to the entity type and
//! double as the column/table mapping for query compilation.

use crate::error::SpecError;
use crate::value::{Value, ValueKind};

/// One attribute (column) of an entity.
#[derive(Debug, PartialEq, Eq)]
pub struct Attribute {
    pub name: &'static str,
    pub kind: ValueKind,
    pub nullable: bool,
}

impl Attribute {
    pub const fn new(name: &'static str, kind: ValueKind) -> Self {
        Self {
            name,
            kind,
            nullable: false,
        }
    }

    pub const fn nullable(name: &'static str, kind: ValueKind) -> Self {
        Self {
            name,
            kind,
            nullable: true,
        }
    }
}

/// A many-to-one association reached through a foreign-key attribute.
#[derive(Debug)]
pub struct Relation {
    pub name: &'static str,
    /// Attribute on the owning entity holding the related key.
    pub foreign_key: &'static str,
    pub target: &'static Schema,
}

/// Description of an entity type.
#[derive(Debug)]
pub struct Schema {
    pub name: &'static str,
    pub table: &'static str,
    pub key: &'static str,
    pub attributes: &'static [Attribute],
    pub relations: &'static [Relation],
}

impl Schema {
    pub fn attribute(&self, name: &str) -> Option<&'static Attribute> {
        self.attributes.iter().find(|a| a.name == name)
    }

    pub fn relation(&self, name: &str) -> Option<&'static Relation> {
        self.relations.iter().find(|r| r.name == name)
    }

    /// Look up an attribute, failing with a descriptive error.
    pub fn require_attribute(&self, name: &str) -> Result<&'static Attribute, SpecError> {
        self.attribute(name).ok_or_else(|| SpecError::UnknownAttribute {
            entity: self.name,
            attribute: name.to_string(),
        })
    }

    pub fn require_relation(&self, name: &str) -> Result<&'static Relation, SpecError> {
        self.relation(name).ok_or_else(|| SpecError::UnknownRelation {
            entity: self.name,
            relation: name.to_string(),
        })
    }

    /// Check that `value` may be compared against the attribute `name`.
    pub fn check_value(&self, name: &str, value: &Value) -> Result<&'static Attribute, SpecError> {
        let attribute = self.require_attribute(name)?;
        match value.kind() {
            Some(kind) if kind != attribute.kind => Err(SpecError::TypeMismatch {
                entity: self.name,
                attribute: attribute.name,
                expected: attribute.kind,
                found: kind,
            }),
            _ => Ok(attribute),
        }
    }
}

/// A persisted record that specifications can inspect.
pub trait Entity {
    fn schema(&self) -> &'static Schema;

    /// Current value of the named attribute, `None` if the schema has no
    /// such attribute.
    fn attribute(&self, name: &str) -> Option<Value>;
}

//! The `Specification` value type and its combinators.

use serde::{Deserialize, Serialize};

use crate::context::JoinContext;
use crate::error::SpecError;
use crate::schema::{Entity, Schema};
use crate::value::Value;

/// A composable filter over entities.
///
/// Specifications are plain data: building or combining them never touches
/// the entities they will later be evaluated against, and combining two
/// specifications produces a new value without changing either operand.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Specification {
    /// Matches every entity.
    #[default]
    Always,
    /// Matches no entity.
    Never,
    /// The entity's attribute equals `value`.
    Equals { attribute: String, value: Value },
    /// The entity related through `relation` exists and its attribute
    /// equals `value`.
    JoinEquals {
        relation: String,
        attribute: String,
        value: Value,
    },
    And {
        left: Box<Specification>,
        right: Box<Specification>,
    },
    Or {
        left: Box<Specification>,
        right: Box<Specification>,
    },
    Not { spec: Box<Specification> },
}

impl Specification {
    /// Match entities whose `attribute` equals `value`.
    ///
    /// An empty value (`None`, null or `""`) yields [`Specification::Always`]
    /// so optional filters can be passed straight through. The attribute name
    /// is then dropped, so it is never checked against a schema.
    pub fn attribute_equals(attribute: impl Into<String>, value: impl Into<Value>) -> Self {
        let value = value.into();
        if value.is_empty() {
            return Specification::Always;
        }
        Specification::Equals {
            attribute: attribute.into(),
            value,
        }
    }

    /// Match entities whose related entity has `attribute` equal to `value`.
    ///
    /// Entities without a related entity never match (inner join). An empty
    /// value yields [`Specification::Always`]; the relation and attribute
    /// names are dropped along with it and never validated.
    pub fn joined_attribute_equals(
        relation: impl Into<String>,
        attribute: impl Into<String>,
        value: impl Into<Value>,
    ) -> Self {
        let value = value.into();
        if value.is_empty() {
            return Specification::Always;
        }
        Specification::JoinEquals {
            relation: relation.into(),
            attribute: attribute.into(),
            value,
        }
    }

    /// Combine with another specification using AND logic.
    pub fn and(self, other: Specification) -> Self {
        Specification::And {
            left: Box::new(self),
            right: Box::new(other),
        }
    }

    /// Combine with another specification using OR logic.
    pub fn or(self, other: Specification) -> Self {
        Specification::Or {
            left: Box::new(self),
            right: Box::new(other),
        }
    }

    /// Negate this specification.
    pub fn negate(self) -> Self {
        Specification::Not {
            spec: Box::new(self),
        }
    }

    /// All specifications must be satisfied. Empty input matches everything.
    pub fn all<I>(specs: I) -> Self
    where
        I: IntoIterator<Item = Specification>,
    {
        specs
            .into_iter()
            .reduce(Specification::and)
            .unwrap_or(Specification::Always)
    }

    /// Any specification must be satisfied. Empty input matches nothing.
    pub fn any<I>(specs: I) -> Self
    where
        I: IntoIterator<Item = Specification>,
    {
        specs
            .into_iter()
            .reduce(Specification::or)
            .unwrap_or(Specification::Never)
    }

    /// Check every attribute and relation name against `schema`.
    pub fn validate(&self, schema: &Schema) -> Result<(), SpecError> {
        match self {
            Specification::Always | Specification::Never => Ok(()),
            Specification::Equals { attribute, value } => {
                schema.check_value(attribute, value).map(|_| ())
            }
            Specification::JoinEquals {
                relation,
                attribute,
                value,
            } => {
                let relation = schema.require_relation(relation)?;
                relation.target.check_value(attribute, value).map(|_| ())
            }
            Specification::And { left, right } | Specification::Or { left, right } => {
                left.validate(schema)?;
                right.validate(schema)
            }
            Specification::Not { spec } => spec.validate(schema),
        }
    }

    /// Validate against the entity's schema, then evaluate.
    pub fn is_satisfied_by<E, C>(&self, entity: &E, ctx: &C) -> Result<bool, SpecError>
    where
        E: Entity + ?Sized,
        C: JoinContext + ?Sized,
    {
        self.validate(entity.schema())?;
        Ok(self.matches(entity, ctx))
    }

    /// Keep the items satisfying this specification.
    ///
    /// The specification is validated once against `schema` up front, so an
    /// unknown attribute fails even when `items` is empty.
    pub fn filter<'a, E, C, I>(
        &self,
        schema: &Schema,
        items: I,
        ctx: &C,
    ) -> Result<Vec<&'a E>, SpecError>
    where
        E: Entity + 'a,
        C: JoinContext + ?Sized,
        I: IntoIterator<Item = &'a E>,
    {
        self.validate(schema)?;
        Ok(items
            .into_iter()
            .filter(|item| self.matches(*item, ctx))
            .collect())
    }

    /// Evaluate without validation. Unknown names simply fail to match.
    pub(crate) fn matches<E, C>(&self, entity: &E, ctx: &C) -> bool
    where
        E: Entity + ?Sized,
        C: JoinContext + ?Sized,
    {
        match self {
            Specification::Always => true,
            Specification::Never => false,
            Specification::Equals { attribute, value } => {
                entity.attribute(attribute).as_ref() == Some(value)
            }
            Specification::JoinEquals {
                relation,
                attribute,
                value,
            } => {
                let Some(relation) = entity.schema().relation(relation) else {
                    return false;
                };
                let key = match entity.attribute(relation.foreign_key) {
                    Some(Value::Null) | None => return false,
                    Some(key) => key,
                };
                ctx.resolve(relation, &key)
                    .and_then(|related| related.attribute(attribute))
                    .is_some_and(|found| &found == value)
            }
            Specification::And { left, right } => {
                left.matches(entity, ctx) && right.matches(entity, ctx)
            }
            Specification::Or { left, right } => {
                left.matches(entity, ctx) || right.matches(entity, ctx)
            }
            Specification::Not { spec } => !spec.matches(entity, ctx),
        }
    }
}

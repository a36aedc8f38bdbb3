//! Translation of specifications into backend-neutral filter clauses.
//!
//! Query backends call [`Specification::compile`] and render the returned
//! [`Clause`] in their own dialect. Names in a clause come from the static
//! schema, never from the specification itself, so a renderer may splice
//! them into query text directly and bind only the values.

use crate::error::SpecError;
use crate::schema::Schema;
use crate::specification::Specification;
use crate::value::Value;

/// How to reach a related table from the root entity's table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Join {
    pub relation: &'static str,
    pub table: &'static str,
    /// Column on the root table holding the related key.
    pub foreign_key: &'static str,
    /// Key column on the related table.
    pub target_key: &'static str,
}

/// A compiled filter.
///
/// Nested conjunctions and disjunctions are flattened and the `Always` /
/// `Never` units are folded away, so `All` and `Any` hold at least two
/// clauses.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Clause {
    Always,
    Never,
    Equals {
        column: &'static str,
        value: Value,
        nullable: bool,
    },
    /// A related row reached through `join` exists and its `column`
    /// equals `value`.
    JoinEquals {
        join: Join,
        column: &'static str,
        value: Value,
    },
    All(Vec<Clause>),
    Any(Vec<Clause>),
    Not(Box<Clause>),
}

impl Clause {
    pub fn is_always(&self) -> bool {
        matches!(self, Clause::Always)
    }

    fn all(parts: Vec<Clause>) -> Clause {
        let mut flat = Vec::with_capacity(parts.len());
        for part in parts {
            match part {
                Clause::Always => {}
                Clause::Never => return Clause::Never,
                Clause::All(inner) => flat.extend(inner),
                other => flat.push(other),
            }
        }
        match flat.len() {
            0 => Clause::Always,
            1 => flat.remove(0),
            _ => Clause::All(flat),
        }
    }

    fn any(parts: Vec<Clause>) -> Clause {
        let mut flat = Vec::with_capacity(parts.len());
        for part in parts {
            match part {
                Clause::Never => {}
                Clause::Always => return Clause::Always,
                Clause::Any(inner) => flat.extend(inner),
                other => flat.push(other),
            }
        }
        match flat.len() {
            0 => Clause::Never,
            1 => flat.remove(0),
            _ => Clause::Any(flat),
        }
    }

    fn negate(inner: Clause) -> Clause {
        match inner {
            Clause::Always => Clause::Never,
            Clause::Never => Clause::Always,
            Clause::Not(inner) => *inner,
            other => Clause::Not(Box::new(other)),
        }
    }
}

impl Specification {
    /// Compile against `schema`, resolving every name to its column.
    pub fn compile(&self, schema: &Schema) -> Result<Clause, SpecError> {
        let clause = match self {
            Specification::Always => Clause::Always,
            Specification::Never => Clause::Never,
            Specification::Equals { attribute, value } => {
                let attribute = schema.check_value(attribute, value)?;
                Clause::Equals {
                    column: attribute.name,
                    value: value.clone(),
                    nullable: attribute.nullable,
                }
            }
            Specification::JoinEquals {
                relation,
                attribute,
                value,
            } => {
                let relation = schema.require_relation(relation)?;
                let target = relation.target;
                let attribute = target.check_value(attribute, value)?;
                Clause::JoinEquals {
                    join: Join {
                        relation: relation.name,
                        table: target.table,
                        foreign_key: relation.foreign_key,
                        target_key: target.key,
                    },
                    column: attribute.name,
                    value: value.clone(),
                }
            }
            Specification::And { left, right } => {
                Clause::all(vec![left.compile(schema)?, right.compile(schema)?])
            }
            Specification::Or { left, right } => {
                Clause::any(vec![left.compile(schema)?, right.compile(schema)?])
            }
            Specification::Not { spec } => Clause::negate(spec.compile(schema)?),
        };
        Ok(clause)
    }
}

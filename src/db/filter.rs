//! Rendering compiled specifications into PostgreSQL
//!
//! Column and table names come from the static entity schemas and are
//! spliced into the query text; values are always bound as parameters.
//!
//! A joined-attribute clause renders as an `EXISTS` semi-join and equality
//! on a nullable column as `IS NOT DISTINCT FROM`. Both keep SQL two-valued,
//! so `NOT` and `OR` select the same rows the in-memory evaluator does.

use roster_spec::{Clause, Schema, Value};
use sqlx::{Postgres, QueryBuilder};

use crate::error::AppResult;
use crate::models::{Direction, Sort};

/// Append `clause` as a boolean SQL expression over the table aliased `alias`
pub fn push_clause(qb: &mut QueryBuilder<'_, Postgres>, clause: &Clause, alias: &str) {
    match clause {
        Clause::Always => {
            qb.push("TRUE");
        }
        Clause::Never => {
            qb.push("FALSE");
        }
        Clause::Equals {
            column,
            value,
            nullable,
        } => push_comparison(qb, alias, column, value, *nullable),
        Clause::JoinEquals {
            join,
            column,
            value,
        } => {
            let related = format!("{}_{}", alias, join.relation);
            qb.push(format!(
                "EXISTS (SELECT 1 FROM {table} {related} WHERE {related}.{key} = {alias}.{fk} AND ",
                table = join.table,
                key = join.target_key,
                fk = join.foreign_key,
            ));
            push_comparison(qb, &related, column, value, false);
            qb.push(")");
        }
        Clause::All(parts) => push_joined(qb, parts, " AND ", alias),
        Clause::Any(parts) => push_joined(qb, parts, " OR ", alias),
        Clause::Not(inner) => {
            qb.push("NOT (");
            push_clause(qb, inner, alias);
            qb.push(")");
        }
    }
}

fn push_joined(qb: &mut QueryBuilder<'_, Postgres>, parts: &[Clause], separator: &str, alias: &str) {
    qb.push("(");
    for (i, part) in parts.iter().enumerate() {
        if i > 0 {
            qb.push(separator);
        }
        push_clause(qb, part, alias);
    }
    qb.push(")");
}

fn push_comparison(
    qb: &mut QueryBuilder<'_, Postgres>,
    alias: &str,
    column: &str,
    value: &Value,
    nullable: bool,
) {
    qb.push(format!("{}.{}", alias, column));
    match value {
        Value::Null => {
            qb.push(" IS NULL");
        }
        _ if nullable => {
            qb.push(" IS NOT DISTINCT FROM ");
            push_value(qb, value);
        }
        _ => {
            qb.push(" = ");
            push_value(qb, value);
        }
    }
}

fn push_value(qb: &mut QueryBuilder<'_, Postgres>, value: &Value) {
    match value {
        Value::Null => {
            qb.push("NULL");
        }
        Value::Bool(b) => {
            qb.push_bind(*b);
        }
        Value::Int(i) => {
            qb.push_bind(*i);
        }
        Value::Text(s) => {
            qb.push_bind(s.clone());
        }
        Value::Uuid(id) => {
            qb.push_bind(*id);
        }
    }
}

/// Append an `ORDER BY` clause, falling back to creation order
///
/// Every property must exist on `schema`. Nulls sort first ascending and
/// last descending, the same as in memory; the primary key is always the
/// final tie-breaker.
pub fn push_order_by(
    qb: &mut QueryBuilder<'_, Postgres>,
    sort: &Sort,
    schema: &Schema,
    alias: &str,
) -> AppResult<()> {
    sort.validate(schema)?;

    let mut terms = Vec::with_capacity(sort.orders.len() + 2);
    for order in &sort.orders {
        if let Some(attribute) = schema.attribute(&order.property) {
            let nulls = match order.direction {
                Direction::Asc => "NULLS FIRST",
                Direction::Desc => "NULLS LAST",
            };
            terms.push(format!(
                "{}.{} {} {}",
                alias,
                attribute.name,
                order.direction.as_sql(),
                nulls
            ));
        }
    }
    if terms.is_empty() {
        terms.push(format!("{}.created_date {}", alias, Direction::Asc.as_sql()));
    }
    terms.push(format!("{}.{} {}", alias, schema.key, Direction::Asc.as_sql()));

    qb.push(" ORDER BY ");
    qb.push(terms.join(", "));
    Ok(())
}

/// Append `OFFSET`/`LIMIT` for a page
pub fn push_page(qb: &mut QueryBuilder<'_, Postgres>, offset: u64, limit: u64) {
    qb.push(" OFFSET ");
    qb.push_bind(i64::try_from(offset).unwrap_or(i64::MAX));
    qb.push(" LIMIT ");
    qb.push_bind(i64::try_from(limit).unwrap_or(i64::MAX));
}

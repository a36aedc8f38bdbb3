//! Join contexts supply related entities during evaluation.

use crate::schema::{Entity, Relation};
use crate::value::Value;

/// Resolves the entity on the far side of a relation.
///
/// Evaluating a joined-attribute specification asks the context for the
/// entity whose key equals the owner's foreign-key value. Returning `None`
/// makes the predicate false, as an inner join would drop the row.
pub trait JoinContext {
    fn resolve(&self, relation: &Relation, key: &Value) -> Option<&dyn Entity>;
}

/// The empty context: no relation can be resolved.
impl JoinContext for () {
    fn resolve(&self, _relation: &Relation, _key: &Value) -> Option<&dyn Entity> {
        None
    }
}

impl<C: JoinContext + ?Sized> JoinContext for &C {
    fn resolve(&self, relation: &Relation, key: &Value) -> Option<&dyn Entity> {
        (**self).resolve(relation, key)
    }
}

/// A context backed by a slice of entities of the relation's target type.
///
/// Entities are matched on the target schema's key attribute.
#[derive(Debug, Clone, Copy)]
pub struct SliceContext<'a, E> {
    items: &'a [E],
}

impl<'a, E> SliceContext<'a, E> {
    pub fn new(items: &'a [E]) -> Self {
        Self { items }
    }
}

impl<'a, E: Entity> SliceContext<'a, E> {
    /// The item on the far side of `relation` whose key equals `key`.
    pub fn find(&self, relation: &Relation, key: &Value) -> Option<&'a E> {
        let target = relation.target;
        self.items
            .iter()
            .filter(|item| std::ptr::eq(item.schema(), target))
            .find(|item| item.attribute(target.key).as_ref() == Some(key))
    }
}

impl<E: Entity> JoinContext for SliceContext<'_, E> {
    fn resolve(&self, relation: &Relation, key: &Value) -> Option<&dyn Entity> {
        self.find(relation, key).map(|item| item as &dyn Entity)
    }
}

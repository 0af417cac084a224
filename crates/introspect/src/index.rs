use crate::ModelIntrospector;
use crudgen_core::{Entity, Relationship};

/// All relationships touching an entity: direct ones first, then polymorphic
/// ones, each in the order the model declares them.
pub struct RelationshipIndex<'m, M: ModelIntrospector + ?Sized> {
    model: &'m M,
}

impl<'m, M: ModelIntrospector + ?Sized> RelationshipIndex<'m, M> {
    pub fn new(model: &'m M) -> Self {
        Self { model }
    }

    pub fn relationships_of(&self, entity: &'m Entity) -> Vec<&'m Relationship> {
        self.model
            .relationships(entity)
            .iter()
            .chain(self.model.morph_relationships(entity).iter())
            .collect()
    }
}

impl<M: ModelIntrospector + ?Sized> Clone for RelationshipIndex<'_, M> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<M: ModelIntrospector + ?Sized> Copy for RelationshipIndex<'_, M> {}

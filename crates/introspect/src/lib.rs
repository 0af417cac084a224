//! Read access to the project model the generator works from.
//!
//! The host application owns the model; crudgen only asks it for entities,
//! their relationships and the resource definitions it already knows about.

pub mod index;
pub mod project;

pub use index::RelationshipIndex;
pub use project::ProjectModel;

use crudgen_core::{Entity, EntityId, Relationship, ResourceId};
use serde::{Deserialize, Serialize};

/// A resource definition for an entity, either known to the host or
/// synthesized because the host has none.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceDefinition {
    pub id: ResourceId,
    pub entity: EntityId,
    #[serde(default)]
    pub synthesized: bool,
}

impl ResourceDefinition {
    pub fn existing(id: ResourceId, entity: EntityId) -> Self {
        Self {
            id,
            entity,
            synthesized: false,
        }
    }

    /// Minimal definition derived from the entity alone
    pub fn placeholder(entity: &Entity) -> Self {
        Self {
            id: ResourceId::new(format!("{}:placeholder", entity.id)),
            entity: entity.id.clone(),
            synthesized: true,
        }
    }
}

/// Model introspection service provided by the host
pub trait ModelIntrospector {
    fn entity(&self, id: &EntityId) -> Option<&Entity>;

    fn entities(&self) -> &[Entity];

    fn relationships<'a>(&'a self, entity: &'a Entity) -> &'a [Relationship] {
        &entity.relationships
    }

    fn morph_relationships<'a>(&'a self, entity: &'a Entity) -> &'a [Relationship] {
        &entity.morph_relationships
    }

    /// Field used to display a record of `entity` from another resource
    fn label_field<'a>(&'a self, entity: &'a Entity) -> &'a str {
        entity.label_field.as_deref().unwrap_or("id")
    }

    /// Resource definition the host already has for `entity`
    fn resource_definition(&self, entity: &Entity) -> Option<ResourceDefinition> {
        entity
            .resource
            .clone()
            .map(|id| ResourceDefinition::existing(id, entity.id.clone()))
    }

    fn synthesize_placeholder(&self, entity: &Entity) -> ResourceDefinition {
        ResourceDefinition::placeholder(entity)
    }

    /// Existing definition, or a synthesized placeholder when there is none
    fn resource_or_placeholder(&self, entity: &Entity) -> ResourceDefinition {
        self.resource_definition(entity)
            .unwrap_or_else(|| self.synthesize_placeholder(entity))
    }
}

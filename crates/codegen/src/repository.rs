use crate::normalizer;
use crate::resource::ResourceConfig;
use crudgen_core::{Entity, EntityId, InputSelection, RelationshipSelections};
use crudgen_introspect::ResourceDefinition;
use indexmap::map::Entry;
use indexmap::IndexMap;

/// Insertion-ordered resource configs of one run, at most one per entity
#[derive(Debug, Clone, Default)]
pub struct Repository<'m> {
    configs: IndexMap<EntityId, ResourceConfig<'m>>,
}

impl<'m> Repository<'m> {
    pub fn new() -> Self {
        Self {
            configs: IndexMap::new(),
        }
    }

    /// Normalize a selection into the repository.
    ///
    /// Returns `true` when a config was appended and `false` when the
    /// entity's existing config was refreshed in place.
    pub fn normalize(
        &mut self,
        entity: &'m Entity,
        resource: ResourceDefinition,
        inputs: InputSelection,
        relationships: RelationshipSelections,
        is_master_detail: bool,
    ) -> bool {
        match self.configs.entry(entity.id.clone()) {
            Entry::Occupied(mut slot) => {
                normalizer::refresh(slot.get_mut(), inputs, relationships, is_master_detail);
                false
            }
            Entry::Vacant(slot) => {
                slot.insert(normalizer::normalize(
                    None,
                    entity,
                    resource,
                    inputs,
                    relationships,
                    is_master_detail,
                ));
                true
            }
        }
    }

    pub fn contains(&self, id: &EntityId) -> bool {
        self.configs.contains_key(id)
    }

    pub fn get(&self, id: &EntityId) -> Option<&ResourceConfig<'m>> {
        self.configs.get(id)
    }

    pub fn len(&self) -> usize {
        self.configs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.configs.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &ResourceConfig<'m>> {
        self.configs.values()
    }

    pub fn entity_ids(&self) -> impl Iterator<Item = &EntityId> {
        self.configs.keys()
    }
}

impl<'a, 'm> IntoIterator for &'a Repository<'m> {
    type Item = &'a ResourceConfig<'m>;
    type IntoIter = indexmap::map::Values<'a, EntityId, ResourceConfig<'m>>;

    fn into_iter(self) -> Self::IntoIter {
        self.configs.values()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resource::Origin;

    #[test]
    fn test_one_config_per_entity() {
        let post = Entity::new("post", "Post", "Posts");
        let user = Entity::new("user", "User", "Users");
        let mut repository = Repository::new();

        assert!(repository.normalize(
            &post,
            ResourceDefinition::placeholder(&post),
            InputSelection::All(true),
            RelationshipSelections::new(),
            false,
        ));
        assert!(repository.normalize(
            &user,
            ResourceDefinition::placeholder(&user),
            InputSelection::All(true),
            RelationshipSelections::new(),
            true,
        ));
        assert!(!repository.normalize(
            &post,
            ResourceDefinition::placeholder(&post),
            InputSelection::All(false),
            RelationshipSelections::new(),
            true,
        ));

        assert_eq!(repository.len(), 2);
        let ids: Vec<_> = repository.entity_ids().map(EntityId::as_str).collect();
        assert_eq!(ids, vec!["post", "user"]);

        let post_config = repository.get(&EntityId::from("post")).unwrap();
        assert_eq!(post_config.origin, Origin::Both);
        assert_eq!(post_config.selected_inputs, InputSelection::All(false));
    }
}

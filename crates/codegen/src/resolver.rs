//! Resolution of the resources a run has to generate.
//!
//! Starting from the user's selection, relationships are followed breadth
//! first. A related entity that is not in the repository yet is added as a
//! master-detail resource so that relation managers always have a resource to
//! point at. The repository holds at most one config per entity, which is also
//! what makes the walk terminate on cyclic models.

use crate::repository::Repository;
use crudgen_core::{CrudSelection, EntityId, InputSelection, Relationship, RelationshipSelections};
use crudgen_introspect::{ModelIntrospector, RelationshipIndex};
use std::collections::VecDeque;

/// Pending relationship expansion of a config already in the repository
#[derive(Debug)]
struct Expansion {
    entity: EntityId,
    /// Only follow relationships the config marks as selected
    gated: bool,
}

pub struct Resolver<'m, M: ModelIntrospector + ?Sized> {
    model: &'m M,
    index: RelationshipIndex<'m, M>,
}

impl<'m, M: ModelIntrospector + ?Sized> Resolver<'m, M> {
    pub fn new(model: &'m M) -> Self {
        Self {
            model,
            index: RelationshipIndex::new(model),
        }
    }

    pub fn resolve<'s, I>(&self, selections: I) -> Repository<'m>
    where
        I: IntoIterator<Item = &'s CrudSelection>,
    {
        let mut repository = Repository::new();
        let mut queue = VecDeque::new();

        for selection in selections {
            let Some(entity) = self.model.entity(&selection.id) else {
                tracing::warn!(entity = %selection.id, "selected entity is not part of the model, skipping");
                continue;
            };

            let appended = repository.normalize(
                entity,
                self.model.resource_or_placeholder(entity),
                selection.inputs.clone(),
                selection.relationships.clone(),
                false,
            );
            if appended {
                queue.push_back(Expansion {
                    entity: entity.id.clone(),
                    gated: true,
                });
            }
        }

        while let Some(expansion) = queue.pop_front() {
            for relationship in self.relationships_to_follow(&repository, &expansion) {
                if repository.contains(&relationship.target) {
                    continue;
                }

                let Some(target) = self.model.entity(&relationship.target) else {
                    tracing::warn!(
                        relationship = %relationship.id,
                        target = %relationship.target,
                        "relationship target is not part of the model, skipping"
                    );
                    continue;
                };

                tracing::debug!(
                    from = %expansion.entity,
                    relationship = %relationship.name,
                    target = %target.id,
                    "including related entity as master-detail"
                );

                repository.normalize(
                    target,
                    self.model.resource_or_placeholder(target),
                    InputSelection::All(true),
                    RelationshipSelections::new(),
                    true,
                );
                queue.push_back(Expansion {
                    entity: target.id.clone(),
                    gated: false,
                });
            }
        }

        tracing::info!(
            resources = repository.len(),
            master_detail = repository.iter().filter(|config| config.is_master_detail()).count(),
            "resolved resources for generation"
        );

        repository
    }

    fn relationships_to_follow(
        &self,
        repository: &Repository<'m>,
        expansion: &Expansion,
    ) -> Vec<&'m Relationship> {
        let Some(config) = repository.get(&expansion.entity) else {
            return Vec::new();
        };

        self.index
            .relationships_of(config.entity)
            .into_iter()
            .filter(|relationship| !expansion.gated || config.relationship_selected(&relationship.id))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resource::Origin;
    use crudgen_core::{Entity, Relationship, RelationshipKind};
    use crudgen_introspect::ProjectModel;

    fn ids(repository: &Repository<'_>) -> Vec<String> {
        repository.entity_ids().map(|id| id.to_string()).collect()
    }

    fn blog() -> ProjectModel {
        ProjectModel::new(vec![
            Entity::new("post", "Post", "Posts")
                .with_resource("post-crud")
                .with_relationship(Relationship::new("post-comments", "comments", RelationshipKind::HasMany, "comment"))
                .with_relationship(Relationship::new("post-tags", "tags", RelationshipKind::BelongsToMany, "tag")),
            Entity::new("comment", "Comment", "Comments")
                .with_relationship(Relationship::new("comment-author", "author", RelationshipKind::BelongsTo, "user")),
            Entity::new("user", "User", "Users").with_resource("user-crud"),
            Entity::new("tag", "Tag", "Tags"),
        ])
    }

    #[test]
    fn test_master_detail_cascades_unconditionally() {
        let model = blog();
        let selection = CrudSelection::new("post")
            .with_relationship("post-comments", true)
            .with_relationship("post-tags", false);

        let repository = Resolver::new(&model).resolve([&selection]);

        assert_eq!(ids(&repository), vec!["post", "comment", "user"]);
        assert_eq!(repository.get(&"post".into()).unwrap().origin, Origin::UserSelected);
        assert_eq!(repository.get(&"comment".into()).unwrap().origin, Origin::MasterDetail);
        assert_eq!(repository.get(&"user".into()).unwrap().origin, Origin::MasterDetail);
    }

    #[test]
    fn test_unselected_relationship_is_not_followed() {
        let model = blog();
        let selection = CrudSelection::new("post").with_relationship("post-comments", false);

        let repository = Resolver::new(&model).resolve([&selection]);

        assert_eq!(ids(&repository), vec!["post"]);
    }

    #[test]
    fn test_missing_selection_target_is_skipped() {
        let model = blog();
        let selections = [CrudSelection::new("ghost"), CrudSelection::new("tag")];

        let repository = Resolver::new(&model).resolve(&selections);

        assert_eq!(ids(&repository), vec!["tag"]);
    }

    #[test]
    fn test_placeholder_for_entity_without_resource() {
        let model = blog();
        let selection = CrudSelection::new("post").with_relationship("post-comments", true);

        let repository = Resolver::new(&model).resolve([&selection]);

        assert!(repository.get(&"comment".into()).unwrap().resource.synthesized);
        assert!(!repository.get(&"user".into()).unwrap().resource.synthesized);
    }

    #[test]
    fn test_self_reference_and_cycles() {
        let model = ProjectModel::new(vec![
            Entity::new("category", "Category", "Categories")
                .with_relationship(Relationship::new("children", "children", RelationshipKind::HasMany, "category"))
                .with_relationship(Relationship::new("products", "products", RelationshipKind::HasMany, "product")),
            Entity::new("product", "Product", "Products")
                .with_relationship(Relationship::new("category", "category", RelationshipKind::BelongsTo, "category")),
        ]);
        let selection = CrudSelection::new("category")
            .with_relationship("children", true)
            .with_relationship("products", true);

        let repository = Resolver::new(&model).resolve([&selection]);

        assert_eq!(ids(&repository), vec!["category", "product"]);
    }

    #[test]
    fn test_dangling_relationship_target() {
        let model = ProjectModel::new(vec![Entity::new("post", "Post", "Posts")
            .with_relationship(Relationship::new("r1", "images", RelationshipKind::MorphMany, "image"))]);
        let selection = CrudSelection::new("post").with_relationship("r1", true);

        let repository = Resolver::new(&model).resolve([&selection]);

        assert_eq!(ids(&repository), vec!["post"]);
    }

    #[test]
    fn test_selected_entity_reached_through_relationship_keeps_user_selection() {
        let model = blog();
        let selections = [
            CrudSelection::new("post").with_relationship("post-comments", true),
            CrudSelection::new("user"),
        ];

        let repository = Resolver::new(&model).resolve(&selections);

        assert_eq!(ids(&repository), vec!["post", "user", "comment"]);
        assert_eq!(repository.get(&"user".into()).unwrap().origin, Origin::UserSelected);
    }

    #[test]
    fn test_no_selection_yields_empty_repository() {
        let model = blog();
        let repository = Resolver::new(&model).resolve(std::iter::empty());

        assert!(repository.is_empty());
    }
}

//! Per-resource view metadata handed to the external renderer.

use crate::classify::{self, FormWidget, TableColumn};
use crate::naming::to_camel_case;
use crate::repository::Repository;
use crate::resource::{Origin, ResourceConfig};
use crudgen_core::{Entity, EntityId, Input, InputId, Relationship, RelationshipId, RelationshipKind, ResourceId};
use crudgen_introspect::{ModelIntrospector, RelationshipIndex};
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InputOptions {
    pub id: InputId,
    pub name: String,
    pub kind: String,
    pub widget: FormWidget,
    pub column: TableColumn,
    pub searchable: bool,
    pub searchable_individually: bool,
    /// `relation.labelField` for relationship-bound inputs
    pub relationship_input_name: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RelationshipOptions {
    pub id: RelationshipId,
    pub name: String,
    pub kind: RelationshipKind,
    pub target: EntityId,
    pub target_name: String,
    pub target_plural: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RenderOptions {
    pub resource: ResourceId,
    pub entity: EntityId,
    pub name: String,
    pub plural: String,
    pub origin: Origin,
    pub synthesized: bool,
    pub has_timestamps: bool,
    pub form_inputs: Vec<InputOptions>,
    pub table_inputs: Vec<InputOptions>,
    pub has_text_like_inputs: bool,
    pub relationships: Vec<RelationshipOptions>,
    pub relation_managers: Vec<RelationshipOptions>,
}

/// Options for the relation manager a parent resource embeds for one relationship
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RelationManagerOptions {
    pub relationship: RelationshipOptions,
    pub inverse_entity: EntityId,
    pub inverse_name: String,
    pub resource: ResourceId,
    pub table_inputs: Vec<InputOptions>,
    pub has_text_like_inputs: bool,
    /// Target inputs without the one holding this relationship's foreign key
    pub relationship_inputs: Vec<InputOptions>,
}

pub struct ResourceOptionBuilder<'r, 'm, M: ModelIntrospector + ?Sized> {
    model: &'m M,
    index: RelationshipIndex<'m, M>,
    repository: &'r Repository<'m>,
}

impl<'r, 'm, M: ModelIntrospector + ?Sized> ResourceOptionBuilder<'r, 'm, M> {
    pub fn new(model: &'m M, repository: &'r Repository<'m>) -> Self {
        Self {
            model,
            index: RelationshipIndex::new(model),
            repository,
        }
    }

    pub fn build(&self, config: &ResourceConfig<'m>) -> RenderOptions {
        let entity = config.entity;
        let relationships = self.index.relationships_of(entity);

        RenderOptions {
            resource: config.resource.id.clone(),
            entity: entity.id.clone(),
            name: entity.name.clone(),
            plural: entity.plural.clone(),
            origin: config.origin,
            synthesized: config.resource.synthesized,
            has_timestamps: entity.timestamps,
            form_inputs: config
                .form_inputs()
                .map(|input| self.input_options(entity, input))
                .collect(),
            table_inputs: self.table_inputs(entity),
            has_text_like_inputs: entity.has_text_like_inputs(),
            relationships: relationships
                .iter()
                .map(|relationship| self.relationship_options(relationship))
                .collect(),
            relation_managers: self
                .relation_managers(config)
                .into_iter()
                .map(|relationship| self.relationship_options(relationship))
                .collect(),
        }
    }

    pub fn build_all(&self) -> Vec<RenderOptions> {
        self.repository.iter().map(|config| self.build(config)).collect()
    }

    /// Relationships of `config` that get a relation manager.
    ///
    /// Master-detail resources manage every eligible relationship; other
    /// resources only the selected ones whose target is being generated too.
    pub fn relation_managers(&self, config: &ResourceConfig<'m>) -> Vec<&'m Relationship> {
        self.index
            .relationships_of(config.entity)
            .into_iter()
            .filter(|relationship| relationship.kind.supports_relation_manager())
            .filter(|relationship| {
                config.is_master_detail()
                    || (config.relationship_selected(&relationship.id)
                        && self.repository.contains(&relationship.target))
            })
            .collect()
    }

    /// `None` when the relationship target has no config in the repository
    pub fn relation_manager_options(
        &self,
        parent: &ResourceConfig<'m>,
        relationship: &Relationship,
    ) -> Option<RelationManagerOptions> {
        let target = self.repository.get(&relationship.target)?;
        let entity = target.entity;

        let relationship_inputs = entity
            .inputs
            .iter()
            .filter(|input| match &relationship.foreign_key {
                Some(foreign_key) => input.field.as_ref().is_some_and(|field| field != foreign_key),
                None => true,
            })
            .map(|input| self.input_options(entity, input))
            .collect();

        Some(RelationManagerOptions {
            relationship: self.relationship_options(relationship),
            inverse_entity: parent.entity.id.clone(),
            inverse_name: parent.entity.name.clone(),
            resource: target.resource.id.clone(),
            table_inputs: self.table_inputs(entity),
            has_text_like_inputs: entity.has_text_like_inputs(),
            relationship_inputs,
        })
    }

    fn table_inputs(&self, entity: &Entity) -> Vec<InputOptions> {
        entity
            .inputs
            .iter()
            .filter(|input| classify::is_table_input(input))
            .map(|input| self.input_options(entity, input))
            .collect()
    }

    fn input_options(&self, entity: &Entity, input: &Input) -> InputOptions {
        InputOptions {
            id: input.id.clone(),
            name: input.name.clone(),
            kind: input.kind.to_string(),
            widget: classify::form_widget(input),
            column: classify::table_column(input),
            searchable: classify::is_searchable(input),
            searchable_individually: classify::is_searchable_individually(input),
            relationship_input_name: self.relationship_input_name(entity, input),
        }
    }

    fn relationship_input_name(&self, entity: &Entity, input: &Input) -> Option<String> {
        let bound = input.relationship.as_ref()?;
        let relationship = entity.all_relationships().find(|rel| &rel.id == bound)?;
        let label = self
            .model
            .entity(&relationship.target)
            .map(|target| self.model.label_field(target))
            .unwrap_or("id");

        Some(format!("{}.{}", to_camel_case(&relationship.name), label))
    }

    fn relationship_options(&self, relationship: &Relationship) -> RelationshipOptions {
        let target = self.model.entity(&relationship.target);

        RelationshipOptions {
            id: relationship.id.clone(),
            name: relationship.name.clone(),
            kind: relationship.kind,
            target: relationship.target.clone(),
            target_name: target
                .map(|entity| entity.name.clone())
                .unwrap_or_else(|| relationship.target.to_string()),
            target_plural: target
                .map(|entity| entity.plural.clone())
                .unwrap_or_else(|| relationship.target.to_string()),
        }
    }
}

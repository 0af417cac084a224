use super::model::{Entity, EntityId, Input, InputId, RelationshipId};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

/// Which inputs of a resource take part in its forms
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum InputSelection {
    All(bool),
    Only(Vec<InputId>),
}

impl Default for InputSelection {
    fn default() -> Self {
        Self::All(true)
    }
}

impl InputSelection {
    pub fn includes(&self, input: &Input) -> bool {
        match self {
            Self::All(all) => *all,
            Self::Only(ids) => ids.contains(&input.id),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RelationshipSelection {
    #[serde(default)]
    pub selected: bool,
}

impl RelationshipSelection {
    pub fn selected() -> Self {
        Self { selected: true }
    }

    pub fn unselected() -> Self {
        Self { selected: false }
    }
}

pub type RelationshipSelections = BTreeMap<RelationshipId, RelationshipSelection>;

/// Persisted choice for one entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CrudSelection {
    pub id: EntityId,
    #[serde(default)]
    pub selected: bool,
    #[serde(default)]
    pub inputs: InputSelection,
    #[serde(default)]
    pub relationships: RelationshipSelections,
}

impl CrudSelection {
    pub fn new(id: impl Into<EntityId>) -> Self {
        Self {
            id: id.into(),
            selected: true,
            inputs: InputSelection::default(),
            relationships: RelationshipSelections::new(),
        }
    }

    pub fn with_relationship(mut self, id: impl Into<RelationshipId>, selected: bool) -> Self {
        self.relationships
            .insert(id.into(), RelationshipSelection { selected });
        self
    }

    pub fn with_inputs(mut self, inputs: InputSelection) -> Self {
        self.inputs = inputs;
        self
    }

    pub fn unselected(mut self) -> Self {
        self.selected = false;
        self
    }
}

/// Per-project selection data, read once at generation start
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SelectionStore {
    #[serde(default)]
    pub all_selected: bool,
    #[serde(default)]
    pub cruds: Vec<CrudSelection>,
}

impl SelectionStore {
    pub fn new(cruds: Vec<CrudSelection>) -> Self {
        Self {
            all_selected: false,
            cruds,
        }
    }

    /// Default store: every entity with a resource, all inputs and relationships on
    pub fn select_all<'a>(entities: impl IntoIterator<Item = &'a Entity>) -> Self {
        let cruds = entities
            .into_iter()
            .filter(|entity| entity.resource.is_some())
            .map(|entity| CrudSelection {
                id: entity.id.clone(),
                selected: true,
                inputs: InputSelection::All(true),
                relationships: entity
                    .all_relationships()
                    .map(|rel| (rel.id.clone(), RelationshipSelection::selected()))
                    .collect(),
            })
            .collect();

        Self {
            all_selected: true,
            cruds,
        }
    }

    pub fn from_yaml(yaml: &str) -> Result<Self, serde_yaml::Error> {
        serde_yaml::from_str(yaml)
    }

    pub fn to_yaml(&self) -> Result<String, serde_yaml::Error> {
        serde_yaml::to_string(self)
    }

    pub fn load(path: &Path) -> Result<Self, crate::CoreError> {
        let content = std::fs::read_to_string(path)?;
        Ok(Self::from_yaml(&content)?)
    }

    /// Records the user chose for generation
    pub fn selected(&self) -> Vec<&CrudSelection> {
        let selected: Vec<_> = self.cruds.iter().filter(|crud| crud.selected).collect();

        if selected.is_empty() {
            tracing::warn!("There is no selected CRUD for generating admin resources.");
        }

        selected
    }

    pub fn find(&self, id: &EntityId) -> Option<&CrudSelection> {
        self.cruds.iter().find(|crud| &crud.id == id)
    }
}

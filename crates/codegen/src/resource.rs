use crudgen_core::{Entity, Input, InputSelection, RelationshipId, RelationshipSelections};
use crudgen_introspect::ResourceDefinition;
use serde::Serialize;

/// Why a resource is part of the generation run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum Origin {
    /// Explicitly chosen by the user
    UserSelected,
    /// Pulled in because a generated resource relates to it
    MasterDetail,
    Both,
}

impl Origin {
    pub fn from_intent(is_master_detail: bool) -> Self {
        if is_master_detail {
            Self::MasterDetail
        } else {
            Self::UserSelected
        }
    }

    /// Combine two intents; markers are only ever added
    pub fn merge(self, other: Origin) -> Origin {
        if self == other {
            self
        } else {
            Self::Both
        }
    }

    pub fn is_user_selected(self) -> bool {
        matches!(self, Self::UserSelected | Self::Both)
    }

    pub fn is_master_detail(self) -> bool {
        matches!(self, Self::MasterDetail | Self::Both)
    }
}

/// Normalized configuration of one resource to generate
#[derive(Debug, Clone, Serialize)]
pub struct ResourceConfig<'m> {
    pub entity: &'m Entity,
    pub resource: ResourceDefinition,
    pub selected_inputs: InputSelection,
    pub relationship_selections: RelationshipSelections,
    pub origin: Origin,
}

impl<'m> ResourceConfig<'m> {
    pub fn is_master_detail(&self) -> bool {
        self.origin.is_master_detail()
    }

    pub fn is_user_selected(&self) -> bool {
        self.origin.is_user_selected()
    }

    pub fn relationship_selected(&self, id: &RelationshipId) -> bool {
        self.relationship_selections
            .get(id)
            .is_some_and(|selection| selection.selected)
    }

    /// Inputs that take part in the resource forms
    pub fn form_inputs(&self) -> impl Iterator<Item = &'m Input> + '_ {
        self.entity
            .inputs
            .iter()
            .filter(|input| self.selected_inputs.includes(input))
    }
}

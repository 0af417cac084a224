use crate::resource::{Origin, ResourceConfig};
use crudgen_core::{Entity, InputSelection, RelationshipSelections};
use crudgen_introspect::ResourceDefinition;

/// Merge a selection into the config for `entity`, creating the config when
/// there is none yet.
///
/// Input and relationship selections are replaced (last writer wins). The
/// origin only grows: a config that was user-selected stays user-selected
/// when it is later normalized as master-detail, and the other way round.
pub fn normalize<'m>(
    existing: Option<ResourceConfig<'m>>,
    entity: &'m Entity,
    resource: ResourceDefinition,
    inputs: InputSelection,
    relationships: RelationshipSelections,
    is_master_detail: bool,
) -> ResourceConfig<'m> {
    match existing {
        Some(mut config) => {
            refresh(&mut config, inputs, relationships, is_master_detail);
            config
        }
        None => ResourceConfig {
            entity,
            resource,
            selected_inputs: inputs,
            relationship_selections: relationships,
            origin: Origin::from_intent(is_master_detail),
        },
    }
}

/// In-place variant of [`normalize`] for a config that already exists
pub fn refresh(
    config: &mut ResourceConfig<'_>,
    inputs: InputSelection,
    relationships: RelationshipSelections,
    is_master_detail: bool,
) {
    config.selected_inputs = inputs;
    config.relationship_selections = relationships;
    config.origin = config.origin.merge(Origin::from_intent(is_master_detail));
}

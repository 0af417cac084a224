//! Property tests for relationship resolution over random entity graphs,
//! cycles and self references included.

use crudgen_codegen::{Repository, ResourceOptionBuilder, Resolver};
use crudgen_core::{CrudSelection, Entity, EntityId, Relationship, RelationshipKind};
use crudgen_introspect::ProjectModel;
use proptest::prelude::*;
use std::collections::HashSet;

const KINDS: [RelationshipKind; 6] = [
    RelationshipKind::HasMany,
    RelationshipKind::BelongsTo,
    RelationshipKind::BelongsToMany,
    RelationshipKind::MorphMany,
    RelationshipKind::HasOne,
    RelationshipKind::MorphTo,
];

#[derive(Debug, Clone)]
struct Edge {
    from: usize,
    to: usize,
    kind: usize,
    selected: bool,
}

#[derive(Debug, Clone)]
struct Graph {
    entities: usize,
    edges: Vec<Edge>,
    selected: Vec<bool>,
}

impl Graph {
    fn model(&self) -> ProjectModel {
        let mut entities: Vec<Entity> = (0..self.entities)
            .map(|i| Entity::new(format!("e{}", i), format!("E{}", i), format!("E{}s", i)))
            .collect();

        for (position, edge) in self.edges.iter().enumerate() {
            let relationship = Relationship::new(
                format!("r{}", position),
                format!("rel{}", position),
                KINDS[edge.kind],
                format!("e{}", edge.to),
            );
            let owner = entities.remove(edge.from);
            entities.insert(edge.from, owner.with_relationship(relationship));
        }

        ProjectModel::new(entities)
    }

    fn selections(&self) -> Vec<CrudSelection> {
        self.selected
            .iter()
            .enumerate()
            .filter(|(_, selected)| **selected)
            .map(|(i, _)| {
                self.edges
                    .iter()
                    .enumerate()
                    .filter(|(_, edge)| edge.from == i)
                    .fold(CrudSelection::new(format!("e{}", i)), |selection, (position, edge)| {
                        selection.with_relationship(format!("r{}", position), edge.selected)
                    })
            })
            .collect()
    }
}

fn arb_graph() -> impl Strategy<Value = Graph> {
    (1usize..8).prop_flat_map(|entities| {
        let edge = (0..entities, 0..entities, 0..KINDS.len(), any::<bool>())
            .prop_map(|(from, to, kind, selected)| Edge { from, to, kind, selected });
        (
            Just(entities),
            prop::collection::vec(edge, 0..entities * 3),
            prop::collection::vec(any::<bool>(), entities),
        )
            .prop_map(|(entities, edges, selected)| Graph {
                entities,
                edges,
                selected,
            })
    })
}

fn resolve<'m>(model: &'m ProjectModel, selections: &[CrudSelection]) -> Repository<'m> {
    Resolver::new(model).resolve(selections)
}

proptest! {
    #[test]
    fn prop_no_duplicate_entities(graph in arb_graph()) {
        let model = graph.model();
        let selections = graph.selections();
        let repository = resolve(&model, &selections);

        let ids: Vec<&EntityId> = repository.iter().map(|config| &config.entity.id).collect();
        let unique: HashSet<&EntityId> = ids.iter().copied().collect();
        prop_assert_eq!(ids.len(), unique.len());
        prop_assert!(repository.len() <= graph.entities);
    }

    #[test]
    fn prop_selected_entities_are_user_selected(graph in arb_graph()) {
        let model = graph.model();
        let selections = graph.selections();
        let repository = resolve(&model, &selections);

        for selection in &selections {
            let config = repository.get(&selection.id);
            prop_assert!(config.is_some());
            prop_assert!(config.unwrap().is_user_selected());
        }
    }

    #[test]
    fn prop_followed_relationships_are_closed(graph in arb_graph()) {
        let model = graph.model();
        let selections = graph.selections();
        let repository = resolve(&model, &selections);

        for config in &repository {
            for relationship in config.entity.all_relationships() {
                let followed = config.is_master_detail() || config.relationship_selected(&relationship.id);
                if followed {
                    prop_assert!(repository.contains(&relationship.target));
                }
            }
        }
    }

    #[test]
    fn prop_master_detail_entries_have_a_cause(graph in arb_graph()) {
        let model = graph.model();
        let selections = graph.selections();
        let repository = resolve(&model, &selections);

        for config in repository.iter().filter(|config| !config.is_user_selected()) {
            let caused = repository.iter().any(|owner| {
                owner.entity.all_relationships().any(|relationship| {
                    relationship.target == config.entity.id
                        && (owner.is_master_detail() || owner.relationship_selected(&relationship.id))
                })
            });
            prop_assert!(caused, "{} was included without a followed relationship", config.entity.id);
        }
    }

    #[test]
    fn prop_relation_managers_point_into_repository(graph in arb_graph()) {
        let model = graph.model();
        let selections = graph.selections();
        let repository = resolve(&model, &selections);
        let builder = ResourceOptionBuilder::new(&model, &repository);

        for config in &repository {
            for relationship in builder.relation_managers(config) {
                prop_assert!(relationship.kind.supports_relation_manager());
                prop_assert!(repository.contains(&relationship.target));
            }
        }
    }
}

#[test]
fn test_self_loop_terminates() {
    let graph = Graph {
        entities: 1,
        edges: vec![Edge { from: 0, to: 0, kind: 0, selected: true }],
        selected: vec![true],
    };
    let model = graph.model();
    let selections = graph.selections();

    let repository = resolve(&model, &selections);

    assert_eq!(repository.len(), 1);
}

#[test]
fn test_long_cycle_through_master_detail() {
    // e0 -> e1 -> e2 -> e3 -> e0, only the first edge selected
    let graph = Graph {
        entities: 4,
        edges: vec![
            Edge { from: 0, to: 1, kind: 0, selected: true },
            Edge { from: 1, to: 2, kind: 1, selected: false },
            Edge { from: 2, to: 3, kind: 2, selected: false },
            Edge { from: 3, to: 0, kind: 3, selected: false },
        ],
        selected: vec![true, false, false, false],
    };
    let model = graph.model();
    let selections = graph.selections();

    let repository = resolve(&model, &selections);
    let ids: Vec<_> = repository.entity_ids().map(|id| id.to_string()).collect();

    assert_eq!(ids, vec!["e0", "e1", "e2", "e3"]);
}

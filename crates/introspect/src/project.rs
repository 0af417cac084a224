use crate::ModelIntrospector;
use crudgen_core::{CoreError, Entity, EntityId};
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use std::path::Path;

/// In-memory project model, usually loaded from a `model.yaml` export
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(from = "ProjectModelFile", into = "ProjectModelFile")]
pub struct ProjectModel {
    pub name: Option<String>,
    entities: Vec<Entity>,
    by_id: HashMap<EntityId, usize>,
}

#[derive(Serialize, Deserialize)]
struct ProjectModelFile {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    name: Option<String>,
    #[serde(default)]
    entities: Vec<Entity>,
}

impl From<ProjectModelFile> for ProjectModel {
    fn from(file: ProjectModelFile) -> Self {
        let mut model = Self::new(file.entities);
        model.name = file.name;
        model
    }
}

impl From<ProjectModel> for ProjectModelFile {
    fn from(model: ProjectModel) -> Self {
        Self {
            name: model.name,
            entities: model.entities,
        }
    }
}

impl ProjectModel {
    /// Later entities with an id already seen are unreachable by id; `validate` reports them
    pub fn new(entities: Vec<Entity>) -> Self {
        let mut by_id = HashMap::with_capacity(entities.len());
        for (position, entity) in entities.iter().enumerate() {
            by_id.entry(entity.id.clone()).or_insert(position);
        }

        Self {
            name: None,
            entities,
            by_id,
        }
    }

    pub fn from_yaml(yaml: &str) -> Result<Self, serde_yaml::Error> {
        serde_yaml::from_str(yaml)
    }

    pub fn to_yaml(&self) -> Result<String, serde_yaml::Error> {
        serde_yaml::to_string(self)
    }

    pub fn load(path: &Path) -> Result<Self, CoreError> {
        let content = std::fs::read_to_string(path)?;
        let model = Self::from_yaml(&content)?;
        tracing::debug!(path = %path.display(), entities = model.entities.len(), "project model loaded");
        Ok(model)
    }

    /// Reject duplicate ids; dangling relationship targets are only warned about
    pub fn validate(&self) -> Result<(), CoreError> {
        let mut seen_entities = HashSet::new();
        let mut seen_relationships = HashSet::new();

        for entity in &self.entities {
            if !seen_entities.insert(&entity.id) {
                return Err(CoreError::validation(format!(
                    "entity id '{}' is declared more than once",
                    entity.id
                )));
            }

            for relationship in entity.all_relationships() {
                if !seen_relationships.insert(&relationship.id) {
                    return Err(CoreError::validation(format!(
                        "relationship id '{}' is declared more than once",
                        relationship.id
                    )));
                }

                if !self.by_id.contains_key(&relationship.target) {
                    tracing::warn!(
                        entity = %entity.id,
                        relationship = %relationship.id,
                        target = %relationship.target,
                        "relationship targets an entity missing from the model"
                    );
                }
            }
        }

        Ok(())
    }
}

impl ModelIntrospector for ProjectModel {
    fn entity(&self, id: &EntityId) -> Option<&Entity> {
        self.by_id.get(id).map(|&position| &self.entities[position])
    }

    fn entities(&self) -> &[Entity] {
        &self.entities
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crudgen_core::{Relationship, RelationshipKind};

    const MODEL: &str = r#"
name: blog
entities:
  - id: post
    name: Post
    plural: Posts
    resource: post-crud
    relationships:
      - id: post-comments
        name: comments
        kind: hasMany
        target: comment
  - id: comment
    name: Comment
    plural: Comments
"#;

    #[test]
    fn test_from_yaml_builds_lookup() {
        let model = ProjectModel::from_yaml(MODEL).unwrap();

        assert_eq!(model.name.as_deref(), Some("blog"));
        assert_eq!(model.entities().len(), 2);
        let comment = model.entity(&EntityId::from("comment")).unwrap();
        assert_eq!(comment.name, "Comment");
        assert!(model.entity(&EntityId::from("missing")).is_none());
        assert!(model.validate().is_ok());
    }

    #[test]
    fn test_yaml_round_trip_keeps_lookup() {
        let model = ProjectModel::from_yaml(MODEL).unwrap();
        let reparsed = ProjectModel::from_yaml(&model.to_yaml().unwrap()).unwrap();

        assert!(reparsed.entity(&EntityId::from("post")).is_some());
    }

    #[test]
    fn test_validate_rejects_duplicate_entities() {
        let model = ProjectModel::new(vec![
            Entity::new("post", "Post", "Posts"),
            Entity::new("post", "Article", "Articles"),
        ]);

        assert!(model.validate().unwrap_err().is_validation());
        assert_eq!(model.entity(&EntityId::from("post")).unwrap().name, "Post");
    }

    #[test]
    fn test_validate_rejects_duplicate_relationships() {
        let model = ProjectModel::new(vec![
            Entity::new("post", "Post", "Posts")
                .with_relationship(Relationship::new("r1", "comments", RelationshipKind::HasMany, "post")),
            Entity::new("user", "User", "Users")
                .with_relationship(Relationship::new("r1", "posts", RelationshipKind::HasMany, "post")),
        ]);

        assert!(model.validate().is_err());
    }

    #[test]
    fn test_load_missing_file() {
        let err = ProjectModel::load(Path::new("/definitely/not/here.yaml")).unwrap_err();
        assert!(matches!(err, CoreError::Io(_)));
    }
}

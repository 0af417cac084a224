use crudgen_core::{CoreError, SelectionStore};
use crudgen_introspect::{ModelIntrospector, ProjectModel};
use std::path::Path;

/// Default selection: every entity with a resource, everything selected
pub fn render(model_path: &Path) -> Result<String, CoreError> {
    let model = ProjectModel::load(model_path)?;
    model.validate()?;

    let store = SelectionStore::select_all(model.entities());
    tracing::info!(cruds = store.cruds.len(), "default selection created");

    Ok(store.to_yaml()?)
}

pub fn run(model_path: &Path, output: Option<&Path>) -> Result<(), CoreError> {
    let yaml = render(model_path)?;
    super::emit(&yaml, output)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_default_selection() {
        let dir = tempfile::tempdir().unwrap();
        let model_path = dir.path().join("model.yaml");
        std::fs::write(
            &model_path,
            r#"
entities:
  - id: post
    name: Post
    plural: Posts
    resource: post-crud
    relationships:
      - { id: post-comments, name: comments, kind: hasMany, target: comment }
  - id: comment
    name: Comment
    plural: Comments
"#,
        )
        .unwrap();

        let yaml = render(&model_path).unwrap();
        let store = SelectionStore::from_yaml(&yaml).unwrap();

        assert!(store.all_selected);
        assert_eq!(store.cruds.len(), 1);
        assert!(store.cruds[0].relationships[&crudgen_core::RelationshipId::from("post-comments")].selected);
    }
}

use crudgen_codegen::CodeGenerator;
use crudgen_core::{CoreError, GeneratorConfig, SelectionStore};
use crudgen_introspect::ProjectModel;
use std::path::Path;

pub fn render(
    config: &GeneratorConfig,
    model_path: &Path,
    selection_path: &Path,
    runtime_version: Option<&str>,
) -> Result<String, CoreError> {
    let model = ProjectModel::load(model_path)?;
    model.validate()?;
    let selection = SelectionStore::load(selection_path)?;

    let plan = CodeGenerator::new(config.clone()).run(&model, &selection, runtime_version)?;
    plan.to_json()
}

pub fn run(
    config: &GeneratorConfig,
    model_path: &Path,
    selection_path: &Path,
    runtime_version: Option<&str>,
    output: Option<&Path>,
) -> Result<(), CoreError> {
    let json = render(config, model_path, selection_path, runtime_version)?;
    super::emit(&json, output)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plan_written_to_output() {
        let dir = tempfile::tempdir().unwrap();
        let model_path = dir.path().join("model.yaml");
        let selection_path = dir.path().join("selection.yaml");
        let output_path = dir.path().join("out").join("plan.json");
        std::fs::write(
            &model_path,
            "entities:\n  - id: tag\n    name: Tag\n    plural: Tags\n    resource: tag-crud\n",
        )
        .unwrap();
        std::fs::write(&selection_path, "cruds:\n  - id: tag\n    selected: true\n").unwrap();

        let mut config = GeneratorConfig::default();
        config.base_path = "admin".to_string();
        run(&config, &model_path, &selection_path, Some("8.1.0"), Some(&output_path)).unwrap();

        let plan: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&output_path).unwrap()).unwrap();
        let files = plan["files"].as_array().unwrap();
        assert_eq!(files.len(), 6);
        assert_eq!(files[1]["path"], "admin/Resources/TagResource.php");
        assert_eq!(files[4]["template_name"], "pages/list");
    }

    #[test]
    fn test_old_runtime_aborts() {
        let dir = tempfile::tempdir().unwrap();
        let model_path = dir.path().join("model.yaml");
        let selection_path = dir.path().join("selection.yaml");
        std::fs::write(&model_path, "entities:\n  - id: tag\n    name: Tag\n    plural: Tags\n").unwrap();
        std::fs::write(&selection_path, "cruds:\n  - id: tag\n    selected: true\n").unwrap();

        let err = render(&GeneratorConfig::default(), &model_path, &selection_path, Some("7.4")).unwrap_err();

        assert!(err.is_precondition());
    }
}

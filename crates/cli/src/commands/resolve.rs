use crudgen_codegen::{CodeGenerator, Origin};
use crudgen_core::{CoreError, EntityId, GeneratorConfig, ResourceId, SelectionStore};
use crudgen_introspect::ProjectModel;
use serde::Serialize;
use std::path::Path;

#[derive(Debug, Serialize)]
struct ResolvedResource<'a> {
    entity: &'a EntityId,
    name: &'a str,
    origin: Origin,
    resource: &'a ResourceId,
    synthesized: bool,
}

pub fn render(
    config: &GeneratorConfig,
    model_path: &Path,
    selection_path: &Path,
    json: bool,
) -> Result<String, CoreError> {
    let model = ProjectModel::load(model_path)?;
    model.validate()?;
    let selection = SelectionStore::load(selection_path)?;

    let generator = CodeGenerator::new(config.clone());
    let repository = generator.resolve(&model, &selection);

    let resolved: Vec<_> = repository
        .iter()
        .map(|resolved| ResolvedResource {
            entity: &resolved.entity.id,
            name: &resolved.entity.name,
            origin: resolved.origin,
            resource: &resolved.resource.id,
            synthesized: resolved.resource.synthesized,
        })
        .collect();

    if json {
        return Ok(serde_json::to_string_pretty(&resolved)?);
    }

    let mut lines = vec![format!("Resources: {}", resolved.len())];
    for resource in &resolved {
        let origin = match resource.origin {
            Origin::UserSelected => "selected",
            Origin::MasterDetail => "master-detail",
            Origin::Both => "selected, master-detail",
        };
        lines.push(format!("  {} ({})", resource.name, origin));
    }

    Ok(lines.join("\n"))
}

pub fn run(
    config: &GeneratorConfig,
    model_path: &Path,
    selection_path: &Path,
    json: bool,
) -> Result<(), CoreError> {
    let output = render(config, model_path, selection_path, json)?;
    super::emit(&output, None)
}

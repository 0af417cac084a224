//! Resolution of admin resources to generate and the options handed to the
//! renderer for each of them.

pub mod classify;
pub mod naming;
pub mod normalizer;
pub mod options;
pub mod plan;
pub mod repository;
pub mod resolver;
pub mod resource;
pub mod writer;

pub use classify::{FormWidget, TableColumn};
pub use options::{InputOptions, RelationManagerOptions, RelationshipOptions, RenderOptions, ResourceOptionBuilder};
pub use plan::{GenerationPlan, GenerationPlanner, PlannedFile, TemplateKind};
pub use repository::Repository;
pub use resolver::Resolver;
pub use resource::{Origin, ResourceConfig};
pub use writer::CodeWriter;

use crudgen_core::{CoreError, GeneratorConfig, SelectionStore};
use crudgen_introspect::ModelIntrospector;

pub struct CodeGenerator {
    pub config: GeneratorConfig,
}

impl CodeGenerator {
    pub fn new(config: GeneratorConfig) -> Self {
        Self { config }
    }

    /// Resolve the selected resources of `selection` against `model`
    pub fn resolve<'m, M: ModelIntrospector + ?Sized>(
        &self,
        model: &'m M,
        selection: &SelectionStore,
    ) -> Repository<'m> {
        let selected = selection.selected();
        if selected.is_empty() {
            return Repository::new();
        }

        Resolver::new(model).resolve(selected)
    }

    /// Full run: runtime precondition, resolution, then the file plan.
    ///
    /// Without a reported runtime version the precondition is not checked.
    pub fn run<M: ModelIntrospector + ?Sized>(
        &self,
        model: &M,
        selection: &SelectionStore,
        runtime_version: Option<&str>,
    ) -> Result<GenerationPlan, CoreError> {
        if let Some(version) = runtime_version {
            self.config.runtime.check(version)?;
        }

        let repository = self.resolve(model, selection);
        if repository.is_empty() {
            tracing::info!("nothing selected, skipping generation");
            return Ok(GenerationPlan::default());
        }

        let builder = ResourceOptionBuilder::new(model, &repository);
        GenerationPlanner::new(self.config.base_dir()).plan(&repository, &builder)
    }
}

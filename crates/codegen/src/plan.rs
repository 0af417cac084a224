//! Which files a run produces, with the options each template is rendered with.
//!
//! Nothing is rendered here; the plan is handed to the host's renderer.

use crate::naming::to_pascal_case;
use crate::options::ResourceOptionBuilder;
use crate::repository::Repository;
use crudgen_core::CoreError;
use crudgen_introspect::ModelIntrospector;
use serde::Serialize;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TemplateKind {
    DescendingOrderTrait,
    Resource,
    EditPage,
    ViewPage,
    ListPage,
    CreatePage,
    DateRangeFilter,
    RelationManager,
}

impl TemplateKind {
    pub fn template_name(self) -> &'static str {
        match self {
            Self::DescendingOrderTrait => "traits/has_descending_order",
            Self::Resource => "resource",
            Self::EditPage => "pages/edit",
            Self::ViewPage => "pages/view",
            Self::ListPage => "pages/list",
            Self::CreatePage => "pages/create",
            Self::DateRangeFilter => "filters/date_range",
            Self::RelationManager => "relation_manager",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlannedFile {
    pub template: TemplateKind,
    pub template_name: &'static str,
    pub path: PathBuf,
    pub options: serde_json::Value,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct GenerationPlan {
    pub files: Vec<PlannedFile>,
}

impl GenerationPlan {
    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    pub fn paths(&self) -> impl Iterator<Item = &Path> {
        self.files.iter().map(|file| file.path.as_path())
    }

    pub fn to_json(&self) -> Result<String, CoreError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    fn push<T: Serialize>(&mut self, template: TemplateKind, path: PathBuf, options: &T) -> Result<(), CoreError> {
        self.files.push(PlannedFile {
            template,
            template_name: template.template_name(),
            path,
            options: serde_json::to_value(options)?,
        });
        Ok(())
    }
}

pub struct GenerationPlanner {
    base_path: PathBuf,
}

impl GenerationPlanner {
    pub fn new(base_path: impl Into<PathBuf>) -> Self {
        Self {
            base_path: base_path.into(),
        }
    }

    pub fn plan<'m, M: ModelIntrospector + ?Sized>(
        &self,
        repository: &Repository<'m>,
        builder: &ResourceOptionBuilder<'_, 'm, M>,
    ) -> Result<GenerationPlan, CoreError> {
        let mut plan = GenerationPlan::default();
        if repository.is_empty() {
            return Ok(plan);
        }

        plan.push(
            TemplateKind::DescendingOrderTrait,
            self.base_path.join("Traits").join("HasDescendingOrder.php"),
            &serde_json::Value::Null,
        )?;

        let mut date_range_planned = false;

        for config in repository {
            let options = builder.build(config);
            let name = &options.name;
            let resource_dir = self.base_path.join("Resources").join(format!("{}Resource", name));
            let pages_dir = resource_dir.join("Pages");

            plan.push(
                TemplateKind::Resource,
                self.base_path.join("Resources").join(format!("{}Resource.php", name)),
                &options,
            )?;
            plan.push(TemplateKind::EditPage, pages_dir.join(format!("Edit{}.php", name)), &options)?;
            plan.push(TemplateKind::ViewPage, pages_dir.join(format!("View{}.php", name)), &options)?;
            plan.push(
                TemplateKind::ListPage,
                pages_dir.join(format!("List{}.php", options.plural)),
                &options,
            )?;
            plan.push(TemplateKind::CreatePage, pages_dir.join(format!("Create{}.php", name)), &options)?;

            if options.has_timestamps && !date_range_planned {
                plan.push(
                    TemplateKind::DateRangeFilter,
                    self.base_path.join("Filters").join("DateRangeFilter.php"),
                    &serde_json::Value::Null,
                )?;
                date_range_planned = true;
            }

            for relationship in builder.relation_managers(config) {
                let Some(manager) = builder.relation_manager_options(config, relationship) else {
                    continue;
                };
                let file_name = format!(
                    "{}RelationManager.php",
                    to_pascal_case(&manager.relationship.target_plural)
                );
                plan.push(
                    TemplateKind::RelationManager,
                    resource_dir.join("RelationManagers").join(file_name),
                    &manager,
                )?;
            }
        }

        tracing::info!(files = plan.len(), base_path = %self.base_path.display(), "generation plan ready");

        Ok(plan)
    }
}

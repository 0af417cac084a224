use super::{ConfigError, ConfigSource, ConfigValidator, LogLevelValidator, VersionValidator};
use crate::CoreError;
use semver::{BuildMetadata, Prerelease, Version};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::{Path, PathBuf};

pub const ENV_BASE_PATH: &str = "CRUDGEN_BASE_PATH";
pub const ENV_MIN_RUNTIME: &str = "CRUDGEN_MIN_RUNTIME";
pub const ENV_LOG_LEVEL: &str = "CRUDGEN_LOG_LEVEL";

/// Settings for one generation run, usually read from `crudgen.yaml`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneratorConfig {
    /// Directory generated resources are placed under
    #[serde(default = "default_base_path")]
    pub base_path: String,
    #[serde(default)]
    pub runtime: RuntimeRequirement,
    #[serde(default)]
    pub logging: LoggingSettings,
    #[serde(skip)]
    sources: HashMap<String, ConfigSource>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuntimeRequirement {
    #[serde(default = "default_minimum_version")]
    pub minimum_version: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoggingSettings {
    #[serde(default = "default_log_level")]
    pub level: String,
    #[serde(default)]
    pub json: bool,
}

fn default_base_path() -> String {
    "app/Filament".to_string()
}

fn default_minimum_version() -> String {
    "8.0.0".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            base_path: default_base_path(),
            runtime: RuntimeRequirement::default(),
            logging: LoggingSettings::default(),
            sources: HashMap::new(),
        }
    }
}

impl Default for RuntimeRequirement {
    fn default() -> Self {
        Self {
            minimum_version: default_minimum_version(),
        }
    }
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            json: false,
        }
    }
}

impl GeneratorConfig {
    pub fn from_yaml(yaml: &str) -> Result<Self, ConfigError> {
        Ok(serde_yaml::from_str(yaml)?)
    }

    /// Load a config file, apply environment overrides and validate
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        Self::load_with(path, |key| std::env::var(key).ok())
    }

    pub fn load_with<F>(path: &Path, lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let content = std::fs::read_to_string(path)?;
        let mut config = Self::from_yaml(&content)?;
        let origin = ConfigSource::File(path.display().to_string());
        for field in ["base_path", "runtime.minimum_version", "logging.level"] {
            config.sources.insert(field.to_string(), origin.clone());
        }
        config = config.apply_overrides(lookup);
        config.validate()?;
        Ok(config)
    }

    pub fn apply_env(self) -> Self {
        self.apply_overrides(|key| std::env::var(key).ok())
    }

    /// Override values from a key lookup (environment variables in practice)
    pub fn apply_overrides<F>(mut self, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(base_path) = lookup(ENV_BASE_PATH) {
            self.base_path = base_path;
            self.sources
                .insert("base_path".to_string(), ConfigSource::EnvVar(ENV_BASE_PATH.to_string()));
        }
        if let Some(version) = lookup(ENV_MIN_RUNTIME) {
            self.runtime.minimum_version = version;
            self.sources.insert(
                "runtime.minimum_version".to_string(),
                ConfigSource::EnvVar(ENV_MIN_RUNTIME.to_string()),
            );
        }
        if let Some(level) = lookup(ENV_LOG_LEVEL) {
            self.logging.level = level;
            self.sources
                .insert("logging.level".to_string(), ConfigSource::EnvVar(ENV_LOG_LEVEL.to_string()));
        }
        self
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.base_path.trim().is_empty() {
            return Err(ConfigError::validation_failed("base_path must not be empty"));
        }
        VersionValidator {
            field: "runtime.minimum_version",
        }
        .validate(&self.runtime.minimum_version)?;
        LogLevelValidator.validate(&self.logging.level)?;
        Ok(())
    }

    /// Source of a field, `Default` when nothing overrode it
    pub fn source_of(&self, field: &str) -> ConfigSource {
        self.sources
            .get(field)
            .cloned()
            .unwrap_or(ConfigSource::Default)
    }

    pub fn base_dir(&self) -> PathBuf {
        PathBuf::from(&self.base_path)
    }
}

impl RuntimeRequirement {
    /// Fails when the host runtime is older than the required minimum
    pub fn check(&self, found: &str) -> Result<(), CoreError> {
        let minimum = parse_version(&self.minimum_version).map_err(|e| {
            CoreError::configuration(format!(
                "invalid minimum runtime version '{}': {}",
                self.minimum_version, e
            ))
        })?;
        let found_version = parse_version(found).map_err(|e| {
            CoreError::precondition(format!("unreadable runtime version '{}': {}", found.trim(), e))
        })?;

        if found_version < minimum {
            tracing::error!(
                found = %found_version,
                required = %minimum,
                "runtime version is lower than required"
            );
            return Err(CoreError::precondition(format!(
                "runtime version {} is lower than the required {}",
                found_version, minimum
            )));
        }

        Ok(())
    }
}

/// Parse a version leniently: missing minor/patch count as zero and
/// pre-release or build suffixes are ignored.
pub fn parse_version(raw: &str) -> Result<Version, semver::Error> {
    let trimmed = raw.trim().trim_start_matches('v');
    let core_end = trimmed
        .find(|c: char| c == '-' || c == '+')
        .unwrap_or(trimmed.len());
    let (core, rest) = trimmed.split_at(core_end);

    let candidate = match core.matches('.').count() {
        0 => format!("{}.0.0{}", core, rest),
        1 => format!("{}.0{}", core, rest),
        _ => trimmed.to_string(),
    };

    let mut version = Version::parse(&candidate)?;
    version.pre = Prerelease::EMPTY;
    version.build = BuildMetadata::EMPTY;
    Ok(version)
}

pub mod config;
pub mod errors;
pub mod logging;
pub mod specs;

// Re-export key types for convenience
pub use config::{ConfigError, ConfigSource, GeneratorConfig, LoggingSettings, RuntimeRequirement};
pub use errors::CoreError;
pub use logging::{init_logging, LoggingConfig};
pub use specs::{
    CrudSelection, Entity, EntityId, FieldId, Input, InputId, InputKind, InputSelection,
    Relationship, RelationshipId, RelationshipKind, RelationshipSelection, RelationshipSelections,
    ResourceId, SelectionStore,
};

/// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Get crudgen version
pub fn version() -> &'static str {
    VERSION
}

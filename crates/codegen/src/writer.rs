use crudgen_core::CoreError;
use std::fs;
use std::path::Path;

/// Writes generator output, leaving files whose content is unchanged untouched
pub struct CodeWriter;

impl CodeWriter {
    pub fn new() -> Self {
        Self
    }

    /// Returns `true` when the file was written
    pub fn write_if_changed(&self, path: &Path, content: &str) -> Result<bool, CoreError> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        if path.exists() {
            let existing = fs::read_to_string(path)?;
            if existing == content {
                tracing::debug!(path = %path.display(), "unchanged, not rewriting");
                return Ok(false);
            }
        }

        fs::write(path, content)?;
        Ok(true)
    }
}

impl Default for CodeWriter {
    fn default() -> Self {
        Self::new()
    }
}

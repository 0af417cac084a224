pub mod init_selection;
pub mod plan;
pub mod resolve;

use crudgen_codegen::CodeWriter;
use crudgen_core::CoreError;
use std::path::Path;

/// Print to stdout, or write to `output` when one is given
pub(crate) fn emit(content: &str, output: Option<&Path>) -> Result<(), CoreError> {
    match output {
        Some(path) => {
            if CodeWriter::new().write_if_changed(path, content)? {
                tracing::info!(path = %path.display(), "written");
            }
        }
        None => println!("{}", content),
    }
    Ok(())
}

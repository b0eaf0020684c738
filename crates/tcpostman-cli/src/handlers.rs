//! Command handlers for CLI subcommands
//!
//! This module contains the implementation logic for each CLI subcommand.

mod completions;
mod generate;
mod inspect;

pub use completions::handle_completions;
pub use generate::handle_generate;
pub use inspect::handle_inspect;

use crate::error::{Error, Result};
use std::path::Path;
use tcpostman_schemas::SchemaTree;

/// Load a structure file, reporting a missing file distinctly
fn load_tree(path: &Path) -> Result<SchemaTree> {
    if !path.exists() {
        return Err(Error::FileNotFound {
            path: path.to_path_buf(),
        });
    }
    Ok(tcpostman_core::load_structure(path)?)
}

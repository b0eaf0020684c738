//! Structure document loading
//!
//! This module provides:
//! - Extraction of the object literal embedded in `structure.js`
//! - Comment stripping and lenient JSON parsing with a YAML fallback
//! - Error types carrying the offending path
//!
//! # Example Usage
//!
//! ```rust,no_run
//! use tcpostman_schemas::loader::StructureParser;
//! use std::path::Path;
//!
//! let tree = StructureParser::new().load_tree(Path::new("structure.js"))?;
//! println!("{} templates", tree.entries().count());
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! Copyright (c) 2025 tcpostman contributors
//! Licensed under the Apache-2.0 license

pub mod error;
pub mod parser;

pub use error::{LoaderError, LoaderResult};
pub use parser::{extract_root_object, strip_comments, Format, StructureParser};

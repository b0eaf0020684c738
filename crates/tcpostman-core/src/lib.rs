//! tcpostman Core - Postman collection generation for Teamcenter services
//!
//! This crate turns a loaded Teamcenter `structure.js` tree into a Postman
//! v2.1 collection: one folder per library, service and version, and one
//! request per operation with a sampled body, Markdown documentation and an
//! example response.
//!
//! # Main Components
//!
//! - **Collection Model**: Serde types for the Postman document
//! - **Naming**: Version labels, endpoint URLs and response QNames
//! - **Options**: Header, variables and timestamp of a run
//! - **Collector**: Traversal of templates, libraries and services
//!
//! # Example
//!
//! ```no_run
//! use std::path::Path;
//! use tcpostman_core::{generate_collection, load_structure, GenerationOptions, Result};
//!
//! fn example() -> Result<()> {
//!     let tree = load_structure(Path::new("structure.js"))?;
//!     let options = GenerationOptions::new(chrono::Local::now().naive_local());
//!     let generated = generate_collection(&tree, &options)?;
//!     println!("{}", generated.collection.to_json(true)?);
//!     Ok(())
//! }
//! ```

pub mod builder;
pub mod collection;
pub mod collector;
pub mod error;
pub mod naming;
pub mod options;

use std::path::Path;
use tcpostman_schemas::{SchemaTree, StructureParser};
use tracing::info;

pub use builder::{CollectionBuilder, COLLECTION_DESCRIPTION};
pub use collection::{
    Body, Collection, ExampleResponse, Folder, Header, Info, Item, Request, RequestItem, Variable,
    COLLECTION_SCHEMA,
};
pub use collector::{CollectionStats, OperationCollector};
pub use error::{Error, Result};
pub use options::{default_header, GenerationOptions, Variables};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// A built collection together with the counters of the run
#[derive(Debug, Clone, PartialEq)]
pub struct GeneratedCollection {
    pub collection: Collection,
    pub stats: CollectionStats,
}

/// Load a `structure.js` (or JSON/YAML) file into a schema tree
pub fn load_structure(path: &Path) -> Result<SchemaTree> {
    Ok(StructureParser::new().load_tree(path)?)
}

/// Generate the full collection for a schema tree
pub fn generate_collection(tree: &SchemaTree, options: &GenerationOptions) -> Result<GeneratedCollection> {
    let mut builder = CollectionBuilder::new(options.collection_name(), options.variables.clone());
    let stats = OperationCollector::new(tree, options).collect(&mut builder)?;
    let collection = builder.build();

    info!(
        name = %collection.info.name,
        requests = stats.operations,
        include_internal = options.include_internal,
        "Generated collection"
    );

    Ok(GeneratedCollection { collection, stats })
}

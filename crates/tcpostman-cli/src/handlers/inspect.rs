//! Inspect command handler
//!
//! Resolves one namespaced type and shows what the generator would derive
//! from it: the deep sample used in request bodies and the flattened field
//! documentation.

use crate::cli::InspectArgs;
use crate::error::{Error, Result};
use crate::logging::timing::Timer;
use crate::output::OutputWriter;
use serde::Serialize;
use serde_json::Value;
use tcpostman_schemas::documentation::{FieldDoc, FieldDocCollector};
use tcpostman_schemas::{synthesize, ResolutionStack, SchemaTree};
use tracing::instrument;

#[derive(Debug, Serialize)]
struct InspectReport {
    type_path: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    sample: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    fields: Option<Vec<FieldDoc>>,
}

/// Handle the inspect command
#[instrument(skip(output), fields(type_path = %args.type_path))]
pub async fn handle_inspect(args: InspectArgs, output: &mut OutputWriter) -> Result<()> {
    let _timer = Timer::with_details("inspect", &args.type_path);

    let tree = super::load_tree(&args.structure)?;
    let report = inspect(&tree, &args)?;

    if !output.is_human() {
        return output.data(&report);
    }

    if let Some(sample) = &report.sample {
        output.section("Sample")?;
        output.writeln(&serde_json::to_string_pretty(sample)?)?;
    }

    if let Some(fields) = &report.fields {
        output.section("Fields")?;
        let rows = fields
            .iter()
            .map(|doc| {
                let mut description = doc.description.clone();
                if !doc.enum_values.is_empty() {
                    if !description.is_empty() {
                        description.push(' ');
                    }
                    description.push_str(&format!("[{}]", doc.enum_values.join(", ")));
                }
                vec![doc.path.clone(), doc.type_name.clone(), description]
            })
            .collect();
        output.table(&["Path", "Type", "Description"], rows)?;
    }

    Ok(())
}

fn inspect(tree: &SchemaTree, args: &InspectArgs) -> Result<InspectReport> {
    let type_path = args.type_path.trim();
    if tree.resolve(type_path).is_none() {
        return Err(Error::TypeNotFound {
            path: type_path.to_string(),
        });
    }

    let sample = args
        .show_sample()
        .then(|| synthesize(type_path, tree, &mut ResolutionStack::new()));

    let fields = args.show_fields().then(|| {
        let root = type_path.rsplit("::").next().unwrap_or(type_path);
        let mut collector = FieldDocCollector::new(tree);
        collector.collect(root, &serde_json::json!({ "type": type_path }));
        collector.finish()
    });

    Ok(InspectReport {
        type_path: type_path.to_string(),
        sample,
        fields,
    })
}

//! Operation traversal
//!
//! Walks `<template>.Soa.<library>.<version>.<service>.<operation>` and
//! turns every operation into a request item: URL, header plus sampled
//! body, Markdown description and a shallow example response.

use crate::builder::CollectionBuilder;
use crate::collection::{Body, ExampleResponse, Header, Request, RequestItem};
use crate::error::Result;
use crate::naming::{date_folder_name, is_operation, request_url, response_qname, version_label};
use crate::options::GenerationOptions;
use serde::Serialize;
use serde_json::{json, Map, Value};
use tcpostman_schemas::documentation::{DocGenerator, GeneratorConfig};
use tcpostman_schemas::{input_body_sample, output_fields_sample, SchemaTree};
use tracing::{debug, info, trace};

/// Key of the service catalogue under each template
pub const SOA_KEY: &str = "Soa";

/// Library key holding the internal libraries
pub const INTERNAL_KEY: &str = "Internal";

/// Folder between a library and its services
pub const SERVICES_FOLDER: &str = "Services";

/// Counters reported after a run
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CollectionStats {
    pub templates: usize,
    pub libraries: usize,
    pub internal_libraries: usize,
    pub services: usize,
    pub operations: usize,
}

#[derive(Debug, Clone, Copy)]
struct LibraryScope<'a> {
    template: &'a str,
    library: &'a str,
    internal: bool,
}

/// Collects every operation of a schema tree into a [`CollectionBuilder`]
pub struct OperationCollector<'a> {
    tree: &'a SchemaTree,
    options: &'a GenerationOptions,
    header: Value,
    stats: CollectionStats,
}

impl<'a> OperationCollector<'a> {
    pub fn new(tree: &'a SchemaTree, options: &'a GenerationOptions) -> Self {
        Self {
            tree,
            options,
            header: options.request_header(),
            stats: CollectionStats::default(),
        }
    }

    /// Visit all templates; internal libraries only when enabled
    pub fn collect(mut self, builder: &mut CollectionBuilder) -> Result<CollectionStats> {
        let tree = self.tree;

        for (template, node) in tree.entries() {
            let Some(soa) = node.get(SOA_KEY).and_then(Value::as_object) else {
                continue;
            };
            self.stats.templates += 1;

            for (library, library_node) in soa {
                if library == INTERNAL_KEY {
                    continue;
                }
                let Some(versions) = library_node.as_object() else {
                    continue;
                };
                let scope = LibraryScope {
                    template,
                    library,
                    internal: false,
                };
                self.collect_library(builder, scope, versions)?;
            }

            if !self.options.include_internal {
                continue;
            }

            let internal = soa.get(INTERNAL_KEY).and_then(Value::as_object);
            for (library, library_node) in internal.into_iter().flatten() {
                let Some(versions) = library_node.as_object() else {
                    continue;
                };
                let scope = LibraryScope {
                    template,
                    library,
                    internal: true,
                };
                self.collect_library(builder, scope, versions)?;
            }
        }

        info!(
            templates = self.stats.templates,
            libraries = self.stats.libraries,
            internal_libraries = self.stats.internal_libraries,
            services = self.stats.services,
            operations = self.stats.operations,
            "Collected operations"
        );

        Ok(self.stats)
    }

    fn collect_library(
        &mut self,
        builder: &mut CollectionBuilder,
        scope: LibraryScope<'_>,
        versions: &Map<String, Value>,
    ) -> Result<()> {
        if scope.internal {
            self.stats.internal_libraries += 1;
        } else {
            self.stats.libraries += 1;
        }
        debug!(template = scope.template, library = scope.library, internal = scope.internal, "Collecting library");

        builder.ensure_folder(&[scope.library, SERVICES_FOLDER]);

        for (version_key, version_node) in versions {
            let Some(version) = version_label(version_key) else {
                continue;
            };
            let Some(services) = version_node.as_object() else {
                continue;
            };

            let date_folder = date_folder_name(&version, scope.template);

            for (service, service_node) in services {
                let Some(operations) = service_node.as_object() else {
                    continue;
                };
                self.stats.services += 1;

                let path = [scope.library, SERVICES_FOLDER, service.as_str(), date_folder.as_str()];
                builder.ensure_folder(&path);

                for (operation, operation_node) in operations {
                    if !is_operation(operation, operation_node) {
                        continue;
                    }
                    let item = self.build_item(scope, &version, service, operation, operation_node)?;
                    builder.add_request(&path, item);
                    self.stats.operations += 1;
                }
            }
        }

        Ok(())
    }

    fn build_item(
        &self,
        scope: LibraryScope<'_>,
        version: &str,
        service: &str,
        operation: &str,
        node: &Value,
    ) -> Result<RequestItem> {
        trace!(library = scope.library, service, operation, "Building request");

        let input = node.get("input");
        let payload = json!({
            "header": self.header.clone(),
            "body": input_body_sample(input, self.tree),
        });

        let generator = DocGenerator::with_config(GeneratorConfig {
            mark_internal: scope.internal,
        });
        let description = generator.generate(
            node.get("description").and_then(Value::as_str),
            input,
            self.tree,
        );

        let request = Request {
            method: "POST".to_string(),
            header: vec![Header::new("Content-Type", "application/json")],
            url: request_url(scope.library, version, service, operation, scope.internal),
            body: Body::raw(serde_json::to_string_pretty(&payload)?),
            description: (!description.trim().is_empty()).then_some(description),
        };

        let example = example_output(scope.library, version, service, operation, node.get("output"));

        Ok(RequestItem {
            name: operation.to_string(),
            internal: scope.internal,
            request,
            response: vec![ExampleResponse::ok_json(serde_json::to_string_pretty(&example)?)],
        })
    }
}

/// `.QName` followed by shallow samples of the output fields
fn example_output(library: &str, version: &str, service: &str, operation: &str, output: Option<&Value>) -> Value {
    let mut example = Map::new();
    example.insert(
        ".QName".to_string(),
        Value::String(response_qname(library, version, service, operation)),
    );

    for (name, sample) in output_fields_sample(output) {
        let key = if name == "partialErrors" {
            "PartialErrors".to_string()
        } else {
            name
        };
        example.insert(key, sample);
    }

    Value::Object(example)
}

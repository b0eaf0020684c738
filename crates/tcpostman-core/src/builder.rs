//! Incremental collection assembly
//!
//! Folders are found or created by name along a path, so libraries that
//! appear under several templates share one folder tree.

use crate::collection::{Collection, Folder, Info, Item, RequestItem, COLLECTION_SCHEMA};
use crate::options::Variables;

/// Markdown shown on the collection overview
pub const COLLECTION_DESCRIPTION: &str = "\
# Teamcenter REST API Collection

This collection was generated from **structure.js**.
It mirrors Teamcenter JsonRestServices:
`<Library> → Services → <Service> → <YYYY-MM> → <operation>`.

> **What you should do now**
> 1. Set Postman variables: **TCURL**, **TCURL_WEBTIER_PORT**, **WEBTIER_APP_NAME** (defaults come from config).
> 2. Open **Core → Services → Session → 2011-06 → login** and try a request.
> 3. Fill the `body.credentials` fields (user, password).
> 4. Keep the `header` section as-is (already included from config).
> 5. (Optional) Re-run the generator with `--include-internal` to add Internal APIs.

**Notes**
- Example responses include `.QName` and minimal placeholders.
- Internal APIs are **excluded by default**. Include them with `--include-internal`.
";

#[derive(Debug, Default)]
struct FolderNode {
    name: String,
    folders: Vec<FolderNode>,
    requests: Vec<RequestItem>,
}

impl FolderNode {
    fn named(name: &str) -> Self {
        Self {
            name: name.to_string(),
            ..Self::default()
        }
    }

    fn child(&mut self, name: &str) -> &mut FolderNode {
        let idx = match self.folders.iter().position(|f| f.name == name) {
            Some(idx) => idx,
            None => {
                self.folders.push(FolderNode::named(name));
                self.folders.len() - 1
            }
        };
        &mut self.folders[idx]
    }

    fn descend(&mut self, path: &[&str]) -> &mut FolderNode {
        path.iter().fold(self, |node, name| node.child(name))
    }

    fn into_items(self) -> Vec<Item> {
        items_of(self.folders, self.requests)
    }
}

fn items_of(folders: Vec<FolderNode>, requests: Vec<RequestItem>) -> Vec<Item> {
    folders
        .into_iter()
        .map(|FolderNode { name, folders, requests }| {
            Item::Folder(Folder {
                name,
                item: items_of(folders, requests),
            })
        })
        .chain(requests.into_iter().map(|r| Item::Request(Box::new(r))))
        .collect()
}

/// Builds a [`Collection`] from folder paths and request items
#[derive(Debug)]
pub struct CollectionBuilder {
    name: String,
    variables: Variables,
    root: FolderNode,
    request_count: usize,
}

impl CollectionBuilder {
    pub fn new(name: impl Into<String>, variables: Variables) -> Self {
        Self {
            name: name.into(),
            variables,
            root: FolderNode::default(),
            request_count: 0,
        }
    }

    /// Create every folder along `path` that does not exist yet
    pub fn ensure_folder(&mut self, path: &[&str]) {
        self.root.descend(path);
    }

    /// Append a request to the folder at `path`, creating folders as needed
    pub fn add_request(&mut self, path: &[&str], request: RequestItem) {
        self.root.descend(path).requests.push(request);
        self.request_count += 1;
    }

    pub fn request_count(&self) -> usize {
        self.request_count
    }

    pub fn build(self) -> Collection {
        Collection {
            info: Info {
                name: self.name,
                description: COLLECTION_DESCRIPTION.to_string(),
                schema: COLLECTION_SCHEMA.to_string(),
            },
            item: self.root.into_items(),
            variable: self.variables.to_collection_variables(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::collection::{Body, ExampleResponse, Request};
    use pretty_assertions::assert_eq;

    fn request(name: &str) -> RequestItem {
        RequestItem {
            name: name.to_string(),
            internal: false,
            request: Request {
                method: "POST".to_string(),
                header: Vec::new(),
                url: String::new(),
                body: Body::raw("{}"),
                description: None,
            },
            response: vec![ExampleResponse::ok_json("{}")],
        }
    }

    #[test]
    fn test_folders_are_reused() {
        let mut builder = CollectionBuilder::new("c", Variables::default());
        builder.add_request(&["Core", "Services", "Session", "2011-06"], request("login"));
        builder.add_request(&["Core", "Services", "Session", "2011-06"], request("logout"));
        builder.add_request(&["Core", "Services", "Session", "2007-01"], request("old"));
        assert_eq!(builder.request_count(), 3);

        let collection = builder.build();
        assert_eq!(collection.item.len(), 1);

        let session = collection.folder(&["Core", "Services", "Session"]).unwrap();
        let versions: Vec<_> = session
            .item
            .iter()
            .map(|item| match item {
                Item::Folder(f) => f.name.as_str(),
                Item::Request(r) => r.name.as_str(),
            })
            .collect();
        assert_eq!(versions, vec!["2011-06", "2007-01"]);

        let names: Vec<_> = collection.requests().into_iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["login", "logout", "old"]);
    }

    #[test]
    fn test_empty_folders_are_kept() {
        let mut builder = CollectionBuilder::new("c", Variables::default());
        builder.ensure_folder(&["Query", "Services"]);

        let collection = builder.build();
        let services = collection.folder(&["Query", "Services"]).unwrap();
        assert!(services.item.is_empty());
    }

    #[test]
    fn test_collection_shell() {
        let collection = CollectionBuilder::new("Teamcenter REST API (x)", Variables::default()).build();
        assert_eq!(collection.info.name, "Teamcenter REST API (x)");
        assert!(collection.info.description.starts_with("# Teamcenter REST API Collection"));
        assert_eq!(collection.info.schema, COLLECTION_SCHEMA);
        assert_eq!(collection.variable.len(), 3);
        assert!(collection.item.is_empty());
    }
}

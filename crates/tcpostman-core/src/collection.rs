//! Postman collection (v2.1) data model
//!
//! Only the subset the generator writes is modelled. Field order in the
//! structs is the order Postman shows when the file is opened as text.

use crate::error::Result;
use serde::{Deserialize, Serialize};

/// JSON schema URL identifying collection format v2.1
pub const COLLECTION_SCHEMA: &str =
    "https://schema.getpostman.com/json/collection/v2.1.0/collection.json";

/// A complete collection document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Collection {
    pub info: Info,
    pub item: Vec<Item>,
    pub variable: Vec<Variable>,
}

impl Collection {
    /// Serialize the collection, pretty-printed or compact
    pub fn to_json(&self, pretty: bool) -> Result<String> {
        let json = if pretty {
            serde_json::to_string_pretty(self)?
        } else {
            serde_json::to_string(self)?
        };
        Ok(json)
    }

    /// Depth-first walk over every request item
    pub fn requests(&self) -> Vec<&RequestItem> {
        let mut found = Vec::new();
        let mut pending: Vec<&Item> = self.item.iter().rev().collect();

        while let Some(item) = pending.pop() {
            match item {
                Item::Folder(folder) => pending.extend(folder.item.iter().rev()),
                Item::Request(request) => found.push(&**request),
            }
        }

        found
    }

    /// Find a folder by its name path from the root
    pub fn folder(&self, path: &[&str]) -> Option<&Folder> {
        let (first, rest) = path.split_first()?;
        let mut current = find_folder(&self.item, first)?;
        for name in rest {
            current = find_folder(&current.item, name)?;
        }
        Some(current)
    }
}

fn find_folder<'a>(items: &'a [Item], name: &str) -> Option<&'a Folder> {
    items.iter().find_map(|item| match item {
        Item::Folder(folder) if folder.name == name => Some(folder),
        _ => None,
    })
}

/// Collection metadata
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Info {
    pub name: String,
    pub description: String,
    pub schema: String,
}

/// Folder or request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Item {
    Request(Box<RequestItem>),
    Folder(Folder),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Folder {
    pub name: String,
    pub item: Vec<Item>,
}

impl Folder {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            item: Vec::new(),
        }
    }
}

/// One operation with its request and example response
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RequestItem {
    pub name: String,
    #[serde(rename = "_internal")]
    pub internal: bool,
    pub request: Request,
    pub response: Vec<ExampleResponse>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Request {
    pub method: String,
    pub header: Vec<Header>,
    /// Raw URL string; structured URLs get dropped by some importers
    pub url: String,
    pub body: Body,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Header {
    pub key: String,
    pub value: String,
}

impl Header {
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Body {
    pub mode: String,
    pub raw: String,
}

impl Body {
    pub fn raw(raw: impl Into<String>) -> Self {
        Self {
            mode: "raw".to_string(),
            raw: raw.into(),
        }
    }
}

/// Saved example response shown next to a request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExampleResponse {
    pub name: String,
    pub status: String,
    pub code: u16,
    pub header: Vec<Header>,
    #[serde(rename = "_postman_previewlanguage")]
    pub preview_language: String,
    pub body: String,
}

impl ExampleResponse {
    /// A `200 OK` JSON example with the given body text
    pub fn ok_json(body: impl Into<String>) -> Self {
        Self {
            name: "Example 200".to_string(),
            status: "OK".to_string(),
            code: 200,
            header: Vec::new(),
            preview_language: "json".to_string(),
            body: body.into(),
        }
    }
}

/// Collection-level variable
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Variable {
    pub key: String,
    pub value: String,
}

impl Variable {
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }
}

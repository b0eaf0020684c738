//! Generation options: endpoint variables, request header, timestamp

use crate::collection::Variable;
use crate::error::{Error, Result};
use chrono::NaiveDateTime;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{json, Value};
use tcpostman_schemas::types::value_text;

pub const DEFAULT_TCURL: &str = "http://127.0.0.1";
pub const DEFAULT_WEBTIER_PORT: &str = "7001";
pub const DEFAULT_APP_NAME: &str = "tc";

/// Format of the timestamp in the collection name
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Collection variables referenced by every request URL
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Variables {
    #[serde(rename = "TCURL", deserialize_with = "text_or_scalar")]
    pub tcurl: String,
    #[serde(rename = "TCURL_WEBTIER_PORT", deserialize_with = "text_or_scalar")]
    pub webtier_port: String,
    #[serde(rename = "WEBTIER_APP_NAME", deserialize_with = "text_or_scalar")]
    pub app_name: String,
}

impl Default for Variables {
    fn default() -> Self {
        Self {
            tcurl: DEFAULT_TCURL.to_string(),
            webtier_port: DEFAULT_WEBTIER_PORT.to_string(),
            app_name: DEFAULT_APP_NAME.to_string(),
        }
    }
}

impl Variables {
    /// Variables in the order they appear in the collection
    pub fn to_collection_variables(&self) -> Vec<Variable> {
        vec![
            Variable::new("TCURL", &self.tcurl),
            Variable::new("TCURL_WEBTIER_PORT", &self.webtier_port),
            Variable::new("WEBTIER_APP_NAME", &self.app_name),
        ]
    }
}

/// Accept `7001` as well as `"7001"` for a variable value
fn text_or_scalar<'de, D>(deserializer: D) -> std::result::Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Value::deserialize(deserializer).map(|value| value_text(&value))
}

/// Session header sent with every request when none is configured
pub fn default_header() -> Value {
    json!({
        "state": {
            "formatProperties": true,
            "stateless": true,
            "unloadObjects": false,
            "enableServerStateHeaders": true,
            "locale": "en_US"
        },
        "policy": {
            "types": [
                {
                    "name": "ItemRevision",
                    "properties": [
                        {"name": "item_id"},
                        {"name": "item_revision_id"},
                        {"name": "object_name"},
                        {"name": "owning_user"},
                        {"name": "last_mod_date"}
                    ]
                }
            ]
        }
    })
}

/// Everything the generator needs besides the schema tree
#[derive(Debug, Clone, PartialEq)]
pub struct GenerationOptions {
    /// Visit `Soa.Internal` libraries as well
    pub include_internal: bool,
    header: Option<Value>,
    pub variables: Variables,
    /// Stamped into the collection name
    pub generated_at: NaiveDateTime,
}

impl GenerationOptions {
    pub fn new(generated_at: NaiveDateTime) -> Self {
        Self {
            include_internal: false,
            header: None,
            variables: Variables::default(),
            generated_at,
        }
    }

    pub fn with_include_internal(mut self, include_internal: bool) -> Self {
        self.include_internal = include_internal;
        self
    }

    pub fn with_variables(mut self, variables: Variables) -> Self {
        self.variables = variables;
        self
    }

    /// Replace the request header; it must be a JSON object
    pub fn with_header(mut self, header: Value) -> Result<Self> {
        if !header.is_object() {
            return Err(Error::configuration(
                "header must be a JSON object",
                Some("header"),
            ));
        }
        self.header = Some(header);
        Ok(self)
    }

    /// The configured header, or [`default_header`]
    pub fn request_header(&self) -> Value {
        self.header.clone().unwrap_or_else(default_header)
    }

    pub fn collection_name(&self) -> String {
        format!(
            "Teamcenter REST API ({})",
            self.generated_at.format(TIMESTAMP_FORMAT)
        )
    }
}

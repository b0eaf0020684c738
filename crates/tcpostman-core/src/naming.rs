//! Names derived from catalogue keys: version labels, URLs, QNames

use regex::Regex;
use serde_json::Value;
use std::sync::OnceLock;

/// Base of every request URL, in Postman variable syntax
pub const URL_PREFIX: &str = "{{TCURL}}:{{TCURL_WEBTIER_PORT}}/{{WEBTIER_APP_NAME}}/JsonRestServices/";

/// Namespace prefix of response QNames
pub const QNAME_PREFIX: &str = "http://teamcenter.com/Schemas/";

/// Template whose date folders carry no suffix
pub const PRIMARY_TEMPLATE: &str = "Teamcenter";

static VERSION_KEY: OnceLock<Regex> = OnceLock::new();

fn version_key() -> &'static Regex {
    VERSION_KEY.get_or_init(|| Regex::new(r"^_(\d{4})_(\d{2})$").expect("valid regex"))
}

/// `_2011_06` → `2011-06`; other `_`-prefixed keys lose the underscore.
/// Keys without the prefix are not versions.
pub fn version_label(key: &str) -> Option<String> {
    let rest = key.strip_prefix('_')?;
    match version_key().captures(key) {
        Some(caps) => Some(format!("{}-{}", &caps[1], &caps[2])),
        None => Some(rest.to_string()),
    }
}

/// Date folder name for a version under a template
pub fn date_folder_name(version: &str, template: &str) -> String {
    if template == PRIMARY_TEMPLATE {
        version.to_string()
    } else {
        format!("{} ({})", version, template)
    }
}

/// Whether a service entry is an operation rather than a type or message
///
/// Operations start lowercase, are not numeric, are not `*Request` or
/// `*Response` messages, and have an object or array definition.
pub fn is_operation(name: &str, node: &Value) -> bool {
    let Some(first) = name.chars().next() else {
        return false;
    };
    if !first.is_lowercase() || name.chars().all(|c| c.is_ascii_digit()) {
        return false;
    }

    let lower = name.to_lowercase();
    if lower.ends_with("response") || lower.ends_with("request") {
        return false;
    }

    node.is_object() || node.is_array()
}

/// Path after [`URL_PREFIX`]: `[Internal-]<lib>-<version>-<service>/<op>`
pub fn endpoint_path(library: &str, version: &str, service: &str, operation: &str, internal: bool) -> String {
    let path = format!("{}-{}-{}/{}", library, version, service, operation);
    if internal {
        format!("Internal-{}", path)
    } else {
        path
    }
}

pub fn request_url(library: &str, version: &str, service: &str, operation: &str, internal: bool) -> String {
    format!(
        "{}{}",
        URL_PREFIX,
        endpoint_path(library, version, service, operation, internal)
    )
}

/// `http://teamcenter.com/Schemas/<lib>/<version>/<service>.<Op>Response`
pub fn response_qname(library: &str, version: &str, service: &str, operation: &str) -> String {
    format!(
        "{}{}/{}/{}.{}Response",
        QNAME_PREFIX,
        library,
        version,
        service,
        capitalize(operation)
    )
}

fn capitalize(name: &str) -> String {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

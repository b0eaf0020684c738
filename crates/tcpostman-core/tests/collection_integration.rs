//! End-to-end generation from a structure file to a Postman collection

use chrono::NaiveDate;
use pretty_assertions::assert_eq;
use serde_json::{json, Value};
use std::io::Write;
use std::path::Path;
use tcpostman_core::{
    default_header, generate_collection, load_structure, Collection, Error, GenerationOptions,
    RequestItem, Variables, COLLECTION_SCHEMA,
};
use tcpostman_schemas::SchemaTree;

const STRUCTURE_JS: &str = r#"
var structure = {
    "Teamcenter": {
        "Soa": {
            "Core": {
                "_2011_06": {
                    "Session": {
                        "login": {
                            "description": "<p>Log in.</p>",
                            "input": {
                                "credentials": {"type": "Teamcenter::Soa::Core::_2011_06::Session::Credentials"}
                            },
                            "output": {
                                "partialErrors": {"type": "Teamcenter::Soa::Server::PartialErrors"}
                            }
                        },
                        "loginResponse": {},
                        "Credentials": {
                            "user": {"type": "std::string"},
                            "password": {"type": "std::string"}
                        }
                    }
                }
            },
            "Internal": {
                "Core": {
                    "_2011_06": {
                        "Session": {
                            "peek": {"input": {}}
                        }
                    }
                }
            }
        }
    },
    "Cpd": {
        "Soa": {
            "Core": {
                "_2012_02": {
                    "Session": {
                        "logout": {}
                    }
                }
            }
        }
    }
};
"#;

fn fixture_tree() -> SchemaTree {
    let mut file = tempfile::Builder::new().suffix(".js").tempfile().unwrap();
    file.write_all(STRUCTURE_JS.as_bytes()).unwrap();
    load_structure(file.path()).unwrap()
}

fn options() -> GenerationOptions {
    let at = NaiveDate::from_ymd_opt(2024, 3, 7)
        .unwrap()
        .and_hms_opt(9, 5, 1)
        .unwrap();
    GenerationOptions::new(at)
}

fn request<'a>(collection: &'a Collection, name: &str) -> &'a RequestItem {
    collection
        .requests()
        .into_iter()
        .find(|r| r.name == name)
        .unwrap()
}

fn request_names(collection: &Collection, path: &[&str]) -> Vec<String> {
    let folder = collection.folder(path).unwrap();
    folder
        .item
        .iter()
        .filter_map(|item| match item {
            tcpostman_core::Item::Request(r) => Some(r.name.clone()),
            tcpostman_core::Item::Folder(_) => None,
        })
        .collect()
}

#[cfg(test)]
mod layout {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_folders_per_library_service_and_version() {
        let generated = generate_collection(&fixture_tree(), &options()).unwrap();
        let collection = &generated.collection;

        assert_eq!(collection.info.name, "Teamcenter REST API (2024-03-07 09:05:01)");
        assert_eq!(collection.info.schema, COLLECTION_SCHEMA);
        assert_eq!(collection.item.len(), 1);

        assert_eq!(
            request_names(collection, &["Core", "Services", "Session", "2011-06"]),
            vec!["login"]
        );
        assert_eq!(
            request_names(collection, &["Core", "Services", "Session", "2012-02 (Cpd)"]),
            vec!["logout"]
        );
    }

    #[test]
    fn test_stats() {
        let generated = generate_collection(&fixture_tree(), &options()).unwrap();
        assert_eq!(generated.stats.templates, 2);
        assert_eq!(generated.stats.libraries, 2);
        assert_eq!(generated.stats.internal_libraries, 0);
        assert_eq!(generated.stats.operations, 2);
    }

    #[test]
    fn test_variables_are_carried() {
        let variables = Variables {
            tcurl: "https://plm.example.com".to_string(),
            ..Variables::default()
        };
        let generated = generate_collection(&fixture_tree(), &options().with_variables(variables)).unwrap();
        let first = &generated.collection.variable[0];
        assert_eq!(first.key, "TCURL");
        assert_eq!(first.value, "https://plm.example.com");
    }
}

#[cfg(test)]
mod requests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_login_request() {
        let generated = generate_collection(&fixture_tree(), &options()).unwrap();
        let login = request(&generated.collection, "login");

        assert!(!login.internal);
        assert_eq!(login.request.method, "POST");
        assert_eq!(
            login.request.url,
            "{{TCURL}}:{{TCURL_WEBTIER_PORT}}/{{WEBTIER_APP_NAME}}/JsonRestServices/Core-2011-06-Session/login"
        );

        let body: Value = serde_json::from_str(&login.request.body.raw).unwrap();
        assert_eq!(
            body,
            json!({
                "header": default_header(),
                "body": {"credentials": {"user": "", "password": ""}}
            })
        );
    }

    #[test]
    fn test_login_description_and_example() {
        let generated = generate_collection(&fixture_tree(), &options()).unwrap();
        let login = request(&generated.collection, "login");

        let description = login.request.description.as_deref().unwrap();
        assert!(description.starts_with("Log in.\n\n### Body fields"));
        assert!(description.contains("`credentials.user`"));

        let example: Value = serde_json::from_str(&login.response[0].body).unwrap();
        assert_eq!(
            example,
            json!({
                ".QName": "http://teamcenter.com/Schemas/Core/2011-06/Session.LoginResponse",
                "PartialErrors": {}
            })
        );
    }

    #[test]
    fn test_operation_without_input() {
        let generated = generate_collection(&fixture_tree(), &options()).unwrap();
        let logout = request(&generated.collection, "logout");

        let body: Value = serde_json::from_str(&logout.request.body.raw).unwrap();
        assert_eq!(body["body"], json!({}));
        assert!(logout
            .request
            .description
            .as_deref()
            .unwrap()
            .contains("### Body fields"));
    }

    #[test]
    fn test_custom_header() {
        let header = json!({"state": {"stateless": false}});
        let opts = options().with_header(header.clone()).unwrap();
        let generated = generate_collection(&fixture_tree(), &opts).unwrap();

        for item in generated.collection.requests() {
            let body: Value = serde_json::from_str(&item.request.body.raw).unwrap();
            assert_eq!(body["header"], header);
        }
    }
}

#[cfg(test)]
mod internal {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_internal_excluded_by_default() {
        let generated = generate_collection(&fixture_tree(), &options()).unwrap();
        assert!(generated.collection.requests().iter().all(|r| !r.internal));
    }

    #[test]
    fn test_internal_included_on_request() {
        let opts = options().with_include_internal(true);
        let generated = generate_collection(&fixture_tree(), &opts).unwrap();
        assert_eq!(generated.stats.internal_libraries, 1);

        assert_eq!(
            request_names(&generated.collection, &["Core", "Services", "Session", "2011-06"]),
            vec!["login", "peek"]
        );

        let peek = request(&generated.collection, "peek");
        assert!(peek.internal);
        assert!(peek.request.url.ends_with("/Internal-Core-2011-06-Session/peek"));
        assert!(peek
            .request
            .description
            .as_deref()
            .unwrap()
            .starts_with("**Internal:** true"));
    }

    #[test]
    fn test_internal_flag_serialized() {
        let opts = options().with_include_internal(true);
        let generated = generate_collection(&fixture_tree(), &opts).unwrap();
        let text = generated.collection.to_json(true).unwrap();
        let value: Value = serde_json::from_str(&text).unwrap();

        let session = &value["item"][0]["item"][0]["item"][0]["item"][0];
        assert_eq!(session["name"], "2011-06");
        assert_eq!(session["item"][1]["name"], "peek");
        assert_eq!(session["item"][1]["_internal"], true);
    }
}

#[test]
fn test_missing_structure_file() {
    let err = load_structure(Path::new("/nonexistent/structure.js")).unwrap_err();
    assert!(matches!(err, Error::Loader { .. }));
    assert!(err.to_string().starts_with("Failed to load structure"));
}

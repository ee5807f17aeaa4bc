//! Saved request lookup
//!
//! An identifier such as `mysite.posts.1` names the namespace `mysite` and
//! the entry `posts.1` inside `mysite.requests`. The entry is merged into the
//! command-line draft and then built like any other request.

use std::collections::BTreeMap;

use serde::Deserialize;
use serde_yaml::Value;

use crate::config::RequestStore;
use crate::error::{Error, Result};
use crate::headers::canonical_key;
use crate::models::{scalar, scalar_map, RequestSpec};
use crate::request::{build, OutboundRequest};

/// A saved request entry: a bare URL or a `{url, body, header}` map.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SavedRequest {
    Simple(String),
    Detailed {
        url: String,
        body: String,
        header: BTreeMap<String, String>,
    },
}

#[derive(Default, Deserialize)]
#[serde(default)]
struct DetailedFields {
    #[serde(deserialize_with = "scalar")]
    url: String,
    #[serde(deserialize_with = "scalar")]
    body: String,
    #[serde(deserialize_with = "scalar_map")]
    header: BTreeMap<String, String>,
}

impl SavedRequest {
    /// Decodes a raw document value, rejecting any shape other than a
    /// string or a map.
    pub fn from_value(name: &str, value: &Value) -> Result<Self> {
        let shape_error = |reason: String| Error::SavedRequestShape {
            name: name.to_string(),
            reason,
        };

        match value {
            Value::String(url) => Ok(SavedRequest::Simple(url.clone())),
            Value::Mapping(_) => {
                let fields: DetailedFields = serde_yaml::from_value(value.clone())
                    .map_err(|e| shape_error(e.to_string()))?;
                if fields.url.is_empty() {
                    return Err(shape_error("missing url".to_string()));
                }
                Ok(SavedRequest::Detailed {
                    url: fields.url,
                    body: fields.body,
                    header: fields.header,
                })
            }
            other => Err(shape_error(format!(
                "expected a url or a map with url/body/header, got {:?}",
                other
            ))),
        }
    }

    pub fn url(&self) -> &str {
        match self {
            SavedRequest::Simple(url) => url,
            SavedRequest::Detailed { url, .. } => url,
        }
    }
}

fn is_empty_value(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::String(s) => s.is_empty(),
        _ => false,
    }
}

/// Completes `overrides` from the saved request named by `identifier` and
/// builds it.
///
/// The namespace auth block applies only when no auth type was given on the
/// command line. Command-line headers win over the entry's own headers, and
/// a command-line body wins over the saved body.
pub fn resolve(
    identifier: &str,
    mut overrides: RequestSpec,
    store: &RequestStore,
) -> Result<OutboundRequest> {
    let mut segments = identifier.split('.');
    let namespace = segments.next().unwrap_or_default();
    let entry_path = segments.collect::<Vec<_>>().join(".");
    let lookup = format!("{}.requests.{}", namespace, entry_path);

    if let Some(auth) = store.namespace_auth(namespace)? {
        if overrides.auth_type.is_empty() {
            overrides.credential = auth.credential_with(|name| std::env::var(name).ok());
            overrides.auth_type = auth.auth_type;
        }
    }

    let value = match store.get(&lookup) {
        Some(value) if !is_empty_value(value) => value,
        _ => return Err(Error::SavedRequestNotFound(identifier.to_string())),
    };
    let saved = SavedRequest::from_value(identifier, value)?;
    tracing::info!(identifier, url = saved.url(), "resolved saved request");

    match saved {
        SavedRequest::Simple(url) => overrides.url = url,
        SavedRequest::Detailed { url, body, header } => {
            let mut headers: Vec<String> = header
                .iter()
                .map(|(key, value)| format!("{}:{}", canonical_key(key), value))
                .collect();
            headers.append(&mut overrides.headers);
            overrides.headers = headers;
            overrides.url = url;
            if overrides.body.is_empty() {
                overrides.body = body;
            }
        }
    }

    build(overrides)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::headers::AUTHORIZATION;
    use crate::models::HttpMethod;

    const DOC: &str = r#"
testspace:
  auth:
    authtype: Bearer
    token: ABC-456
  requests:
    posts:
      1: https://mysite.com/posts/1
      all:
        url: https://mysite.com/posts/
        body: '{"userId": 27}'
        header:
          accept: text/plain,text/html
          x-custom-thing: yes-please
    empty: ""
    broken: [1, 2]

testspace2:
  auth:
    authtype: Password
    username: joe
    password: $RESOLVE_SAVED_SECRET_TEST
  requests:
    users: https://mysite.com/users/

plain:
  requests:
    site: https://plain.test
"#;

    fn store() -> RequestStore {
        RequestStore::from_yaml(DOC).unwrap()
    }

    fn draft(identifier: &str) -> RequestSpec {
        RequestSpec::new(HttpMethod::GET, identifier)
    }

    #[test]
    fn test_resolve_nested_with_namespace_token() {
        let req = resolve("testspace.posts.1", draft("testspace.posts.1"), &store()).unwrap();
        assert_eq!(req.url, "https://mysite.com/posts/1");
        assert_eq!(req.headers.get(AUTHORIZATION), Some("Bearer ABC-456"));
        assert_eq!(req.body, None);
    }

    #[test]
    fn test_resolve_namespace_password_from_env() {
        std::env::set_var("RESOLVE_SAVED_SECRET_TEST", "hunter2");
        let req = resolve("testspace2.users", draft("testspace2.users"), &store()).unwrap();
        std::env::remove_var("RESOLVE_SAVED_SECRET_TEST");

        assert_eq!(req.url, "https://mysite.com/users/");
        assert_eq!(
            req.headers.get(AUTHORIZATION),
            Some("Basic am9lOmh1bnRlcjI=")
        );
    }

    #[test]
    fn test_resolve_without_auth_block() {
        let req = resolve("plain.site", draft("plain.site"), &store()).unwrap();
        assert_eq!(req.url, "https://plain.test");
        assert_eq!(req.headers.len(), 2);
    }

    #[test]
    fn test_resolve_not_found() {
        let err = resolve("not.a.real.request", draft("x"), &store()).unwrap_err();
        assert!(matches!(err, Error::SavedRequestNotFound(ref id) if id == "not.a.real.request"));

        let err = resolve("testspace.empty", draft("x"), &store()).unwrap_err();
        assert!(matches!(err, Error::SavedRequestNotFound(_)));

        let err = resolve("testspace", draft("x"), &store()).unwrap_err();
        assert!(matches!(err, Error::SavedRequestNotFound(_)));

        let err = resolve("any.thing", draft("x"), &RequestStore::default()).unwrap_err();
        assert!(matches!(err, Error::SavedRequestNotFound(_)));
    }

    #[test]
    fn test_resolve_rejects_other_shapes() {
        let err = resolve("testspace.broken", draft("x"), &store()).unwrap_err();
        assert!(matches!(err, Error::SavedRequestShape { ref name, .. } if name == "testspace.broken"));
    }

    #[test]
    fn test_resolve_detailed_entry() {
        let req = resolve("testspace.posts.all", draft("x"), &store()).unwrap();
        assert_eq!(req.url, "https://mysite.com/posts/");
        assert_eq!(req.body.as_deref(), Some(r#"{"userId": 27}"#));
        assert_eq!(req.headers.get("Accept"), Some("text/plain,text/html"));
        assert_eq!(req.headers.get("X-Custom-Thing"), Some("yes-please"));
    }

    #[test]
    fn test_overrides_win() {
        let overrides = RequestSpec {
            auth_type: "Token".to_string(),
            credential: "mine".to_string(),
            headers: vec!["Accept:application/xml".to_string()],
            body: "override".to_string(),
            ..draft("x")
        };
        let req = resolve("testspace.posts.all", overrides, &store()).unwrap();
        assert_eq!(req.headers.get(AUTHORIZATION), Some("Token mine"));
        assert_eq!(req.headers.get("Accept"), Some("application/xml"));
        assert_eq!(req.body.as_deref(), Some("override"));
    }

    #[test]
    fn test_params_appended_to_saved_url() {
        let overrides = RequestSpec {
            params: "?page=2".to_string(),
            ..draft("x")
        };
        let req = resolve("testspace.posts.1", overrides, &store()).unwrap();
        assert_eq!(req.url, "https://mysite.com/posts/1?page=2");
    }

    #[test]
    fn test_resolve_is_idempotent() {
        let store = store();
        let first = resolve("testspace.posts.all", draft("x"), &store).unwrap();
        let second = resolve("testspace.posts.all", draft("x"), &store).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_numeric_values_read_as_text() {
        let store = RequestStore::from_yaml(
            r#"
numpass:
  auth:
    authtype: Password
    username: joe
    password: 123456
  requests:
    a: https://mysite.com/a
numtoken:
  auth:
    authtype: Bearer
    token: 987654321
  requests:
    a:
      url: https://mysite.com/a
      header:
        x-count: 5
        x-enabled: true
"#,
        )
        .unwrap();

        let req = resolve("numpass.a", draft("x"), &store).unwrap();
        assert_eq!(
            req.headers.get(AUTHORIZATION),
            Some("Basic am9lOjEyMzQ1Ng==")
        );

        let req = resolve("numtoken.a", draft("x"), &store).unwrap();
        assert_eq!(req.headers.get(AUTHORIZATION), Some("Bearer 987654321"));
        assert_eq!(req.headers.get("X-Count"), Some("5"));
        assert_eq!(req.headers.get("X-Enabled"), Some("true"));
    }

    #[test]
    fn test_nested_header_value_is_a_shape_error() {
        let store = RequestStore::from_yaml(
            "ns:\n  requests:\n    a:\n      url: https://a.test\n      header:\n        x-list: [1, 2]\n",
        )
        .unwrap();
        let err = resolve("ns.a", draft("x"), &store).unwrap_err();
        assert!(matches!(err, Error::SavedRequestShape { .. }));
    }

    #[test]
    fn test_saved_request_from_value() {
        let value = Value::String("https://a.test".to_string());
        assert_eq!(
            SavedRequest::from_value("a", &value).unwrap(),
            SavedRequest::Simple("https://a.test".to_string())
        );

        let value: Value = serde_yaml::from_str("body: hi").unwrap();
        assert!(SavedRequest::from_value("a", &value).is_err());

        let value: Value = serde_yaml::from_str("42").unwrap();
        assert!(SavedRequest::from_value("a", &value).is_err());
    }
}

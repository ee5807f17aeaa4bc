//! Saved requests document (`requests.yaml`)
//!
//! ```yaml
//! mysite:
//!   auth:
//!     authtype: Bearer
//!     token: $MYSITE_TOKEN
//!   requests:
//!     users: https://mysite.com/users/
//!     posts:
//!       all:
//!         url: https://mysite.com/posts/
//!         body: '{"userId": 27}'
//!         header:
//!           accept: text/plain
//! ```
//!
//! Keys are matched case-insensitively by dot-joined path.

use std::path::Path;

use serde::de::DeserializeOwned;
use serde_yaml::{Mapping, Value};

use crate::error::Result;
use crate::models::AuthBlock;

/// Read-only key-value tree of saved requests.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RequestStore {
    root: Value,
}

impl RequestStore {
    /// Loads the document. A missing file is an empty store; absence is
    /// reported later as an unknown key.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        match std::fs::read_to_string(path.as_ref()) {
            Ok(content) => Self::from_yaml(&content),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!(path = %path.as_ref().display(), "no saved requests file");
                Ok(Self::default())
            }
            Err(e) => Err(e.into()),
        }
    }

    pub fn from_yaml(content: &str) -> Result<Self> {
        let root: Value = serde_yaml::from_str(content)?;
        Ok(RequestStore {
            root: lowercase_keys(root),
        })
    }

    /// Raw value at a dot-joined path, if present.
    pub fn get(&self, path: &str) -> Option<&Value> {
        path.split('.').try_fold(&self.root, |node, segment| {
            let segment = segment.to_lowercase();
            node.as_mapping()?
                .iter()
                .find(|(key, _)| key_string(key).as_deref() == Some(segment.as_str()))
                .map(|(_, value)| value)
        })
    }

    /// Decodes the value at a path into a typed record.
    pub fn decode<T: DeserializeOwned>(&self, path: &str) -> Result<Option<T>> {
        match self.get(path) {
            Some(value) => Ok(Some(serde_yaml::from_value(value.clone())?)),
            None => Ok(None),
        }
    }

    /// The auth block shared by every request in a namespace.
    pub fn namespace_auth(&self, namespace: &str) -> Result<Option<AuthBlock>> {
        self.decode(&format!("{}.auth", namespace))
    }
}

fn key_string(key: &Value) -> Option<String> {
    match key {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

fn lowercase_keys(value: Value) -> Value {
    match value {
        Value::Mapping(mapping) => Value::Mapping(
            mapping
                .into_iter()
                .map(|(key, value)| {
                    let key = match key {
                        Value::String(s) => Value::String(s.to_lowercase()),
                        other => other,
                    };
                    (key, lowercase_keys(value))
                })
                .collect::<Mapping>(),
        ),
        other => other,
    }
}

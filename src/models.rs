use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Deserializer};
use serde_yaml::Value;

use crate::error::{Error, Result};

/// HTTP Method enum
#[allow(clippy::upper_case_acronyms)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum HttpMethod {
    #[default]
    GET,
    POST,
    PUT,
    PATCH,
    DELETE,
}

impl HttpMethod {
    pub fn as_str(&self) -> &str {
        match self {
            HttpMethod::GET => "GET",
            HttpMethod::POST => "POST",
            HttpMethod::PUT => "PUT",
            HttpMethod::PATCH => "PATCH",
            HttpMethod::DELETE => "DELETE",
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<HttpMethod> for reqwest::Method {
    fn from(method: HttpMethod) -> Self {
        match method {
            HttpMethod::GET => reqwest::Method::GET,
            HttpMethod::POST => reqwest::Method::POST,
            HttpMethod::PUT => reqwest::Method::PUT,
            HttpMethod::PATCH => reqwest::Method::PATCH,
            HttpMethod::DELETE => reqwest::Method::DELETE,
        }
    }
}

/// Authentication scheme. `Basic` is accepted as a synonym for `Password`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum AuthType {
    #[default]
    None,
    Password,
    Bearer,
    Token,
}

impl AuthType {
    /// Validates a raw auth type as written on the command line or in the
    /// saved requests document.
    pub fn parse(raw: &str) -> Result<Self> {
        match raw {
            "" => Ok(AuthType::None),
            "Password" | "Basic" => Ok(AuthType::Password),
            "Bearer" => Ok(AuthType::Bearer),
            "Token" => Ok(AuthType::Token),
            other => Err(Error::InvalidAuthType(other.to_string())),
        }
    }
}

/// Mutable draft of one outbound request, built from command line overrides
/// and optionally completed from a saved request.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RequestSpec {
    pub url: String,
    pub method: HttpMethod,
    /// Raw auth type; validated when headers are composed
    pub auth_type: String,
    /// Token, or `username:password` for Password auth
    pub credential: String,
    /// `key:value` entries in the order given
    pub headers: Vec<String>,
    /// Appended verbatim to the URL
    pub params: String,
    pub body: String,
}

impl RequestSpec {
    pub fn new(method: HttpMethod, url: impl Into<String>) -> Self {
        RequestSpec {
            method,
            url: url.into(),
            ..Default::default()
        }
    }

    /// Replaces the body with the contents of a file.
    pub fn body_from_file(&mut self, path: impl AsRef<std::path::Path>) -> std::io::Result<()> {
        self.body = std::fs::read_to_string(path)?;
        Ok(())
    }
}

/// Auth block shared by every saved request in a namespace. Any field may
/// be a `$NAME` environment indirection.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct AuthBlock {
    #[serde(rename = "authtype", deserialize_with = "scalar")]
    pub auth_type: String,
    #[serde(deserialize_with = "scalar")]
    pub token: String,
    #[serde(deserialize_with = "scalar")]
    pub username: String,
    #[serde(deserialize_with = "scalar")]
    pub password: String,
}

fn scalar_string(value: Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Null => Some(String::new()),
        _ => None,
    }
}

/// Reads a string, number or bool as text (`password: 123456`).
pub(crate) fn scalar<'de, D>(deserializer: D) -> std::result::Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    scalar_string(Value::deserialize(deserializer)?).ok_or_else(|| {
        <D::Error as serde::de::Error>::custom("expected a string, number or bool")
    })
}

/// Reads a map whose values may be strings, numbers or bools.
pub(crate) fn scalar_map<'de, D>(
    deserializer: D,
) -> std::result::Result<BTreeMap<String, String>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<BTreeMap<String, Value>>::deserialize(deserializer)?.unwrap_or_default();
    raw.into_iter()
        .map(|(key, value)| match scalar_string(value) {
            Some(text) => Ok((key, text)),
            None => Err(<D::Error as serde::de::Error>::custom(format!(
                "value of `{}` must be a string, number or bool",
                key
            ))),
        })
        .collect()
}

/// Auth scheme plus the final credentials, after environment resolution.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ResolvedAuth {
    pub auth_type: AuthType,
    pub username: String,
    pub password: String,
    pub token: String,
}

impl ResolvedAuth {
    /// Derives auth from a raw type and a literal credential. Password
    /// credentials are split on the first colon.
    pub fn from_credential(auth_type: &str, credential: &str) -> Result<Self> {
        let auth_type = AuthType::parse(auth_type)?;
        let mut auth = ResolvedAuth {
            auth_type,
            ..Default::default()
        };
        match auth_type {
            AuthType::None => {}
            AuthType::Password => {
                let (username, password) = credential
                    .split_once(':')
                    .ok_or(Error::MalformedCredential)?;
                auth.username = username.to_string();
                auth.password = password.to_string();
            }
            AuthType::Bearer | AuthType::Token => auth.token = credential.to_string(),
        }
        Ok(auth)
    }
}

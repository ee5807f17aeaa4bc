//! Header mapping and composition
//!
//! Keys are stored in canonical form (`content-type` becomes `Content-Type`),
//! so two spellings of the same header can never coexist.

use std::collections::BTreeMap;

use reqwest::header::{HeaderMap, HeaderName, HeaderValue};

use crate::auth::authorization_value;
use crate::constants::{DEFAULT_ACCEPT, DEFAULT_CONTENT_TYPE};
use crate::error::{Error, Result};
use crate::models::ResolvedAuth;

pub const AUTHORIZATION: &str = "Authorization";
pub const CONTENT_TYPE: &str = "Content-Type";
pub const ACCEPT: &str = "Accept";

/// Canonical MIME form of a header name: first letter and every letter
/// after a hyphen upper-cased, the rest lower-cased. Names containing
/// characters outside the token set are returned unchanged.
pub fn canonical_key(key: &str) -> String {
    if key.is_empty() || !key.bytes().all(is_token_byte) {
        return key.to_string();
    }

    let mut upper = true;
    key.chars()
        .map(|c| {
            let out = if upper {
                c.to_ascii_uppercase()
            } else {
                c.to_ascii_lowercase()
            };
            upper = c == '-';
            out
        })
        .collect()
}

fn is_token_byte(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b"!#$%&'*+-.^_`|~".contains(&b)
}

/// Ordered header mapping with canonical keys, last write wins.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Headers(BTreeMap<String, String>);

impl Headers {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, key: &str, value: impl Into<String>) {
        self.0.insert(canonical_key(key), value.into());
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(&canonical_key(key)).map(String::as_str)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.0.contains_key(&canonical_key(key))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Converts to the HTTP layer's map, rejecting names or values it cannot
    /// carry.
    pub fn to_header_map(&self) -> Result<HeaderMap> {
        let mut map = HeaderMap::with_capacity(self.0.len());
        for (key, value) in &self.0 {
            let name = HeaderName::from_bytes(key.as_bytes())
                .map_err(|_| Error::InvalidHeader(key.clone()))?;
            let value = HeaderValue::from_str(value)
                .map_err(|_| Error::InvalidHeader(format!("{}:{}", key, value)))?;
            map.insert(name, value);
        }
        Ok(map)
    }
}

/// Parses one `key:value` entry. The entry must split into exactly two
/// colon-separated parts with a non-empty key.
pub fn parse_entry(entry: &str) -> Result<(String, String)> {
    let parts: Vec<&str> = entry.split(':').collect();
    match parts.as_slice() {
        [key, value] if !key.trim().is_empty() => {
            Ok((key.trim().to_string(), value.trim().to_string()))
        }
        _ => Err(Error::MalformedHeader(entry.to_string())),
    }
}

/// Merges explicit headers, defaults and the synthesized auth header.
///
/// Explicit entries are applied first (last write wins), then
/// `Content-Type` and `Accept` defaults fill any gap. An explicit
/// `Authorization` always beats the one derived from `auth`.
pub fn compose(explicit: &[String], auth: &ResolvedAuth) -> Result<Headers> {
    let mut headers = Headers::new();

    for entry in explicit {
        let (key, value) = parse_entry(entry)?;
        headers.insert(&key, value);
    }

    if !headers.contains(CONTENT_TYPE) {
        headers.insert(CONTENT_TYPE, DEFAULT_CONTENT_TYPE);
    }
    if !headers.contains(ACCEPT) {
        headers.insert(ACCEPT, DEFAULT_ACCEPT);
    }

    if headers.contains(AUTHORIZATION) {
        return Ok(headers);
    }

    if let Some(value) = authorization_value(auth) {
        headers.insert(AUTHORIZATION, value);
    }

    Ok(headers)
}

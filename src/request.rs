//! Outbound request assembly

use std::sync::OnceLock;

use regex::Regex;

use crate::error::{Error, Result};
use crate::headers::{compose, Headers};
use crate::models::{HttpMethod, RequestSpec, ResolvedAuth};

/// A fully-formed request, ready to execute.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OutboundRequest {
    pub method: HttpMethod,
    pub url: String,
    pub headers: Headers,
    /// `None` sends no body at all
    pub body: Option<String>,
}

/// True when the identifier is a URL rather than a saved request name.
pub fn is_literal_url(identifier: &str) -> bool {
    static LITERAL_URL: OnceLock<Option<Regex>> = OnceLock::new();
    LITERAL_URL
        .get_or_init(|| Regex::new(r"^(?:https?://|www\.)").ok())
        .as_ref()
        .is_some_and(|re| re.is_match(identifier))
}

/// Builds the outbound request from a fully merged spec.
///
/// `params` is appended to the URL as-is; the caller supplies any leading
/// `?` or `/`.
pub fn build(spec: RequestSpec) -> Result<OutboundRequest> {
    let url = format!("{}{}", spec.url, spec.params);
    let body = if spec.body.is_empty() {
        None
    } else {
        Some(spec.body)
    };

    let auth =
        ResolvedAuth::from_credential(&spec.auth_type, &spec.credential).map_err(Error::building)?;
    let headers = compose(&spec.headers, &auth).map_err(Error::building)?;
    headers.to_header_map().map_err(Error::building)?;

    tracing::debug!(method = %spec.method, url = %url, headers = headers.len(), "built request");

    Ok(OutboundRequest {
        method: spec.method,
        url,
        headers,
        body,
    })
}

//! Response layouts: raw, basic and pretty

use std::fmt::{self, Write};
use std::str::FromStr;

use crate::constants::MASKED_VALUE;
use crate::error::Error;
use crate::headers::{Headers, AUTHORIZATION};
use crate::response::CapturedResponse;

/// Output layout.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Format {
    /// Response header block followed by the body, nothing else
    Raw,
    /// Status line followed by the body
    Basic,
    /// Request summary, status, body and any accumulated errors
    #[default]
    Pretty,
}

impl FromStr for Format {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Error> {
        match s {
            "raw" => Ok(Format::Raw),
            "basic" => Ok(Format::Basic),
            "pretty" | "" => Ok(Format::Pretty),
            other => Err(Error::UnknownFormat(other.to_string())),
        }
    }
}

impl Format {
    /// Format named in settings; anything unrecognised renders pretty.
    pub fn from_setting(value: &str) -> Self {
        value.parse().unwrap_or_else(|e: Error| {
            tracing::warn!(error = %e, "falling back to pretty output");
            Format::Pretty
        })
    }
}

/// Renders the response in the given layout. A formatting failure is added
/// to the response's errors and the error summary is returned in place of
/// the layout.
pub fn render(format: Format, res: &mut CapturedResponse) -> String {
    let rendered = match format {
        Format::Raw => render_raw(res),
        Format::Basic => render_basic(res),
        Format::Pretty => render_pretty(res),
    };

    match rendered {
        Ok(text) => text,
        Err(e) => {
            res.add_error(format!("error rendering {:?} output: {}", format, e));
            res.error_summary()
        }
    }
}

/// Header lines sorted by name, `Name: value\r\n` each, then the body.
pub fn render_raw(res: &CapturedResponse) -> Result<String, fmt::Error> {
    let mut headers: Vec<&(String, String)> = res.headers.iter().collect();
    headers.sort_by(|a, b| a.0.cmp(&b.0));

    let mut out = String::new();
    for (key, value) in headers {
        let value = value.replace(['\r', '\n'], " ");
        write!(out, "{}: {}\r\n", key, value.trim())?;
    }
    out.write_str(&res.body)?;
    Ok(out)
}

pub fn render_basic(res: &CapturedResponse) -> Result<String, fmt::Error> {
    let mut out = String::new();
    writeln!(out, "Status Code: {}", res.status_code())?;
    writeln!(out, "{}", res.body)?;
    Ok(out)
}

pub fn render_pretty(res: &CapturedResponse) -> Result<String, fmt::Error> {
    let req = &res.request;
    let mut out = String::new();

    writeln!(out, "---| Request: {} --- url={}", req.method, req.url)?;
    writeln!(
        out,
        "   | Request Header:  {} |---",
        headers_for_print(&req.headers)
    )?;
    writeln!(
        out,
        "---| Response --- Status Code: {} |---",
        res.status_code()
    )?;
    writeln!(out, "{}", res.body)?;
    writeln!(out, " ---| End Response |---")?;

    if res.has_errors() {
        write!(out, "\nErrors:\n{}", res.error_summary())?;
    }
    Ok(out)
}

/// `- Key: [value] -` per header, with the `Authorization` value masked.
pub fn headers_for_print(headers: &Headers) -> String {
    headers
        .iter()
        .map(|(key, value)| {
            if key == AUTHORIZATION {
                format!("- {}: {} -", key, MASKED_VALUE)
            } else {
                format!("- {}: [{}] -", key, value)
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::HttpMethod;
    use crate::request::OutboundRequest;

    fn response() -> CapturedResponse {
        let mut headers = Headers::new();
        headers.insert("accept", "text/plain");
        headers.insert("authorization", "Bearer ABC-123");

        let mut res = CapturedResponse::new(OutboundRequest {
            method: HttpMethod::GET,
            url: "https://mysite.com/posts/1".to_string(),
            headers,
            body: None,
        });
        res.status = Some(200);
        res.headers = vec![
            ("Content-Type".to_string(), "text/plain".to_string()),
            ("Content-Length".to_string(), "6".to_string()),
        ];
        res.body = "Hello\n".to_string();
        res
    }

    #[test]
    fn test_format_parse() {
        assert_eq!("raw".parse::<Format>().unwrap(), Format::Raw);
        assert_eq!("basic".parse::<Format>().unwrap(), Format::Basic);
        assert_eq!("".parse::<Format>().unwrap(), Format::Pretty);
        assert!("fancy".parse::<Format>().is_err());
        assert_eq!(Format::from_setting("fancy"), Format::Pretty);
    }

    #[test]
    fn test_headers_for_print() {
        let mut headers = Headers::new();
        headers.insert("Test", "header");
        assert_eq!(headers_for_print(&headers), "- Test: [header] -");

        let mut headers = Headers::new();
        headers.insert("Authorization", "Bearer ABC-123");
        assert_eq!(headers_for_print(&headers), "- Authorization: [******] -");
    }

    #[test]
    fn test_render_basic() {
        let mut res = response();
        assert_eq!(
            render(Format::Basic, &mut res),
            "Status Code: 200\nHello\n\n"
        );
    }

    #[test]
    fn test_render_raw() {
        let mut res = response();
        let out = render(Format::Raw, &mut res);
        assert_eq!(
            out,
            "Content-Length: 6\r\nContent-Type: text/plain\r\nHello\n"
        );
    }

    #[test]
    fn test_render_raw_ignores_errors() {
        let mut res = response();
        res.add_error("boom");
        assert!(!render(Format::Raw, &mut res).contains("boom"));
    }

    #[test]
    fn test_render_pretty() {
        let mut res = response();
        let out = render(Format::Pretty, &mut res);
        let mut lines = out.lines();
        assert_eq!(
            lines.next(),
            Some("---| Request: GET --- url=https://mysite.com/posts/1")
        );
        assert_eq!(
            lines.next(),
            Some("   | Request Header:  - Accept: [text/plain] -- Authorization: [******] - |---")
        );
        assert_eq!(
            lines.next(),
            Some("---| Response --- Status Code: 200 |---")
        );
        assert!(!out.contains("ABC-123"));
        assert!(!out.contains("Errors:"));
        assert!(out.ends_with(" ---| End Response |---\n"));
    }

    #[test]
    fn test_render_pretty_with_errors() {
        let mut res = response();
        res.status = None;
        res.body.clear();
        res.add_error("Connection failed: refused");
        res.add_error("second");

        let out = render(Format::Pretty, &mut res);
        assert!(out.contains("Status Code: 0 |---"));
        assert!(out.ends_with("\nErrors:\n1: Connection failed: refused\n2: second\n"));
    }
}

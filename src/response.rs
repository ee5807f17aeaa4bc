//! Captured response plus the errors gathered while producing it

use std::fmt::{self, Write};

use crate::request::OutboundRequest;

/// Outcome of one execution. A transport failure leaves `status` unset and
/// records the failure in `errors`; rendering still happens.
#[derive(Clone, Debug)]
pub struct CapturedResponse {
    pub request: OutboundRequest,
    pub status: Option<u16>,
    /// Canonical header names in the order received
    pub headers: Vec<(String, String)>,
    pub body: String,
    errors: Vec<String>,
}

impl CapturedResponse {
    pub fn new(request: OutboundRequest) -> Self {
        CapturedResponse {
            request,
            status: None,
            headers: Vec::new(),
            body: String::new(),
            errors: Vec::new(),
        }
    }

    pub fn add_error(&mut self, err: impl fmt::Display) {
        self.errors.push(err.to_string());
    }

    pub fn errors(&self) -> &[String] {
        &self.errors
    }

    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    /// Status code, `0` when no response arrived.
    pub fn status_code(&self) -> u16 {
        self.status.unwrap_or_default()
    }

    /// Errors numbered from 1, one per line.
    pub fn error_summary(&self) -> String {
        let mut out = String::new();
        for (i, err) in self.errors.iter().enumerate() {
            let _ = writeln!(out, "{}: {}", i + 1, err);
        }
        out
    }
}

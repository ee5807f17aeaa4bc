//! # reqkit
//!
//! A command-line HTTP client that sends ad-hoc requests or replays named
//! requests saved in `~/.reqkit/requests.yaml`.
//!
//! ## Features
//! - HTTP methods: GET, POST, PUT, PATCH, DELETE
//! - Auth: Password/Basic, Bearer, Token, with `$NAME` environment lookups
//! - Custom headers over sensible defaults
//! - Saved requests grouped in namespaces that share an auth block
//! - Output to the console, a named file or a temp file opened in an editor
//! - Raw, basic and pretty layouts
//!
//! ## Pipeline
//! - [`app::prepare`] resolves a literal URL or saved request into an
//!   [`OutboundRequest`]
//! - [`network::execute`] sends it and captures a [`CapturedResponse`]
//! - [`output::write_response`] renders it to the configured sink

pub mod app;
pub mod auth;
pub mod cli;
pub mod config;
pub mod constants;
pub mod credentials;
pub mod error;
pub mod headers;
pub mod models;
pub mod network;
pub mod output;
pub mod request;
pub mod response;
pub mod saved;

// Re-export commonly used types
pub use config::{ConfigContext, Paths, RequestStore, Settings};
pub use error::{Error, Result};
pub use headers::Headers;
pub use models::{AuthType, HttpMethod, RequestSpec, ResolvedAuth};
pub use output::{Format, OutputDestination};
pub use request::OutboundRequest;
pub use response::CapturedResponse;

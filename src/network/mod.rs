//! Network layer - HTTP request execution
//!
//! Exactly one request is sent per invocation; its outcome is always a
//! [`CapturedResponse`](crate::response::CapturedResponse), never an error.

pub mod client;

pub use client::{create_client, execute};

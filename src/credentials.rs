//! Environment indirection for credentials
//!
//! A value written as `$NAME` is read from the process environment; anything
//! else is used literally.

use crate::models::{AuthBlock, AuthType};

/// Resolves `value` against the process environment.
pub fn resolve(value: &str) -> String {
    resolve_with(value, |name| std::env::var(name).ok())
}

/// Resolves `value` using the given lookup. A missing variable prints a
/// diagnostic and resolves to the empty string.
pub fn resolve_with<F>(value: &str, lookup: F) -> String
where
    F: Fn(&str) -> Option<String>,
{
    let Some(name) = value.strip_prefix('$') else {
        return value.to_string();
    };

    match lookup(name) {
        Some(found) => found,
        None => {
            tracing::warn!(name, "environment variable not set");
            eprintln!("could not find environment variable for: {}", name);
            String::new()
        }
    }
}

impl AuthBlock {
    /// Flattens the block into the command-line credential form: the token
    /// for Bearer/Token, `username:password` for Password/Basic.
    ///
    /// An unrecognised auth type yields an empty credential; the type itself
    /// is rejected later when headers are composed.
    pub fn credential_with<F>(&self, lookup: F) -> String
    where
        F: Fn(&str) -> Option<String>,
    {
        match AuthType::parse(&self.auth_type) {
            Ok(AuthType::Bearer | AuthType::Token) => resolve_with(&self.token, &lookup),
            Ok(AuthType::Password) => format!(
                "{}:{}",
                resolve_with(&self.username, &lookup),
                resolve_with(&self.password, &lookup)
            ),
            Ok(AuthType::None) | Err(_) => String::new(),
        }
    }
}

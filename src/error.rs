//! Error types for request preparation and output.
//!
//! Construction-time failures (bad auth type, malformed header or
//! credential, unknown saved request) are returned as `Err` and stop the
//! pipeline before any network call. Transport and rendering problems never
//! show up here; they are accumulated on the captured response instead.

use thiserror::Error;

/// Result type for reqkit operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while preparing a request or opening an output.
#[derive(Error, Debug)]
pub enum Error {
    /// Auth type outside the accepted set.
    #[error("wrong auth type. accepts: Password|Basic|Bearer|Token. was given: {0}")]
    InvalidAuthType(String),

    /// Header entry that is not exactly one `key:value` pair.
    #[error("headers need to be <key>:<value> - ex: Content-Type:application/json. was given: {0}")]
    MalformedHeader(String),

    /// Password credential without the `username:password` separator.
    #[error("credential for Password auth needs to be <username>:<password>")]
    MalformedCredential,

    /// Saved request identifier with no matching entry.
    #[error("saved request not found: `{0}`. type 'reqkit config -h' for help in checking config")]
    SavedRequestNotFound(String),

    /// Saved request entry that is neither a URL nor a `{url, body, header}` map.
    #[error("saved request `{name}` has an unsupported shape: {reason}")]
    SavedRequestShape { name: String, reason: String },

    /// Wrapped error from assembling the outbound request.
    #[error("err building request: {0}")]
    BuildRequest(#[source] Box<Error>),

    /// Header name or value the HTTP layer rejects.
    #[error("invalid header `{0}`")]
    InvalidHeader(String),

    /// YAML parse or decode error.
    #[error("yaml error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// File system error.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// Output format outside raw/basic/pretty.
    #[error("unknown output format `{0}`. accepts: pretty|basic|raw")]
    UnknownFormat(String),

    /// Output destination outside stdout/file/tempFile.
    #[error("wrong or missing value for outWriter. Looked for: {0}")]
    UnknownDestination(String),

    /// Home directory could not be determined.
    #[error("err finding home dir")]
    HomeDirNotFound,
}

impl Error {
    /// Wraps a header/auth failure as a request construction error.
    pub fn building(err: Error) -> Self {
        Error::BuildRequest(Box::new(err))
    }
}

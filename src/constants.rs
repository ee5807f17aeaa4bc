//! Application constants
//!
//! Centralized location for magic strings and configuration defaults.

/// Config directory under the user's home
pub const CONFIG_DIR_NAME: &str = ".reqkit";

/// Environment variable overriding the config directory
pub const CONFIG_DIR_ENV_VAR: &str = "REQKIT_HOME";

/// Output settings file
pub const CONFIG_FILE_NAME: &str = "config.yaml";

/// Saved requests file
pub const REQUESTS_FILE_NAME: &str = "requests.yaml";

/// Log file written inside the config directory
pub const LOG_FILE_NAME: &str = "reqkit.log";

/// Client-level timeout for every outbound request
pub const REQUEST_TIMEOUT_SECS: u64 = 10;

/// `Content-Type` sent when the caller gives none
pub const DEFAULT_CONTENT_TYPE: &str = "application/json; charset=UTF-8";

/// `Accept` sent when the caller gives none
pub const DEFAULT_ACCEPT: &str = "text/html,text/plain,application/json";

/// Stem of the output file (named and temporary destinations)
pub const DEFAULT_OUTPUT_FILE_NAME: &str = "reqkitOutput";

/// Extension of the output file, without the dot
pub const DEFAULT_OUTPUT_FILE_TYPE: &str = "txt";

/// Replacement shown for the `Authorization` value in rendered output
pub const MASKED_VALUE: &str = "[******]";

//! Command line surface

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

use crate::app::ConfigTarget;
use crate::models::{HttpMethod, RequestSpec};

/// A CLI tool for HTTP requests, with saved credentials and saved requests
/// for repeat use
#[derive(Parser, Debug)]
#[command(name = "reqkit", version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// HTTP GET request
    Get(RequestArgs),
    /// HTTP POST request
    Post(RequestArgs),
    /// HTTP PUT request
    Put(RequestArgs),
    /// HTTP PATCH request
    Patch(RequestArgs),
    /// HTTP DELETE request
    Delete(RequestArgs),
    /// View or edit configurations
    #[command(subcommand)]
    Config(ConfigCommand),
}

impl Command {
    /// Method and arguments for the request verbs.
    pub fn request(&self) -> Option<(HttpMethod, &RequestArgs)> {
        match self {
            Command::Get(args) => Some((HttpMethod::GET, args)),
            Command::Post(args) => Some((HttpMethod::POST, args)),
            Command::Put(args) => Some((HttpMethod::PUT, args)),
            Command::Patch(args) => Some((HttpMethod::PATCH, args)),
            Command::Delete(args) => Some((HttpMethod::DELETE, args)),
            Command::Config(_) => None,
        }
    }
}

#[derive(Args, Debug, Clone, PartialEq, Eq)]
pub struct RequestArgs {
    /// A URL (https://mysite.com/users) or a saved request in dot notation
    /// (mysite.users)
    #[arg(value_name = "URL|SAVED_REQUEST")]
    pub target: String,

    /// Auth type: Password|Basic|Bearer|Token
    #[arg(short, long)]
    pub auth: Option<String>,

    /// Token for Bearer|Token, or username:password for Password
    #[arg(short, long)]
    pub cred: Option<String>,

    /// Header as key:value, as many as needed
    #[arg(short = 'H', long = "header", value_name = "KEY:VALUE")]
    pub headers: Vec<String>,

    /// Appended to the url as-is: `-p ?title=MyTitle` or `-p /123`
    #[arg(short, long)]
    pub params: Option<String>,

    /// Request body
    #[arg(short, long)]
    pub body: Option<String>,

    /// Read the request body from a file
    #[arg(short, long)]
    pub file: Option<PathBuf>,
}

impl RequestArgs {
    /// Draft request for the given method. A `--file` body replaces
    /// `--body`.
    pub fn to_spec(&self, method: HttpMethod) -> std::io::Result<RequestSpec> {
        let mut spec = RequestSpec {
            auth_type: self.auth.clone().unwrap_or_default(),
            credential: self.cred.clone().unwrap_or_default(),
            headers: self.headers.clone(),
            params: self.params.clone().unwrap_or_default(),
            body: self.body.clone().unwrap_or_default(),
            ..RequestSpec::new(method, self.target.as_str())
        };
        if let Some(file) = &self.file {
            spec.body_from_file(file)?;
        }
        Ok(spec)
    }
}

#[derive(Subcommand, Debug, PartialEq, Eq)]
pub enum ConfigCommand {
    /// List locations of the config files
    Where,
    /// Print the settings file
    List,
    /// Open a config file, or the config directory, for viewing or editing
    Open {
        #[arg(value_enum)]
        target: OpenTarget,

        /// Alias or path of the editor executable
        #[arg(short, long)]
        editor: Option<String>,
    },
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum OpenTarget {
    Path,
    Config,
    Requests,
}

impl From<OpenTarget> for ConfigTarget {
    fn from(target: OpenTarget) -> Self {
        match target {
            OpenTarget::Path => ConfigTarget::Path,
            OpenTarget::Config => ConfigTarget::Config,
            OpenTarget::Requests => ConfigTarget::Requests,
        }
    }
}

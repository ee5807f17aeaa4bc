//! Command handlers - request pipeline and config inspection

use std::fmt::Write as _;
use std::path::PathBuf;
use std::process::Command;

use crate::config::{ConfigContext, Paths};
use crate::error::Result;
use crate::models::RequestSpec;
use crate::network::{create_client, execute};
use crate::output::{write_response, Editor};
use crate::request::{build, is_literal_url, OutboundRequest};
use crate::saved;

/// Turns a draft into an outbound request, consulting the saved requests
/// document only when the target is not a literal URL.
pub fn prepare(spec: RequestSpec, ctx: &ConfigContext) -> Result<OutboundRequest> {
    if is_literal_url(&spec.url) {
        return build(spec);
    }
    let identifier = spec.url.clone();
    saved::resolve(&identifier, spec, ctx.requests()?)
}

/// Prepares, executes and renders one request.
///
/// Construction errors stop before any network call. Once the request is
/// sent the response is always rendered; transport failures show up in its
/// error list.
pub async fn send(spec: RequestSpec, ctx: &ConfigContext) -> Result<()> {
    let request =
        prepare(spec, ctx).inspect_err(|e| tracing::warn!(error = %e, "request not sent"))?;

    let mut response = execute(&create_client(), request).await;
    if response.has_errors() {
        tracing::warn!(errors = response.errors().len(), "response carries errors");
    }
    write_response(&mut response, &ctx.settings)
}

/// File a `config open` invocation targets.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ConfigTarget {
    /// The config directory itself
    Path,
    Config,
    Requests,
}

impl ConfigTarget {
    pub fn path(&self, paths: &Paths) -> PathBuf {
        match self {
            ConfigTarget::Path => paths.dir().to_path_buf(),
            ConfigTarget::Config => paths.config_file(),
            ConfigTarget::Requests => paths.requests_file(),
        }
    }
}

/// Text for `config where`.
pub fn config_locations(paths: &Paths) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "reqkit path - where everything is located: {}",
        paths.dir().display()
    );
    let _ = writeln!(
        out,
        "config.yaml - main settings: {}",
        paths.config_file().display()
    );
    let _ = writeln!(
        out,
        "requests.yaml - saved requests: {}",
        paths.requests_file().display()
    );
    let _ = writeln!(out, "reqkit.log - request log: {}", paths.log_file().display());
    out
}

/// Contents of the settings file, for `config list`.
pub fn config_contents(paths: &Paths) -> Result<String> {
    Ok(std::fs::read_to_string(paths.config_file())?)
}

/// Opens a config file in the editor, or the config directory in the
/// platform file browser. Where there is no file browser to launch the
/// directory is printed instead.
pub fn open_config(target: ConfigTarget, editor: Option<&str>, ctx: &ConfigContext) -> Result<()> {
    let path = target.path(&ctx.paths);

    if target == ConfigTarget::Path {
        let browser = if cfg!(windows) {
            Some("explorer")
        } else if cfg!(target_os = "macos") {
            Some("open")
        } else {
            None
        };
        match browser {
            Some(program) => {
                Command::new(program).arg(&path).status()?;
            }
            None => println!("type: 'cd {}'", path.display()),
        }
        return Ok(());
    }

    let editor = Editor::from_setting(editor.unwrap_or(&ctx.settings.file_editor));
    let status = editor.run(&path)?;
    tracing::debug!(path = %path.display(), %status, "editor exited");
    Ok(())
}

//! External editor launcher

use std::io;
use std::path::Path;
use std::process::{Command, ExitStatus};

/// Program plus leading arguments; the file path is appended last.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Editor {
    program: String,
    args: Vec<String>,
}

impl Editor {
    /// Picks the editor for this platform. `configured` may carry arguments
    /// (`code --wait`).
    ///
    /// - Windows: `configured`, else `notepad`
    /// - macOS: `open -a <configured>`, else `open`
    /// - elsewhere: `configured`, else `vim`
    pub fn from_setting(configured: &str) -> Self {
        let mut words = configured.split_whitespace().map(str::to_string);
        let first = words.next();

        if cfg!(target_os = "macos") {
            return match first {
                Some(app) => Editor {
                    program: "open".to_string(),
                    args: ["-a".to_string(), app].into_iter().chain(words).collect(),
                },
                None => Editor::new("open"),
            };
        }

        let fallback = if cfg!(windows) { "notepad" } else { "vim" };
        match first {
            Some(program) => Editor {
                program,
                args: words.collect(),
            },
            None => Editor::new(fallback),
        }
    }

    pub fn new(program: impl Into<String>) -> Self {
        Editor {
            program: program.into(),
            args: Vec::new(),
        }
    }

    pub fn program(&self) -> &str {
        &self.program
    }

    pub fn command(&self, path: &Path) -> Command {
        let mut cmd = Command::new(&self.program);
        cmd.args(&self.args).arg(path);
        cmd
    }

    /// Runs the editor on `path` and waits for it to exit.
    pub fn run(&self, path: &Path) -> io::Result<ExitStatus> {
        tracing::debug!(editor = %self.program, path = %path.display(), "launching editor");
        self.command(path).status()
    }
}

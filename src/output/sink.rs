//! Output destinations and their lifecycle
//!
//! Opening a destination yields an [`OutputSink`]: a buffered writer plus the
//! teardown for that destination. Teardown runs from [`OutputSink::finish`],
//! or from `Drop` if the sink is abandoned on an error path, so the buffer is
//! always flushed and the file closed before any editor is launched.

use std::fs::File;
use std::io::{self, BufWriter, Stdout, Write};
use std::path::{Path, PathBuf};

use tempfile::TempPath;

use crate::config::Settings;
use crate::constants::DEFAULT_OUTPUT_FILE_NAME;
use crate::error::{Error, Result};
use crate::output::editor::Editor;

/// Where rendered output goes.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum OutputDestination {
    /// Standard output; flushed on teardown
    Console,
    /// Created or truncated; flushed and closed on teardown
    File(PathBuf),
    /// Fresh temporary file; flushed, closed, opened in the editor and
    /// optionally deleted on teardown
    TempFile {
        extension: String,
        editor: Editor,
        delete_on_close: bool,
    },
}

impl OutputDestination {
    /// Destination named by `outWriter`. A named file whose directory cannot
    /// be determined falls back to the console.
    pub fn from_settings(settings: &Settings) -> Result<Self> {
        match settings.out_writer.as_str() {
            "stdout" | "" => Ok(OutputDestination::Console),
            "file" => match settings.output_file() {
                Ok(path) => Ok(OutputDestination::File(path)),
                Err(e) => {
                    eprintln!("{}", e);
                    tracing::warn!(error = %e, "no output directory, writing to stdout");
                    Ok(OutputDestination::Console)
                }
            },
            "tempFile" => Ok(OutputDestination::TempFile {
                extension: settings.file_extension(),
                editor: Editor::from_setting(&settings.file_editor),
                delete_on_close: settings.delete_temp_file_on_close,
            }),
            other => Err(Error::UnknownDestination(other.to_string())),
        }
    }

    pub fn open(self) -> Result<OutputSink> {
        let (target, teardown) = match self {
            OutputDestination::Console => (Target::Stdout(io::stdout()), Teardown::Flush),
            OutputDestination::File(path) => {
                let file = File::create(&path)?;
                tracing::debug!(path = %path.display(), "opened output file");
                (Target::File(file), Teardown::Close { path })
            }
            OutputDestination::TempFile {
                extension,
                editor,
                delete_on_close,
            } => {
                let (file, path) = tempfile::Builder::new()
                    .prefix(&format!("{}_", DEFAULT_OUTPUT_FILE_NAME))
                    .suffix(&extension)
                    .tempfile()?
                    .into_parts();
                tracing::debug!(path = %path.display(), "opened temporary output file");
                (
                    Target::File(file),
                    Teardown::OpenInEditor {
                        path,
                        editor,
                        delete_on_close,
                    },
                )
            }
        };

        Ok(OutputSink {
            state: Some((BufWriter::new(target), teardown)),
        })
    }
}

enum Target {
    Stdout(Stdout),
    File(File),
}

impl Write for Target {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        match self {
            Target::Stdout(out) => out.write(buf),
            Target::File(file) => file.write(buf),
        }
    }

    fn flush(&mut self) -> io::Result<()> {
        match self {
            Target::Stdout(out) => out.flush(),
            Target::File(file) => file.flush(),
        }
    }
}

enum Teardown {
    Flush,
    Close {
        path: PathBuf,
    },
    OpenInEditor {
        path: TempPath,
        editor: Editor,
        delete_on_close: bool,
    },
}

/// Buffered writer over one destination. Call [`finish`](Self::finish) to
/// release it and observe teardown errors.
pub struct OutputSink {
    state: Option<(BufWriter<Target>, Teardown)>,
}

impl OutputSink {
    /// File backing this sink, if any.
    pub fn path(&self) -> Option<&Path> {
        match &self.state {
            Some((_, Teardown::Close { path })) => Some(path.as_path()),
            Some((_, Teardown::OpenInEditor { path, .. })) => Some(&**path),
            _ => None,
        }
    }

    /// Flushes, closes and runs the destination's teardown.
    pub fn finish(mut self) -> io::Result<()> {
        match self.state.take() {
            Some((writer, teardown)) => tear_down(writer, teardown),
            None => Ok(()),
        }
    }
}

impl Write for OutputSink {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        match &mut self.state {
            Some((writer, _)) => writer.write(buf),
            None => Err(io::Error::new(io::ErrorKind::BrokenPipe, "output already closed")),
        }
    }

    fn flush(&mut self) -> io::Result<()> {
        match &mut self.state {
            Some((writer, _)) => writer.flush(),
            None => Ok(()),
        }
    }
}

impl Drop for OutputSink {
    fn drop(&mut self) {
        if let Some((writer, teardown)) = self.state.take() {
            if let Err(e) = tear_down(writer, teardown) {
                tracing::warn!(error = %e, "output teardown failed");
            }
        }
    }
}

fn tear_down(writer: BufWriter<Target>, teardown: Teardown) -> io::Result<()> {
    // into_inner flushes; dropping the target closes the file
    let flushed = match writer.into_inner() {
        Ok(Target::Stdout(mut out)) => out.flush(),
        Ok(Target::File(file)) => {
            drop(file);
            Ok(())
        }
        Err(e) => Err(e.into_error()),
    };

    match teardown {
        Teardown::Flush => flushed,
        Teardown::Close { path } => {
            tracing::debug!(path = %path.display(), "closed output file");
            flushed
        }
        Teardown::OpenInEditor {
            path,
            editor,
            delete_on_close,
        } => {
            if let Err(e) = &flushed {
                tracing::warn!(error = %e, path = %path.display(), "temporary output not fully written");
            }
            if let Err(e) = editor.run(&path) {
                eprintln!("could not open {} with {}: {}", path.display(), editor.program(), e);
            }
            let released = if delete_on_close {
                path.close()
            } else {
                path.keep()
                    .map(|kept| tracing::info!(path = %kept.display(), "kept temporary output file"))
                    .map_err(|e| e.error)
            };
            flushed.and(released)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_settings() {
        let mut settings = Settings::default();
        assert_eq!(
            OutputDestination::from_settings(&settings).unwrap(),
            OutputDestination::Console
        );

        settings.out_writer = "file".to_string();
        settings.out_writer_file_path = "/tmp/out".to_string();
        settings.out_writer_file_name = "testfile".to_string();
        assert_eq!(
            OutputDestination::from_settings(&settings).unwrap(),
            OutputDestination::File(PathBuf::from("/tmp/out/testfile.txt"))
        );

        settings.out_writer = "tempFile".to_string();
        assert!(matches!(
            OutputDestination::from_settings(&settings).unwrap(),
            OutputDestination::TempFile { delete_on_close: true, ref extension, .. } if extension == ".txt"
        ));

        settings.out_writer = "printer".to_string();
        assert!(matches!(
            OutputDestination::from_settings(&settings),
            Err(Error::UnknownDestination(ref v)) if v == "printer"
        ));
    }

    #[test]
    fn test_file_sink_truncates_and_closes() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.txt");
        std::fs::write(&path, "previous content that is longer").unwrap();

        let mut sink = OutputDestination::File(path.clone()).open().unwrap();
        assert_eq!(sink.path(), Some(path.as_path()));
        sink.write_all(b"fresh").unwrap();
        sink.finish().unwrap();

        assert_eq!(std::fs::read_to_string(&path).unwrap(), "fresh");
    }

    #[test]
    fn test_file_sink_flushes_on_drop() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.txt");

        {
            let mut sink = OutputDestination::File(path.clone()).open().unwrap();
            sink.write_all(b"abandoned").unwrap();
        }

        assert_eq!(std::fs::read_to_string(&path).unwrap(), "abandoned");
    }

    #[test]
    fn test_file_sink_open_failure() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing").join("out.txt");
        assert!(matches!(
            OutputDestination::File(path).open(),
            Err(Error::Io(_))
        ));
    }

    #[test]
    fn test_console_sink() {
        let mut sink = OutputDestination::Console.open().unwrap();
        assert_eq!(sink.path(), None);
        sink.write_all(b"").unwrap();
        sink.finish().unwrap();
    }

    #[cfg(all(unix, not(target_os = "macos")))]
    #[test]
    fn test_temp_file_sink_deletes_after_editor() {
        let mut sink = OutputDestination::TempFile {
            extension: ".txt".to_string(),
            editor: Editor::new("true"),
            delete_on_close: true,
        }
        .open()
        .unwrap();

        let path = sink.path().unwrap().to_path_buf();
        let name = path.file_name().unwrap().to_string_lossy().into_owned();
        assert!(name.starts_with("reqkitOutput_"));
        assert!(name.ends_with(".txt"));

        sink.write_all(b"hello").unwrap();
        sink.finish().unwrap();
        assert!(!path.exists());
    }

    #[cfg(all(unix, not(target_os = "macos")))]
    #[test]
    fn test_temp_file_sink_keeps_file() {
        let mut sink = OutputDestination::TempFile {
            extension: ".log".to_string(),
            editor: Editor::new("true"),
            delete_on_close: false,
        }
        .open()
        .unwrap();

        let path = sink.path().unwrap().to_path_buf();
        sink.write_all(b"kept").unwrap();
        sink.finish().unwrap();

        assert_eq!(std::fs::read_to_string(&path).unwrap(), "kept");
        std::fs::remove_file(&path).unwrap();
    }

    #[cfg(target_os = "linux")]
    #[test]
    fn test_temp_file_policy_runs_after_failed_flush() {
        let path = tempfile::NamedTempFile::new().unwrap().into_temp_path();
        let full = File::options().write(true).open("/dev/full").unwrap();
        let mut sink = OutputSink {
            state: Some((
                BufWriter::new(Target::File(full)),
                Teardown::OpenInEditor {
                    path,
                    editor: Editor::new("true"),
                    delete_on_close: false,
                },
            )),
        };

        let kept = sink.path().unwrap().to_path_buf();
        sink.write_all(b"never fits").unwrap();
        assert!(sink.finish().is_err());

        assert!(kept.exists());
        std::fs::remove_file(&kept).unwrap();
    }
}

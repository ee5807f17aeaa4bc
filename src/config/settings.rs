//! Output settings (`config.yaml`)

use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::constants::{DEFAULT_OUTPUT_FILE_NAME, DEFAULT_OUTPUT_FILE_TYPE};
use crate::error::{Error, Result};

/// Where and how responses are written.
///
/// ```yaml
/// outWriter: stdout        # stdout|file|tempFile
/// outWriterFormat: pretty  # pretty|basic|raw
/// deleteTempFileOnClose: true
/// outWriterFileType: txt
/// outWriterFileName: reqkitOutput
/// outWriterFilePath: /tmp
/// fileEditor: code
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Settings {
    pub out_writer: String,
    pub out_writer_format: String,
    pub delete_temp_file_on_close: bool,
    pub out_writer_file_type: String,
    pub out_writer_file_name: String,
    pub out_writer_file_path: String,
    pub file_editor: String,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            out_writer: String::new(),
            out_writer_format: String::new(),
            delete_temp_file_on_close: true,
            out_writer_file_type: String::new(),
            out_writer_file_name: DEFAULT_OUTPUT_FILE_NAME.to_string(),
            out_writer_file_path: String::new(),
            file_editor: String::new(),
        }
    }
}

impl Settings {
    /// Loads settings from a file. A missing file yields the defaults.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        match std::fs::read_to_string(path.as_ref()) {
            Ok(content) => Self::from_yaml(&content),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!(path = %path.as_ref().display(), "no settings file, using defaults");
                Ok(Self::default())
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Parses settings from YAML. An empty document yields the defaults.
    pub fn from_yaml(content: &str) -> Result<Self> {
        let value: serde_yaml::Value = serde_yaml::from_str(content)?;
        if value.is_null() {
            return Ok(Self::default());
        }
        Ok(serde_yaml::from_value(value)?)
    }

    /// Output file extension including the dot (`.txt` by default).
    pub fn file_extension(&self) -> String {
        let ext = if self.out_writer_file_type.is_empty() {
            DEFAULT_OUTPUT_FILE_TYPE
        } else {
            self.out_writer_file_type.trim_start_matches('.')
        };
        format!(".{}", ext)
    }

    /// Directory for the named output file: the configured path, else the
    /// home directory (the Desktop on Windows).
    pub fn output_dir(&self) -> Result<PathBuf> {
        if !self.out_writer_file_path.is_empty() {
            return Ok(PathBuf::from(&self.out_writer_file_path));
        }
        let home = dirs::home_dir().ok_or(Error::HomeDirNotFound)?;
        if cfg!(windows) {
            Ok(home.join("Desktop"))
        } else {
            Ok(home)
        }
    }

    /// Full path of the named output file.
    pub fn output_file(&self) -> Result<PathBuf> {
        let name = format!("{}{}", self.out_writer_file_name, self.file_extension());
        Ok(self.output_dir()?.join(name))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let settings = Settings::from_yaml("").unwrap();
        assert_eq!(settings, Settings::default());
        assert!(settings.delete_temp_file_on_close);
        assert_eq!(settings.file_extension(), ".txt");

        let settings = Settings::from_yaml("# only comments\n").unwrap();
        assert_eq!(settings, Settings::default());
    }

    #[test]
    fn test_parse() {
        let yaml = r#"
outWriter: file
outWriterFormat: basic
deleteTempFileOnClose: false
outWriterFileName: testfile
outWriterFilePath: /tmp/out
outWriterFileType: log
"#;
        let settings = Settings::from_yaml(yaml).unwrap();
        assert_eq!(settings.out_writer, "file");
        assert_eq!(settings.out_writer_format, "basic");
        assert!(!settings.delete_temp_file_on_close);
        assert_eq!(settings.file_extension(), ".log");
        assert_eq!(
            settings.output_file().unwrap(),
            PathBuf::from("/tmp/out/testfile.log")
        );
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let settings = Settings::load(dir.path().join("config.yaml")).unwrap();
        assert_eq!(settings, Settings::default());
    }

    #[test]
    fn test_load_malformed_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.yaml");
        std::fs::write(&path, "outWriter: [unclosed").unwrap();
        assert!(matches!(Settings::load(&path), Err(Error::Yaml(_))));
    }
}

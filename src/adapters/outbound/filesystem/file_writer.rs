use crate::ports::outbound::OutputPresenter;
use crate::shared::error::FetchError;
use crate::shared::Result;
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

/// FileSystemWriter adapter: writes a listing to `--output`
///
/// Refuses to follow a symlink at the output path, since the tool normally
/// runs as root.
pub struct FileSystemWriter {
    output_path: PathBuf,
}

impl FileSystemWriter {
    pub fn new(output_path: PathBuf) -> Self {
        Self { output_path }
    }

    fn write_error(&self, details: impl Into<String>) -> FetchError {
        FetchError::FileWriteError {
            path: self.output_path.clone(),
            details: details.into(),
        }
    }

    fn validate(&self) -> Result<()> {
        if let Some(parent) = self.output_path.parent() {
            if parent != Path::new("") && !parent.is_dir() {
                return Err(self
                    .write_error(format!("Parent directory does not exist: {}", parent.display()))
                    .into());
            }
        }
        if let Ok(metadata) = fs::symlink_metadata(&self.output_path) {
            if metadata.is_symlink() {
                return Err(self
                    .write_error("Output path is a symbolic link; refusing to write through it")
                    .into());
            }
        }
        Ok(())
    }
}

impl OutputPresenter for FileSystemWriter {
    fn present(&self, content: &str) -> Result<()> {
        self.validate()?;
        fs::write(&self.output_path, content).map_err(|e| self.write_error(e.to_string()))?;
        eprintln!("✅ Listing written to {}", self.output_path.display());
        Ok(())
    }
}

/// StdoutPresenter adapter: writes to stdout
pub struct StdoutPresenter;

impl StdoutPresenter {
    pub fn new() -> Self {
        Self
    }
}

impl Default for StdoutPresenter {
    fn default() -> Self {
        Self::new()
    }
}

impl OutputPresenter for StdoutPresenter {
    fn present(&self, content: &str) -> Result<()> {
        let mut stdout = io::stdout().lock();
        stdout
            .write_all(content.as_bytes())
            .and_then(|_| stdout.flush())
            .map_err(|e| anyhow::anyhow!("Failed to write to stdout: {}", e))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_file_writer_success() {
        let temp_dir = TempDir::new().unwrap();
        let output_path = temp_dir.path().join("products.json");

        FileSystemWriter::new(output_path.clone())
            .present("{}")
            .unwrap();
        assert_eq!(fs::read_to_string(&output_path).unwrap(), "{}");
    }

    #[test]
    fn test_file_writer_missing_parent() {
        let writer = FileSystemWriter::new(PathBuf::from("/nonexistent/directory/products.json"));
        let err = writer.present("{}").unwrap_err();
        assert!(err.to_string().contains("Parent directory does not exist"));
    }

    #[cfg(unix)]
    #[test]
    fn test_file_writer_rejects_symlink() {
        let temp_dir = TempDir::new().unwrap();
        let target = temp_dir.path().join("target.json");
        let link = temp_dir.path().join("link.json");
        fs::write(&target, "original").unwrap();
        std::os::unix::fs::symlink(&target, &link).unwrap();

        let err = FileSystemWriter::new(link).present("{}").unwrap_err();
        assert!(err.to_string().contains("symbolic link"));
        assert_eq!(fs::read_to_string(&target).unwrap(), "original");
    }

    #[test]
    fn test_stdout_presenter() {
        assert!(StdoutPresenter::new().present("").is_ok());
    }
}

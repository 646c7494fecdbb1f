//! Output sinks for the rendered document.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::info;

use crate::Result;

/// Destination of a finished document.
pub trait DocumentSink {
    /// Writes the whole document.
    ///
    /// # Errors
    ///
    /// Returns `CitationError::Io` if the document cannot be stored.
    fn write(&mut self, document: &str) -> Result<()>;
}

/// Collects the document in memory, replacing previous contents.
impl DocumentSink for String {
    fn write(&mut self, document: &str) -> Result<()> {
        self.clear();
        self.push_str(document);
        Ok(())
    }
}

/// Writes the document to a file, creating parent directories as needed.
#[derive(Debug, Clone)]
pub struct FileSink {
    path: PathBuf,
}

impl FileSink {
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl DocumentSink for FileSink {
    fn write(&mut self, document: &str) -> Result<()> {
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent)?;
        }
        fs::write(&self.path, document)?;
        info!(path = %self.path.display(), bytes = document.len(), "document written");
        Ok(())
    }
}

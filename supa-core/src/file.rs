use std::path::{Path, PathBuf};

use eyre::{Result, WrapErr};

use crate::Header;

/// Result of a write operation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteResult {
    /// File did not exist and was created
    Created,
    /// An existing file was replaced
    Overwritten,
}

/// A generated types file: header comment followed by the generated body
pub struct TypesFile {
    path: PathBuf,
    header: Header,
    body: String,
}

impl TypesFile {
    /// Create a new types file for the given path and body
    pub fn new(path: impl Into<PathBuf>, header: Header, body: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            header,
            body: body.into(),
        }
    }

    /// Render the full file content
    pub fn render(&self) -> String {
        let mut content = self.header.render();
        content.push_str(&self.body);
        content
    }

    /// Write the file, creating parent directories as needed
    pub fn write(&self) -> Result<WriteResult> {
        let existed = self.path.exists();
        write_file(&self.path, &self.render())
            .wrap_err_with(|| format!("Failed to write {}", self.path.display()))?;
        Ok(if existed {
            WriteResult::Overwritten
        } else {
            WriteResult::Created
        })
    }
}

fn write_file(path: &Path, content: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, content)?;
    Ok(())
}

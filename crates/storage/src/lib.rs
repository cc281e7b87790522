use anyhow::{Context, Result};
use async_trait::async_trait;
use document_core::FileStore;
use std::path::Path;

/// File Store backed by the local filesystem. Content is UTF-8 plain text.
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalFileStore;

impl LocalFileStore {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl FileStore for LocalFileStore {
    async fn read(&self, path: &Path) -> Result<String> {
        let bytes = tokio::fs::read(path)
            .await
            .with_context(|| format!("failed to read '{}'", path.display()))?;
        let content = String::from_utf8(bytes)
            .with_context(|| format!("'{}' is not valid UTF-8 text", path.display()))?;
        tracing::debug!(path = %path.display(), bytes = content.len(), "loaded text file");
        Ok(content)
    }

    async fn write(&self, path: &Path, content: &str) -> Result<()> {
        tokio::fs::write(path, content.as_bytes())
            .await
            .with_context(|| format!("failed to write '{}'", path.display()))?;
        tracing::debug!(path = %path.display(), bytes = content.len(), "wrote text file");
        Ok(())
    }
}

#[cfg(test)]
#[path = "tests/lib_tests.rs"]
mod tests;

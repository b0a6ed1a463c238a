//! Archive sink: retrieved device configurations are appended to a
//! timestamped file, one file per run. Write-only; never read back within
//! the same run.

use std::path::{Path, PathBuf};

use chrono::{DateTime, Local};
use tokio::io::AsyncWriteExt;
use tracing::debug;

use crate::error::AuditResult;
use crate::source::ConfigSource;

/// Appends device sources to `<base_dir>/device_config_<stamp>.conf`.
#[derive(Debug, Clone)]
pub struct ArchiveWriter {
    base_dir: PathBuf,
    path: PathBuf,
}

impl ArchiveWriter {
    /// The timestamp is fixed at run start, so every source in one run
    /// lands in the same file.
    pub fn new(base_dir: &Path, run_start: DateTime<Local>) -> Self {
        let stamp = run_start.format("%Y%m%d_%H%M");
        let path = base_dir.join(format!("device_config_{stamp}.conf"));
        Self {
            base_dir: base_dir.to_path_buf(),
            path,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Append one source's lines. The base directory is created on first
    /// write.
    pub async fn append_source(&self, source: &ConfigSource) -> AuditResult<()> {
        tokio::fs::create_dir_all(&self.base_dir).await?;

        let mut file = tokio::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .await?;

        let mut block = source.lines.join("\n");
        block.push('\n');
        file.write_all(block.as_bytes()).await?;
        file.flush().await?;

        debug!(
            "archived {} lines from {} to {}",
            source.lines.len(),
            source.identifier,
            self.path.display()
        );
        Ok(())
    }
}

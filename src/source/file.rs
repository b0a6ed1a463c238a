//! File-backed sources: a previously captured configuration, one line per
//! config statement.

use std::path::Path;

use super::ConfigSource;
use crate::error::AuditResult;

/// Read a captured configuration file into a file-origin source.
pub async fn load_file_source(path: impl AsRef<Path>) -> AuditResult<ConfigSource> {
    let path = path.as_ref();
    let text = tokio::fs::read_to_string(path).await?;
    let lines = text.lines().map(|l| l.to_string()).collect();
    Ok(ConfigSource::from_lines(&path.to_string_lossy(), lines))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::SourceOrigin;
    use std::io::Write;

    #[tokio::test]
    async fn test_load_file_source_strips_line_endings() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "feature ssh\nntp server 10.0.0.1\n").unwrap();

        let source = load_file_source(file.path()).await.unwrap();
        assert_eq!(source.origin, SourceOrigin::File);
        assert_eq!(
            source.lines,
            vec!["feature ssh".to_string(), "ntp server 10.0.0.1".to_string()]
        );
    }

    #[tokio::test]
    async fn test_load_missing_file_is_an_error() {
        assert!(load_file_source("does/not/exist.conf").await.is_err());
    }
}

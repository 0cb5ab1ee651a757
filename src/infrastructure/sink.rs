//! Log sink adapters.

use crate::application::ports::LogSink;
use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};

/// Best-effort file sink: appends lines to a file, swallowing failures.
///
/// Logging must never take the host program down, so open and write
/// errors are reported as `tracing` debug events and otherwise dropped.
/// At worst a line is not written.
#[derive(Debug, Clone)]
pub struct FileSink {
    path: PathBuf,
}

impl FileSink {
    /// Create a sink appending to the given file. The file is created on
    /// first append if missing.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// The file this sink appends to.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn try_append(&self, line: &str) -> std::io::Result<()> {
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;
        writeln!(file, "{line}")?;
        Ok(())
    }
}

impl LogSink for FileSink {
    fn append(&self, line: &str) {
        if let Err(e) = self.try_append(line) {
            tracing::debug!(
                target: "logfold",
                path = %self.path.display(),
                error = %e,
                "log append failed"
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_appends_lines_in_order() {
        let dir = std::env::temp_dir().join(format!("logfold-sink-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("out.log");
        let _ = std::fs::remove_file(&path);

        let sink = FileSink::new(&path);
        sink.append("first");
        sink.append("second");

        let contents = std::fs::read_to_string(&path).unwrap();
        assert_eq!(contents, "first\nsecond\n");

        std::fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn test_unwritable_path_does_not_panic() {
        let sink = FileSink::new("/proc/definitely/not/writable.log");
        sink.append("dropped");
    }
}

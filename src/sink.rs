//! Output sinks: the consolidated content file, the consolidated audit log,
//! and the per-directory local logs.
//!
//! All three are append-only. The two global sinks are shared by every file
//! worker in the run; each directory log is shared only between one isolate
//! and its direct file workers. Every sink co-locates its mutex with its
//! file handle, and every append holds that lock for exactly one complete
//! block or record, so concurrent appends never interleave at the byte
//! level.

use crate::error::SinkError;
use std::path::{Path, PathBuf};
use tokio::fs::File;
use tokio::io::AsyncWriteExt;
use tokio::sync::Mutex;

/// The consolidated content sink.
///
/// Workers append one delimited block per file: a start line, the file's
/// verbatim bytes, an end line, and a blank separator line.
pub struct ContentSink {
    path: PathBuf,
    file: Mutex<File>,
}

impl ContentSink {
    /// Create (truncating) the content sink at `path`.
    pub async fn create(path: &Path) -> Result<Self, SinkError> {
        let file = File::create(path)
            .await
            .map_err(|source| SinkError::CreateFailed {
                path: path.to_path_buf(),
                source,
            })?;
        Ok(Self {
            path: path.to_path_buf(),
            file: Mutex::new(file),
        })
    }

    /// Append one complete file body as a single delimited block.
    pub async fn append_block(&self, source: &Path, body: &[u8]) -> std::io::Result<()> {
        let header = format!("----- Start of {} -----\n", source.display());
        let footer = format!("----- End of {} -----\n\n", source.display());

        let mut file = self.file.lock().await;
        file.write_all(header.as_bytes()).await?;
        file.write_all(body).await?;
        file.write_all(footer.as_bytes()).await?;
        Ok(())
    }

    /// Flush buffered writes after the tree has drained.
    pub async fn finish(&self) -> Result<(), SinkError> {
        let mut file = self.file.lock().await;
        file.flush().await.map_err(|source| SinkError::FlushFailed {
            path: self.path.clone(),
            source,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

/// One structured entry in the audit sink.
#[derive(Debug, Clone)]
pub struct AuditRecord {
    pub path: PathBuf,
    pub depth: usize,
    pub worker_id: u64,
    pub ancestry: String,
    pub last_modified: String,
}

impl AuditRecord {
    /// Render the multi-line record exactly as it appears in the audit log.
    pub fn render(&self) -> String {
        format!(
            "FILE: {}\n  Depth: {}\n  Worker: {}\n  Ancestry: {}\n  Last Modified: {}\n\n",
            self.path.display(),
            self.depth,
            self.worker_id,
            self.ancestry,
            self.last_modified,
        )
    }
}

/// The consolidated audit sink: one multi-line record per processed file.
pub struct AuditSink {
    path: PathBuf,
    file: Mutex<File>,
}

impl AuditSink {
    /// Create (truncating) the audit sink at `path`.
    pub async fn create(path: &Path) -> Result<Self, SinkError> {
        let file = File::create(path)
            .await
            .map_err(|source| SinkError::CreateFailed {
                path: path.to_path_buf(),
                source,
            })?;
        Ok(Self {
            path: path.to_path_buf(),
            file: Mutex::new(file),
        })
    }

    /// Append one complete record.
    pub async fn append(&self, record: &AuditRecord) -> std::io::Result<()> {
        let rendered = record.render();
        let mut file = self.file.lock().await;
        file.write_all(rendered.as_bytes()).await
    }

    /// Flush buffered writes after the tree has drained.
    pub async fn finish(&self) -> Result<(), SinkError> {
        let mut file = self.file.lock().await;
        file.flush().await.map_err(|source| SinkError::FlushFailed {
            path: self.path.clone(),
            source,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

/// A directory's local log, named `<basename>.log` and placed inside the
/// directory itself.
///
/// Owned by one isolate and shared with that isolate's direct file workers,
/// so writes still need the lock; they never cross directory boundaries.
pub struct DirLog {
    path: PathBuf,
    file: Mutex<File>,
}

impl DirLog {
    /// Create (truncating) the log for `dir` inside `dir`.
    pub async fn create(dir: &Path) -> Result<Self, SinkError> {
        let basename = dir
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "root".to_string());
        let path = dir.join(format!("{basename}.log"));

        let file = File::create(&path)
            .await
            .map_err(|source| SinkError::CreateFailed {
                path: path.clone(),
                source,
            })?;
        Ok(Self {
            path,
            file: Mutex::new(file),
        })
    }

    /// Record the owning isolate's visit to its directory.
    pub async fn record_visit(&self, id: u64, dir: &Path) -> std::io::Result<()> {
        let line = format!("[directory worker {id}] entered directory: {}\n", dir.display());
        let mut file = self.file.lock().await;
        file.write_all(line.as_bytes()).await
    }

    /// Record one file worker's read.
    pub async fn record_file(&self, id: u64, path: &Path) -> std::io::Result<()> {
        let line = format!("[file worker {id}] read file: {}\n", path.display());
        let mut file = self.file.lock().await;
        file.write_all(line.as_bytes()).await
    }

    /// Flush the log once every worker under this directory has finished.
    pub async fn finish(&self) -> Result<(), SinkError> {
        let mut file = self.file.lock().await;
        file.flush().await.map_err(|source| SinkError::FlushFailed {
            path: self.path.clone(),
            source,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_audit_record_render() {
        let record = AuditRecord {
            path: PathBuf::from("/data/sub/b.txt"),
            depth: 1,
            worker_id: 1007,
            ancestry: "1000>1004".to_string(),
            last_modified: "2024-06-01 12:30:00".to_string(),
        };

        let rendered = record.render();
        assert_eq!(
            rendered,
            "FILE: /data/sub/b.txt\n  Depth: 1\n  Worker: 1007\n  Ancestry: 1000>1004\n  Last Modified: 2024-06-01 12:30:00\n\n"
        );
    }

    #[tokio::test]
    async fn test_content_sink_block_format() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("output.txt");

        let sink = ContentSink::create(&out).await.unwrap();
        let source = PathBuf::from("/data/a.txt");
        sink.append_block(&source, b"hello\nworld\n").await.unwrap();
        sink.finish().await.unwrap();

        let written = std::fs::read_to_string(&out).unwrap();
        assert_eq!(
            written,
            "----- Start of /data/a.txt -----\nhello\nworld\n----- End of /data/a.txt -----\n\n"
        );
    }

    #[tokio::test]
    async fn test_dir_log_named_after_directory() {
        let dir = tempfile::tempdir().unwrap();
        let sub = dir.path().join("sub");
        std::fs::create_dir(&sub).unwrap();

        let log = DirLog::create(&sub).await.unwrap();
        log.record_visit(42, &sub).await.unwrap();
        log.record_file(43, &sub.join("b.txt")).await.unwrap();
        log.finish().await.unwrap();

        assert_eq!(log.path(), sub.join("sub.log"));
        let written = std::fs::read_to_string(log.path()).unwrap();
        assert!(written.starts_with("[directory worker 42] entered directory: "));
        assert!(written.contains("[file worker 43] read file: "));
    }
}

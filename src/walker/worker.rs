//! File worker: the lightweight task that processes exactly one file.
//!
//! A worker reads its file, then makes three writes: an entry line in its
//! parent directory's log, one structured record in the global audit sink,
//! and one delimited content block in the global content sink. An
//! unreadable file is logged and skipped; it never aborts siblings or the
//! parent isolate, so the worker has no error return at all.

use crate::config::WalkConfig;
use crate::progress::{tree_line, WorkerKind};
use crate::sink::{AuditRecord, AuditSink, ContentSink, DirLog};
use crate::walker::ancestry::Ancestry;
use crate::walker::driver::WalkStats;
use chrono::{DateTime, Local};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::SystemTime;
use tokio::fs;
use tracing::{debug, error, warn};

/// Everything a file worker needs, handed over at spawn time.
///
/// The directory log handle is shared, not owned; the parent isolate joins
/// all of its workers before closing the log.
pub(crate) struct FileTask {
    pub path: PathBuf,
    /// Depth of the containing directory below the traversal root
    pub depth: usize,
    pub worker_id: u64,
    /// The parent isolate's ancestry chain, inherited unchanged
    pub chain: Ancestry,
    pub dir_log: Arc<DirLog>,
    pub config: Arc<WalkConfig>,
    pub content: Arc<ContentSink>,
    pub audit: Arc<AuditSink>,
    pub stats: Arc<WalkStats>,
}

/// Format a modification time as local `YYYY-MM-DD HH:MM:SS`.
fn format_mtime(mtime: SystemTime) -> String {
    DateTime::<Local>::from(mtime)
        .format("%Y-%m-%d %H:%M:%S")
        .to_string()
}

/// Process one file.
pub(crate) async fn run_worker(task: FileTask) {
    let body = match fs::read(&task.path).await {
        Ok(body) => body,
        Err(e) => {
            warn!(path = %task.path.display(), error = %e, "Skipping unreadable file");
            task.stats.record_skip();
            return;
        }
    };

    let mtime = match fs::metadata(&task.path).await.and_then(|m| m.modified()) {
        Ok(mtime) => mtime,
        Err(e) => {
            warn!(path = %task.path.display(), error = %e, "Skipping file without readable metadata");
            task.stats.record_skip();
            return;
        }
    };

    if !task.config.quiet {
        tree_line(task.depth + 1, WorkerKind::File, task.worker_id, &task.path);
    }

    if let Err(e) = task.dir_log.record_file(task.worker_id, &task.path).await {
        error!(path = %task.path.display(), error = %e, "Directory log write failed");
    }

    let record = AuditRecord {
        path: task.path.clone(),
        depth: task.depth,
        worker_id: task.worker_id,
        ancestry: task.chain.as_str().to_string(),
        last_modified: format_mtime(mtime),
    };
    if let Err(e) = task.audit.append(&record).await {
        error!(path = %task.path.display(), error = %e, "Audit sink write failed");
    }

    if let Err(e) = task.content.append_block(&task.path, &body).await {
        error!(path = %task.path.display(), error = %e, "Content sink write failed");
        task.stats.record_skip();
        return;
    }

    task.stats.record_file(body.len() as u64);
    debug!(path = %task.path.display(), worker = task.worker_id, "File concatenated");
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn test_format_mtime_shape() {
        let formatted = format_mtime(SystemTime::UNIX_EPOCH + Duration::from_secs(1_700_000_000));
        // Local-time value varies by zone; the shape does not.
        assert_eq!(formatted.len(), 19);
        assert_eq!(&formatted[4..5], "-");
        assert_eq!(&formatted[10..11], " ");
        assert_eq!(&formatted[13..14], ":");
    }
}

//! Directory isolate: the unit of concurrency that owns one directory level.
//!
//! An isolate enumerates its directory, opens the directory's local log,
//! spawns one child isolate per subdirectory and one file worker per
//! eligible file, then joins the file workers followed by the child
//! isolates. It only completes once its entire subtree has drained, and its
//! local log is closed only after that point.
//!
//! Isolates share nothing mutable with their parents or siblings; they
//! receive their path, ancestry chain, and `Arc` sink handles at spawn time
//! and re-raise fatal errors at the parent's join point.

use crate::config::WalkConfig;
use crate::error::{Result, WalkerError, WorkerError};
use crate::progress::{tree_line, WorkerKind};
use crate::sink::{AuditSink, ContentSink, DirLog};
use crate::walker::ancestry::{depth_below, next_worker_id, Ancestry};
use crate::walker::driver::WalkStats;
use crate::walker::worker::{run_worker, FileTask};
use std::ffi::OsStr;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use tokio::fs;
use tokio::task::JoinHandle;
use tracing::{debug, error};

/// Everything an isolate needs, handed over at spawn time.
pub(crate) struct IsolateContext {
    /// The directory this isolate owns
    pub dir: std::path::PathBuf,
    /// This isolate's identifier
    pub id: u64,
    /// Ancestry chain ending with this isolate's own identifier
    pub chain: Ancestry,
    pub config: Arc<WalkConfig>,
    pub content: Arc<ContentSink>,
    pub audit: Arc<AuditSink>,
    pub stats: Arc<WalkStats>,
}

impl IsolateContext {
    /// Context for a child isolate owning `dir`.
    fn child(&self, dir: std::path::PathBuf, id: u64) -> Self {
        Self {
            dir,
            id,
            chain: self.chain.child(id),
            config: Arc::clone(&self.config),
            content: Arc::clone(&self.content),
            audit: Arc::clone(&self.audit),
            stats: Arc::clone(&self.stats),
        }
    }
}

/// True if a directory entry name carries the eligibility marker.
fn is_candidate(name: Option<&OsStr>, marker: &str) -> bool {
    name.map(|n| n.to_string_lossy().contains(marker))
        .unwrap_or(false)
}

/// Process one directory level.
///
/// Boxed because the recursion goes through `tokio::spawn`: each directory
/// level is its own task, and the parent only holds `JoinHandle`s.
pub(crate) fn run_isolate(
    ctx: IsolateContext,
) -> Pin<Box<dyn Future<Output = Result<()>> + Send>> {
    Box::pin(async move {
        // Enumerate first so the directory's own log never shows up in the
        // entry list.
        let mut entries = Vec::new();
        let mut read_dir = fs::read_dir(&ctx.dir)
            .await
            .map_err(|source| WalkerError::ReadDir {
                path: ctx.dir.clone(),
                source,
            })?;
        while let Some(entry) = read_dir
            .next_entry()
            .await
            .map_err(|source| WalkerError::ReadDir {
                path: ctx.dir.clone(),
                source,
            })?
        {
            entries.push(entry);
        }

        // No audit trail, no walk: log creation failure aborts the run.
        let dir_log = Arc::new(DirLog::create(&ctx.dir).await?);

        let depth = depth_below(&ctx.config.root, &ctx.dir);
        if !ctx.config.quiet {
            tree_line(depth, WorkerKind::Directory, ctx.id, &ctx.dir);
        }
        dir_log
            .record_visit(ctx.id, &ctx.dir)
            .await
            .map_err(|source| crate::error::SinkError::WriteFailed {
                path: dir_log.path().to_path_buf(),
                source,
            })?;
        ctx.stats.record_dir();

        let mut child_isolates: Vec<JoinHandle<Result<()>>> = Vec::new();
        let mut file_workers: Vec<JoinHandle<()>> = Vec::new();

        for entry in entries {
            let path = entry.path();

            // A stat failure makes the entry a non-candidate, nothing more.
            let meta = match fs::metadata(&path).await {
                Ok(meta) => meta,
                Err(e) => {
                    debug!(path = %path.display(), error = %e, "Skipping unstatable entry");
                    ctx.stats.record_skip();
                    continue;
                }
            };

            if meta.is_dir() {
                let child_id = next_worker_id();
                child_isolates.push(tokio::spawn(run_isolate(ctx.child(path, child_id))));
            } else if meta.is_file() && is_candidate(path.file_name(), &ctx.config.marker) {
                let task = FileTask {
                    path,
                    depth,
                    worker_id: next_worker_id(),
                    chain: ctx.chain.clone(),
                    dir_log: Arc::clone(&dir_log),
                    config: Arc::clone(&ctx.config),
                    content: Arc::clone(&ctx.content),
                    audit: Arc::clone(&ctx.audit),
                    stats: Arc::clone(&ctx.stats),
                };
                file_workers.push(tokio::spawn(run_worker(task)));
            }
        }

        // File workers first; they hold the directory log handle.
        for handle in file_workers {
            if let Err(e) = handle.await {
                // A worker panic must not take its siblings down with it.
                error!(dir = %ctx.dir.display(), error = %e, "File worker panicked");
                ctx.stats.record_skip();
            }
        }

        // Then child isolates; each completes only once its own subtree has
        // fully drained. Fatal errors re-raise here after every child has
        // been waited on.
        let mut first_err: Option<WalkerError> = None;
        for handle in child_isolates {
            match handle.await {
                Ok(Ok(())) => {}
                Ok(Err(e)) => {
                    if first_err.is_none() {
                        first_err = Some(e);
                    }
                }
                Err(join_err) => {
                    if first_err.is_none() {
                        first_err = Some(WalkerError::Worker(WorkerError::Panicked {
                            id: ctx.id,
                            message: join_err.to_string(),
                        }));
                    }
                }
            }
        }

        dir_log.finish().await?;

        match first_err {
            Some(e) => Err(e),
            None => Ok(()),
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_candidate_matching() {
        assert!(is_candidate(Some(OsStr::new("a.txt")), ".txt"));
        assert!(is_candidate(Some(OsStr::new("notes.txt.bak")), ".txt"));
        assert!(!is_candidate(Some(OsStr::new("image.png")), ".txt"));
        assert!(!is_candidate(None, ".txt"));
    }

    #[test]
    fn test_candidate_matching_custom_marker() {
        assert!(is_candidate(Some(OsStr::new("readme.md")), ".md"));
        assert!(!is_candidate(Some(OsStr::new("readme.md")), ".txt"));
    }
}

//! Traversal driver: opens the two global sinks, seeds the root isolate,
//! and closes the sinks once the whole tree has drained.

use crate::config::WalkConfig;
use crate::error::{Result, WalkerError, WorkerError};
use crate::sink::{AuditSink, ContentSink};
use crate::walker::ancestry::Ancestry;
use crate::walker::isolate::{run_isolate, IsolateContext};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::{debug, info};

/// Statistics accumulated during the walk
#[derive(Debug, Default)]
pub struct WalkStats {
    pub dirs_visited: AtomicU64,
    pub files_concatenated: AtomicU64,
    pub bytes_copied: AtomicU64,
    pub skipped: AtomicU64,
}

impl WalkStats {
    pub fn record_dir(&self) {
        self.dirs_visited.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_file(&self, bytes: u64) {
        self.files_concatenated.fetch_add(1, Ordering::Relaxed);
        self.bytes_copied.fetch_add(bytes, Ordering::Relaxed);
    }

    pub fn record_skip(&self) {
        self.skipped.fetch_add(1, Ordering::Relaxed);
    }
}

/// Result of a completed walk
#[derive(Debug)]
pub struct WalkResult {
    pub dirs: u64,
    pub files: u64,
    pub bytes: u64,
    pub skipped: u64,
    pub duration: Duration,
}

/// Drives one full traversal: sink lifecycle plus the root isolate.
pub struct TraversalDriver {
    config: Arc<WalkConfig>,
    stats: Arc<WalkStats>,
}

impl TraversalDriver {
    pub fn new(config: WalkConfig) -> Self {
        Self {
            config: Arc::new(config),
            stats: Arc::new(WalkStats::default()),
        }
    }

    /// Run the walk to completion.
    ///
    /// Both global sinks are created (truncating) before the root isolate is
    /// seeded and closed only after its entire subtree has drained. Sink
    /// creation failure and any fatal error re-raised by an isolate abort
    /// the run.
    pub async fn run(&self) -> Result<WalkResult> {
        let start = Instant::now();

        let content = Arc::new(ContentSink::create(&self.config.output_path).await?);
        let audit = Arc::new(AuditSink::create(&self.config.audit_path).await?);

        info!(
            root = %self.config.root.display(),
            output = %content.path().display(),
            audit = %audit.path().display(),
            "Starting walk"
        );

        // The root isolate's identifier is the process id; its chain is the
        // single-segment seed every descendant extends.
        let root_id = std::process::id() as u64;
        let root_ctx = IsolateContext {
            dir: self.config.root.clone(),
            id: root_id,
            chain: Ancestry::root(root_id),
            config: Arc::clone(&self.config),
            content: Arc::clone(&content),
            audit: Arc::clone(&audit),
            stats: Arc::clone(&self.stats),
        };

        let root = tokio::spawn(run_isolate(root_ctx));
        match root.await {
            Ok(result) => result?,
            Err(join_err) => {
                return Err(WalkerError::Worker(WorkerError::Panicked {
                    id: root_id,
                    message: join_err.to_string(),
                }));
            }
        }

        debug!("Tree drained; closing sinks");
        content.finish().await?;
        audit.finish().await?;

        let result = WalkResult {
            dirs: self.stats.dirs_visited.load(Ordering::Relaxed),
            files: self.stats.files_concatenated.load(Ordering::Relaxed),
            bytes: self.stats.bytes_copied.load(Ordering::Relaxed),
            skipped: self.stats.skipped.load(Ordering::Relaxed),
            duration: start.elapsed(),
        };

        info!(
            dirs = result.dirs,
            files = result.files,
            bytes = result.bytes,
            skipped = result.skipped,
            duration_secs = result.duration.as_secs(),
            "Walk completed"
        );

        Ok(result)
    }
}

//! treecat - Concurrent directory-tree text concatenator
//!
//! Walks a directory tree and concatenates every matching text file into a
//! single consolidated output file, while producing a hierarchical audit
//! trail of who processed what.
//!
//! # Features
//!
//! - **Two-tier concurrency**: one independent task per directory (an
//!   "isolate") fans out one lightweight task per matching file (a
//!   "worker"). Siblings at every level run fully in parallel.
//!
//! - **Atomic appends**: the consolidated content file and the consolidated
//!   audit log are shared by every worker in the run; each append holds the
//!   sink's lock for exactly one complete block or record, so concurrent
//!   writes never interleave.
//!
//! - **Hierarchical audit**: every file record carries its depth below the
//!   root and the full chain of isolate identifiers from the root down to
//!   its directory; each visited directory additionally gets its own
//!   `<basename>.log` inside the directory.
//!
//! - **Skip, don't abort**: an unreadable file is logged and skipped; its
//!   siblings and ancestors are unaffected. Only setup failures (sinks,
//!   directory enumeration, directory logs) are fatal.
//!
//! # Architecture
//!
//! ```text
//! Driver ──▶ root isolate ──▶ { file workers | child isolates } ──▶ ...
//!                │                      │
//!                │                      ├──▶ Content Sink  (one lock)
//!                │                      ├──▶ Audit Sink    (one lock)
//!                │                      └──▶ Directory Log (one per dir)
//!                └── waits for the whole subtree before closing sinks
//! ```
//!
//! # Example
//!
//! ```bash
//! # Concatenate every .txt under /data/docs
//! treecat /data/docs
//!
//! # Custom artifacts and marker
//! treecat ./notes -o combined.txt --audit-log audit.log --marker .md
//! ```

pub mod config;
pub mod error;
pub mod progress;
pub mod sink;
pub mod walker;

pub use config::{CliArgs, WalkConfig};
pub use error::{Result, WalkerError};
pub use walker::{TraversalDriver, WalkResult, WalkStats};

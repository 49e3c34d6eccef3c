//! Concurrent tree traversal
//!
//! The traversal is a tree of tasks mirroring the directory tree:
//!
//! ```text
//!                  ┌──────────────────────┐
//!                  │   TraversalDriver    │
//!                  │  opens/closes sinks  │
//!                  └──────────┬───────────┘
//!                             │ spawn
//!                  ┌──────────▼───────────┐
//!                  │    root isolate      │
//!                  └──┬───────┬────────┬──┘
//!             spawn   │       │        │   spawn
//!        ┌────────────▼──┐ ┌──▼───┐ ┌──▼────────────┐
//!        │ child isolate │ │worker│ │ child isolate │
//!        │  (recursive)  │ │ a.txt│ │  (recursive)  │
//!        └───────────────┘ └──────┘ └───────────────┘
//! ```
//!
//! Isolates join their file workers first, then their child isolates, so a
//! directory's log closes only after everything beneath it has finished.

pub mod ancestry;
pub mod driver;
pub(crate) mod isolate;
pub(crate) mod worker;

pub use ancestry::{depth_below, next_worker_id, Ancestry};
pub use driver::{TraversalDriver, WalkResult, WalkStats};

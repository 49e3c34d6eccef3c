//! Worker identity and ancestry bookkeeping.
//!
//! Every isolate and file worker carries a numeric identifier; isolates
//! additionally carry the chain of identifiers from the root isolate down
//! to themselves. Chains are rendered as `>`-joined segments
//! (`"1000>1004>1007"`) and grow by exactly one segment per directory
//! level. Identifier values are not stable across runs.

use std::fmt;
use std::path::Path;
use std::sync::atomic::{AtomicU64, Ordering};

static NEXT_ID: AtomicU64 = AtomicU64::new(1);

/// Allocate a fresh worker identifier.
///
/// Offset from the process id so the root isolate (which reuses the process
/// id directly) and later workers share one identifier space.
pub fn next_worker_id() -> u64 {
    std::process::id() as u64 + NEXT_ID.fetch_add(1, Ordering::Relaxed)
}

/// An isolate's ancestry chain: the identifiers of every isolate from the
/// traversal root down to this one.
///
/// Chains are never mutated in place; a child chain is a fresh value
/// computed from the parent's chain plus the child's identifier, so sibling
/// isolates can never observe each other's extensions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ancestry {
    chain: String,
    segments: usize,
}

impl Ancestry {
    /// Chain for the root isolate: a single segment.
    pub fn root(id: u64) -> Self {
        Self {
            chain: id.to_string(),
            segments: 1,
        }
    }

    /// Chain for a child isolate: this chain plus one segment.
    pub fn child(&self, id: u64) -> Self {
        Self {
            chain: format!("{}>{}", self.chain, id),
            segments: self.segments + 1,
        }
    }

    pub fn as_str(&self) -> &str {
        &self.chain
    }

    /// Number of segments; always depth + 1 for an isolate at a given depth.
    pub fn segments(&self) -> usize {
        self.segments
    }
}

impl fmt::Display for Ancestry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.chain)
    }
}

/// Number of path components between `root` and `path`.
///
/// The root itself is at depth 0; a file's depth is the depth of its
/// containing directory. Paths outside the root fall back to 0, which can
/// only happen if the caller bypassed canonicalization.
pub fn depth_below(root: &Path, path: &Path) -> usize {
    path.strip_prefix(root)
        .map(|rel| rel.components().count())
        .unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_chain_lengthens_by_one_per_level() {
        let root = Ancestry::root(1000);
        assert_eq!(root.as_str(), "1000");
        assert_eq!(root.segments(), 1);

        let child = root.child(1004);
        let grandchild = child.child(1007);
        assert_eq!(child.as_str(), "1000>1004");
        assert_eq!(grandchild.as_str(), "1000>1004>1007");
        assert_eq!(grandchild.segments(), 3);

        // Extending a child never mutates the parent
        assert_eq!(root.as_str(), "1000");
    }

    #[test]
    fn test_depth_below() {
        let root = PathBuf::from("/data");
        assert_eq!(depth_below(&root, &root), 0);
        assert_eq!(depth_below(&root, &root.join("sub")), 1);
        assert_eq!(depth_below(&root, &root.join("sub/deeper")), 2);
    }

    #[test]
    fn test_depth_outside_root_is_zero() {
        let root = PathBuf::from("/data");
        assert_eq!(depth_below(&root, &PathBuf::from("/elsewhere")), 0);
    }

    #[test]
    fn test_worker_ids_unique() {
        let a = next_worker_id();
        let b = next_worker_id();
        assert_ne!(a, b);
    }
}

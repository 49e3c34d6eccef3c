//! Console output for the walk: the live worker tree, the run header, and
//! the end-of-run summary.

use crate::config::WalkConfig;
use crate::walker::WalkResult;
use console::style;
use humansize::{format_size, BINARY};
use std::fmt;
use std::path::Path;

/// The two kinds of concurrent unit in the tree rendering.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WorkerKind {
    /// A directory isolate
    Directory,
    /// A file worker
    File,
}

impl fmt::Display for WorkerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WorkerKind::Directory => write!(f, "directory worker"),
            WorkerKind::File => write!(f, "file worker"),
        }
    }
}

/// Render one tree line: 4 spaces of indent per depth level, then the
/// worker's kind, identifier, and path.
pub(crate) fn format_tree_line(depth: usize, kind: WorkerKind, id: u64, label: &Path) -> String {
    format!("{}|-- [{} {}] {}", "    ".repeat(depth), kind, id, label.display())
}

/// Print one line of the worker tree to the console.
///
/// A single `println!` holds the stdout lock for the whole line, so
/// concurrent workers never split a line.
pub fn tree_line(depth: usize, kind: WorkerKind, id: u64, label: &Path) {
    println!("{}", format_tree_line(depth, kind, id, label));
}

/// Print a header at the start of the walk.
pub fn print_header(config: &WalkConfig) {
    println!();
    println!(
        "{} {}",
        style("treecat").cyan().bold(),
        env!("CARGO_PKG_VERSION")
    );
    println!("{}", style("─".repeat(50)).dim());
    println!("  {} {}", style("Root:").bold(), config.root.display());
    println!("  {} {}", style("Marker:").bold(), config.marker);
    println!("  {} {}", style("Output:").bold(), config.output_path.display());
    println!("  {} {}", style("Audit Log:").bold(), config.audit_path.display());
    println!();
    println!("========== Directory & File Worker Tree ==========");
}

/// Print a summary of the walk results.
pub fn print_summary(config: &WalkConfig, result: &WalkResult) {
    let bytes_str = format_size(result.bytes, BINARY);

    println!();
    println!("{}", style("Concatenation Complete").green().bold());
    println!("{}", style("─".repeat(50)).dim());
    println!(
        "  {} {}",
        style("Directories:").bold(),
        format_number(result.dirs)
    );
    println!(
        "  {} {}",
        style("Files:").bold(),
        format_number(result.files)
    );
    println!("  {} {}", style("Total Size:").bold(), bytes_str);
    println!(
        "  {} {:.1}s",
        style("Duration:").bold(),
        result.duration.as_secs_f64()
    );
    if result.skipped > 0 {
        println!(
            "  {} {}",
            style("Skipped:").yellow().bold(),
            format_number(result.skipped)
        );
    }
    println!(
        "  {} {}",
        style("Output:").bold(),
        config.output_path.display()
    );
    println!(
        "  {} {}",
        style("Audit Log:").bold(),
        config.audit_path.display()
    );
    println!();
}

/// Format a number with thousands separators
fn format_number(n: u64) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_format_number() {
        assert_eq!(format_number(0), "0");
        assert_eq!(format_number(999), "999");
        assert_eq!(format_number(1000), "1,000");
        assert_eq!(format_number(1234567), "1,234,567");
    }

    #[test]
    fn test_tree_line_indentation() {
        let path = PathBuf::from("/data/sub");
        assert_eq!(
            format_tree_line(0, WorkerKind::Directory, 1000, &path),
            "|-- [directory worker 1000] /data/sub"
        );
        assert_eq!(
            format_tree_line(2, WorkerKind::File, 1007, &path),
            "        |-- [file worker 1007] /data/sub"
        );
    }
}

//! Configuration types for treecat
//!
//! This module defines:
//! - CLI argument parsing using clap derive macros
//! - Runtime configuration with validation

use crate::error::ConfigError;
use clap::Parser;
use std::path::PathBuf;

/// Default content sink path
pub const DEFAULT_OUTPUT: &str = "output.txt";

/// Default audit sink path
pub const DEFAULT_AUDIT_LOG: &str = "full_log.log";

/// Default eligibility marker: any file whose name contains this substring
/// is concatenated
pub const DEFAULT_MARKER: &str = ".txt";

/// Concurrent directory-tree text concatenator
#[derive(Parser, Debug, Clone)]
#[command(
    name = "treecat",
    version,
    about = "Concatenates all text files under a directory tree into one output file",
    long_about = "Walks a directory tree with one concurrent task per directory and one \
                  lightweight task per matching file.\n\n\
                  Every matching file's content is appended to a single consolidated \
                  output file, a consolidated audit log records who processed what, and \
                  each visited directory receives its own local log.",
    after_help = "EXAMPLES:\n    \
        treecat /data/docs\n    \
        treecat ./notes -o combined.txt --audit-log audit.log\n    \
        treecat /srv/texts --marker .md -q"
)]
pub struct CliArgs {
    /// Root directory to walk
    #[arg(value_name = "ROOT")]
    pub root: PathBuf,

    /// Consolidated content output file
    #[arg(short, long, default_value = DEFAULT_OUTPUT, value_name = "FILE")]
    pub output: PathBuf,

    /// Consolidated audit log file
    #[arg(long, default_value = DEFAULT_AUDIT_LOG, value_name = "FILE")]
    pub audit_log: PathBuf,

    /// Substring a file name must contain to be concatenated
    #[arg(long, default_value = DEFAULT_MARKER, value_name = "SUBSTR")]
    pub marker: String,

    /// Quiet mode - suppress the console tree and summary
    #[arg(short = 'q', long)]
    pub quiet: bool,

    /// Verbose output (show skipped entries and per-worker events)
    #[arg(short = 'v', long)]
    pub verbose: bool,
}

/// Validated runtime configuration
#[derive(Debug, Clone)]
pub struct WalkConfig {
    /// Traversal root; canonicalized to an absolute path
    pub root: PathBuf,

    /// Content sink path
    pub output_path: PathBuf,

    /// Audit sink path
    pub audit_path: PathBuf,

    /// Eligibility marker substring
    pub marker: String,

    /// Suppress console tree output
    pub quiet: bool,
}

impl WalkConfig {
    /// Validate CLI arguments and build the runtime configuration.
    ///
    /// The root is canonicalized here so every depth computation downstream
    /// works against a stable absolute prefix.
    pub fn from_args(args: CliArgs) -> Result<Self, ConfigError> {
        if args.marker.is_empty() {
            return Err(ConfigError::EmptyMarker);
        }

        let meta = std::fs::metadata(&args.root).map_err(|_| ConfigError::RootNotFound {
            path: args.root.clone(),
        })?;
        if !meta.is_dir() {
            return Err(ConfigError::RootNotADirectory { path: args.root });
        }

        let root = args
            .root
            .canonicalize()
            .map_err(|_| ConfigError::RootNotFound { path: args.root })?;

        Ok(Self {
            root,
            output_path: args.output,
            audit_path: args.audit_log,
            marker: args.marker,
            quiet: args.quiet,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args_for(root: PathBuf) -> CliArgs {
        CliArgs {
            root,
            output: PathBuf::from(DEFAULT_OUTPUT),
            audit_log: PathBuf::from(DEFAULT_AUDIT_LOG),
            marker: DEFAULT_MARKER.to_string(),
            quiet: true,
            verbose: false,
        }
    }

    #[test]
    fn test_missing_root_rejected() {
        let args = args_for(PathBuf::from("/definitely/not/a/real/path"));
        let err = WalkConfig::from_args(args).unwrap_err();
        assert!(matches!(err, ConfigError::RootNotFound { .. }));
    }

    #[test]
    fn test_file_root_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("plain.txt");
        std::fs::write(&file, "x").unwrap();

        let args = args_for(file);
        let err = WalkConfig::from_args(args).unwrap_err();
        assert!(matches!(err, ConfigError::RootNotADirectory { .. }));
    }

    #[test]
    fn test_empty_marker_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let mut args = args_for(dir.path().to_path_buf());
        args.marker = String::new();
        let err = WalkConfig::from_args(args).unwrap_err();
        assert!(matches!(err, ConfigError::EmptyMarker));
    }

    #[test]
    fn test_valid_config_canonicalizes_root() {
        let dir = tempfile::tempdir().unwrap();
        let args = args_for(dir.path().to_path_buf());
        let config = WalkConfig::from_args(args).unwrap();
        assert!(config.root.is_absolute());
        assert_eq!(config.marker, ".txt");
    }
}

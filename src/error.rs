use std::io;
use thiserror::Error;

/// failures surfaced to the per-unit handlers in the pipeline
///
/// missing snapshot files and an unreachable commit-listing service are not
/// represented here: both are absorbed where they occur (a logged warning,
/// an empty commit list) rather than propagated
#[derive(Debug, Error)]
pub enum MinerError {
    /// a git binary invocation exited non-zero or produced unusable output
    #[error("git {op} failed: {detail}")]
    Vcs { op: &'static str, detail: String },

    /// a libgit2 read operation failed (bad rev, unreadable object)
    #[error(transparent)]
    Git(#[from] git2::Error),

    #[error(transparent)]
    Io(#[from] io::Error),

    /// the scan engine exited abnormally or produced an unparseable report
    #[error("scan failed: {0}")]
    Scan(String),

    /// repository URL with fewer than two path segments
    #[error("invalid repository url: {0}")]
    InvalidRepoUrl(String),
}

impl MinerError {
    pub fn vcs(op: &'static str, detail: impl Into<String>) -> Self {
        MinerError::Vcs {
            op,
            detail: detail.into(),
        }
    }
}

// src/error.rs
// =============================================================================
// Error types for the mirror engine.
//
// Two kinds of failure exist during a run:
// - Fatal: the run cannot continue (seed unreachable, disk write failed,
//   bad options). These are returned from Mirror::run.
// - Non-fatal: one page, one resource, or one link is skipped. These are
//   logged with the offending URL and the crawl moves on.
//
// The binary (main.rs) wraps these in anyhow for context and exit codes.
// =============================================================================

use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum MirrorError {
    /// The seed page could not be fetched at all
    #[error("seed page {url} is unreachable: {reason}")]
    SeedUnreachable { url: String, reason: String },

    /// A non-seed page failed to fetch or answered with a non-200 status
    #[error("failed to fetch page {url}: {reason}")]
    PageFetchFailed { url: String, reason: String },

    /// An embedded resource could not be downloaded
    #[error("failed to fetch resource {url}: {reason}")]
    ResourceFetchFailed { url: String, reason: String },

    /// A link could not be turned into an absolute URL
    #[error("cannot resolve link {url}: {source}")]
    UrlResolutionFailed {
        url: String,
        #[source]
        source: url::ParseError,
    },

    /// Reading or writing a file in the output folder failed
    #[error("filesystem error on {}: {source}", .path.display())]
    FilesystemWriteFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Construction parameters were rejected before the run started
    #[error("invalid options: {0}")]
    InvalidOptions(String),
}

impl MirrorError {
    // Whether this error must abort the whole run
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            MirrorError::SeedUnreachable { .. }
                | MirrorError::FilesystemWriteFailed { .. }
                | MirrorError::InvalidOptions(_)
        )
    }

    pub(crate) fn write_failed(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        MirrorError::FilesystemWriteFailed {
            path: path.into(),
            source,
        }
    }
}

pub type Result<T> = std::result::Result<T, MirrorError>;

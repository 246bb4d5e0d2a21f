// src/mirror/options.rs
// =============================================================================
// Construction parameters for one mirror run.
//
// MirrorOptions is built by the CLI (or directly in tests) and checked with
// validate() before any request is made.
// =============================================================================

use crate::error::{MirrorError, Result};
use std::path::PathBuf;
use url::Url;

const DEFAULT_RESOURCE_CONCURRENCY: usize = 8;

// Which fetched pages are written to disk
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ScopeMode {
    /// Every page within the level limit is saved
    #[default]
    WholeWeb,
    /// Only pages on the seed's host are saved (the seed itself always is)
    CurrentDomainOnly,
}

// Dot-prefixed extensions excluded from resource downloads, e.g. ".css.map"
//
// Matching is substring containment on the raw string, so ".css.map"
// excludes both ".css" and ".map".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExtensionFilter(String);

impl ExtensionFilter {
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    pub fn excludes(&self, extension: &str) -> bool {
        !self.0.is_empty() && self.0.contains(extension)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

#[derive(Debug, Clone)]
pub struct MirrorOptions {
    pub seed_url: String,
    pub folder: PathBuf,
    pub max_level: usize,
    /// None means no filter was supplied; Some("") is rejected
    pub extension_filter: Option<ExtensionFilter>,
    pub scope: ScopeMode,
    /// Skip requests for page URLs already fetched in this run
    pub dedupe_fetches: bool,
    /// Upper bound on simultaneous resource downloads for one page
    pub resource_concurrency: usize,
}

impl MirrorOptions {
    pub fn new(seed_url: impl Into<String>, folder: impl Into<PathBuf>, max_level: usize) -> Self {
        Self {
            seed_url: seed_url.into(),
            folder: folder.into(),
            max_level,
            extension_filter: None,
            scope: ScopeMode::default(),
            dedupe_fetches: false,
            resource_concurrency: DEFAULT_RESOURCE_CONCURRENCY,
        }
    }

    pub fn with_filter(mut self, filter: impl Into<String>) -> Self {
        self.extension_filter = Some(ExtensionFilter::new(filter));
        self
    }

    pub fn with_scope(mut self, scope: ScopeMode) -> Self {
        self.scope = scope;
        self
    }

    pub fn with_dedupe_fetches(mut self, dedupe: bool) -> Self {
        self.dedupe_fetches = dedupe;
        self
    }

    pub fn with_resource_concurrency(mut self, limit: usize) -> Self {
        self.resource_concurrency = limit;
        self
    }

    // The filter in effect (empty when none was supplied)
    pub fn filter(&self) -> ExtensionFilter {
        self.extension_filter.clone().unwrap_or_default()
    }

    pub fn validate(&self) -> Result<()> {
        if self.seed_url.is_empty() {
            return Err(invalid("seed URL is empty"));
        }

        let seed = Url::parse(&self.seed_url)
            .map_err(|e| invalid(format!("seed URL '{}' is not valid: {}", self.seed_url, e)))?;
        if seed.host_str().is_none() {
            return Err(invalid(format!("seed URL '{}' has no host", self.seed_url)));
        }

        if self.folder.as_os_str().is_empty() {
            return Err(invalid("output folder is empty"));
        }
        if !self.folder.is_dir() {
            return Err(invalid(format!(
                "output folder '{}' does not exist or is not a directory",
                self.folder.display()
            )));
        }

        if matches!(&self.extension_filter, Some(filter) if filter.is_empty()) {
            return Err(invalid("extension filter is empty"));
        }

        if self.resource_concurrency == 0 {
            return Err(invalid("resource concurrency must be at least 1"));
        }

        Ok(())
    }
}

fn invalid(message: impl Into<String>) -> MirrorError {
    MirrorError::InvalidOptions(message.into())
}

// src/mirror/mod.rs
// =============================================================================
// This module mirrors a website into a local folder.
//
// Submodules, leaves first:
// - url: resolves relative links, extracts hosts for domain scoping
// - link: queue entries and the explicit per-page context
// - rewrite: patches saved parent pages to point at local copies
// - store: which pages are saved, and as which {n}.html file
// - resources: downloads images/scripts/stylesheets once per file name
// - scheduler: breadth-first queue, level limit, domain scope
// - driver: runs the crawl loop end to end
// - options: construction parameters and their validation
// =============================================================================

mod driver;
mod link;
mod options;
mod resources;
mod rewrite;
mod scheduler;
mod store;
pub mod url;

#[cfg(test)]
pub(crate) mod testing;

pub use driver::{Mirror, MirrorSummary};
pub use link::{PageContext, PendingLink};
pub use options::{ExtensionFilter, MirrorOptions, ScopeMode};
pub use resources::{DownloadedFiles, ResourceFetcher};
pub use rewrite::rewrite_links;
pub use scheduler::{CrawlState, Scheduler};
pub use store::{PageStore, SaveOutcome, SavedPage};

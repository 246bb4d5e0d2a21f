// src/lib.rs
// =============================================================================
// site-mirror: download a website into a local folder for offline browsing.
//
// Starting from a seed URL, pages are fetched breadth-first up to a maximum
// link depth, saved as {0,1,2,...}.html, and links between saved pages are
// rewritten to point at the local files. Embedded resources (images,
// scripts, stylesheets) are downloaded next to them.
//
// Modules:
// - mirror: the crawl engine (queue, store, rewriter, resource downloads)
// - transport: HTTP GET behind a trait, reqwest in production
// - extract: finds hyperlinks and resource URLs in HTML
// - error: MirrorError and the crate Result alias
// =============================================================================

pub mod error;
pub mod extract;
pub mod mirror;
pub mod transport;

pub use error::{MirrorError, Result};
pub use mirror::{Mirror, MirrorOptions, MirrorSummary, ScopeMode};
pub use transport::{HttpTransport, Transport};

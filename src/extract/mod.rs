// src/extract/mod.rs
// =============================================================================
// Markup inspection: "given markup, return the hyperlink targets and the
// embedded-resource URLs".
//
// The crawl engine never looks inside HTML itself; it calls extract() and
// works with plain strings from there on.
// =============================================================================

mod html;

pub use html::{extract, Extracted};

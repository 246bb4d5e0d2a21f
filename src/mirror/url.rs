// src/mirror/url.rs
// =============================================================================
// URL resolution for the mirror.
//
// Resolution is deliberately minimal: a relative link is glued onto the URL
// of the page that referenced it. The only normalization is collapsing the
// doubled "/" when the parent ends with one and the link starts with one.
//
//   "https://a.com/x/" + "/y/z.html" -> "https://a.com/x/y/z.html"
//   "https://a.com/x"  + "y.html"    -> "https://a.com/xy.html"
//
// No dot-segment collapsing, no query or fragment stripping. The local
// pages are rewritten by literal text replacement, so the URL strings
// produced here must stay predictable from the markup alone.
// =============================================================================

use crate::error::{MirrorError, Result};
use url::Url;

// Links that start with "http" are treated as already absolute
pub fn has_scheme(link: &str) -> bool {
    link.starts_with("http")
}

// Concatenates a relative link onto its parent URL without validating it
//
// Absolute links come back unchanged.
pub fn join(candidate: &str, parent: &str) -> String {
    if has_scheme(candidate) {
        return candidate.to_string();
    }

    match candidate.strip_prefix('/') {
        Some(rest) if parent.ends_with('/') => format!("{}{}", parent, rest),
        _ => format!("{}{}", parent, candidate),
    }
}

// Resolves a link against its parent and checks the result parses
//
// Errors here are non-fatal: the caller logs and skips the link.
pub fn resolve(candidate: &str, parent: &str) -> Result<String> {
    let joined = join(candidate, parent);

    match Url::parse(&joined) {
        Ok(_) => Ok(joined),
        Err(source) => Err(MirrorError::UrlResolutionFailed {
            url: joined,
            source,
        }),
    }
}

// Host component used for "same site" comparisons
pub fn registrable_host(absolute_url: &str) -> Result<String> {
    let parsed = Url::parse(absolute_url).map_err(|source| MirrorError::UrlResolutionFailed {
        url: absolute_url.to_string(),
        source,
    })?;

    parsed
        .host_str()
        .map(str::to_string)
        .ok_or_else(|| MirrorError::UrlResolutionFailed {
            url: absolute_url.to_string(),
            source: url::ParseError::EmptyHost,
        })
}

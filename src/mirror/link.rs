// src/mirror/link.rs
// =============================================================================
// Queue entries and the per-iteration page context.
//
// A PendingLink is what the scheduler queues: the link text exactly as it
// appeared in the markup, plus where it came from. When it is dequeued it
// becomes a PageContext, with its URL resolved. The context is passed
// explicitly through fetch, save, and expansion.
// =============================================================================

use super::url;
use crate::error::Result;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingLink {
    /// Link target, possibly relative until dequeued
    pub full_url: String,
    /// Absolute URL of the referring page, empty for the seed
    pub parent_url: String,
    /// Hops from the seed (seed = 0)
    pub level: usize,
}

impl PendingLink {
    pub fn seed(url: impl Into<String>) -> Self {
        Self {
            full_url: url.into(),
            parent_url: String::new(),
            level: 0,
        }
    }

    // A link discovered on `parent`, one level deeper
    pub fn child(href: impl Into<String>, parent: &PageContext) -> Self {
        Self {
            full_url: href.into(),
            parent_url: parent.full_url.clone(),
            level: parent.level + 1,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageContext {
    /// Link text before resolution; None when it was already absolute
    pub original_url: Option<String>,
    /// Canonical absolute URL (dedup key)
    pub full_url: String,
    pub parent_url: String,
    pub level: usize,
}

impl PageContext {
    pub fn resolve(link: PendingLink) -> Result<Self> {
        let original_url = if url::has_scheme(&link.full_url) {
            None
        } else {
            Some(link.full_url.clone())
        };
        let full_url = url::resolve(&link.full_url, &link.parent_url)?;

        Ok(Self {
            original_url,
            full_url,
            parent_url: link.parent_url,
            level: link.level,
        })
    }

    pub fn is_seed(&self) -> bool {
        self.level == 0
    }

    // Text to look for in the parent page when pointing it at our local copy
    pub fn match_text(&self) -> &str {
        match &self.original_url {
            Some(original) if !original.is_empty() => original,
            _ => &self.full_url,
        }
    }
}

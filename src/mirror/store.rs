// src/mirror/store.rs
// =============================================================================
// The page store: which pages are on disk, and where.
//
// - Each distinct full URL is saved at most once, as {n}.html
// - n counts successful saves only (0, 1, 2, ... with no gaps)
// - Saving a child patches its parent's file so the link points at the
//   child's local copy (see rewrite.rs)
//
// Records are kept in save order for the lifetime of the run and never
// changed once created. Only the files they point at are patched.
// =============================================================================

use super::link::PageContext;
use super::rewrite::rewrite_links;
use crate::error::{MirrorError, Result};
use std::collections::HashMap;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SavedPage {
    pub original_url: Option<String>,
    pub full_url: String,
    pub parent_url: String,
    pub level: usize,
    pub local_path: PathBuf,
    /// None when the parent was never saved (filtered out, or not yet seen)
    pub parent_local_path: Option<PathBuf>,
}

#[derive(Debug)]
pub enum SaveOutcome<'a> {
    Saved(&'a SavedPage),
    AlreadyExists(&'a SavedPage),
}

#[derive(Debug)]
pub struct PageStore {
    folder: PathBuf,
    pages: Vec<SavedPage>,
    // full_url -> index into `pages`
    by_url: HashMap<String, usize>,
}

impl PageStore {
    pub fn new(folder: impl Into<PathBuf>) -> Self {
        Self {
            folder: folder.into(),
            pages: Vec::new(),
            by_url: HashMap::new(),
        }
    }

    pub fn get(&self, full_url: &str) -> Option<&SavedPage> {
        self.by_url.get(full_url).and_then(|&i| self.pages.get(i))
    }

    pub fn contains(&self, full_url: &str) -> bool {
        self.by_url.contains_key(full_url)
    }

    // Saved pages in save order
    pub fn pages(&self) -> &[SavedPage] {
        &self.pages
    }

    pub fn len(&self) -> usize {
        self.pages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pages.is_empty()
    }

    fn local_path_of(&self, full_url: &str) -> Option<&Path> {
        self.get(full_url).map(|page| page.local_path.as_path())
    }

    // Writes the page unless its URL was saved before
    //
    // Write and rewrite failures are fatal for the run.
    pub async fn save(&mut self, page: &PageContext, markup: &str) -> Result<SaveOutcome<'_>> {
        if let Some(&index) = self.by_url.get(&page.full_url) {
            ::log::debug!("Already saved, skipping {}", page.full_url);
            return Ok(SaveOutcome::AlreadyExists(&self.pages[index]));
        }

        // Numbering follows save order, so it stays gapless
        let local_path = self.folder.join(format!("{}.html", self.pages.len()));
        ::log::info!("Saving {} as {}", page.full_url, local_path.display());

        tokio::fs::write(&local_path, markup)
            .await
            .map_err(|e| MirrorError::write_failed(&local_path, e))?;

        // None when the parent was never saved (seed, or a page outside the
        // domain scope); rewrite_links then leaves everything untouched
        let parent_local_path = self.local_path_of(&page.parent_url).map(Path::to_path_buf);

        // The parent's copy still carries the link exactly as written in
        // its markup; swap every occurrence for the new local file
        if !page.parent_url.is_empty() {
            let replacement = local_path.to_string_lossy();
            rewrite_links(parent_local_path.as_deref(), page.match_text(), &replacement).await?;
        }

        let index = self.pages.len();
        self.pages.push(SavedPage {
            original_url: page.original_url.clone(),
            full_url: page.full_url.clone(),
            parent_url: page.parent_url.clone(),
            level: page.level,
            local_path,
            parent_local_path,
        });
        self.by_url.insert(page.full_url.clone(), index);

        Ok(SaveOutcome::Saved(&self.pages[index]))
    }
}

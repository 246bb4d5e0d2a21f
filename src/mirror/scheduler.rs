// src/mirror/scheduler.rs
// =============================================================================
// The crawl scheduler: queue, policy, and the crawl's mutable state.
//
// How it works:
// 1. The seed goes into a FIFO queue at level 0
// 2. Links are dequeued in order, so all of level N is processed before
//    level N+1 (breadth-first)
// 3. A link is resolved against its parent only when it is dequeued
// 4. After a page is fetched, the scheduler decides whether to keep it
//    (domain scope) and whether to queue its links (level limit)
//
// One scheduler per run. It owns everything the run mutates: the queue,
// the page store, and the set of downloaded file names. Nothing here is
// shared between threads.
//
// Every occurrence of a link is queued, even if the same URL was queued
// before. Duplicates are fetched again and only dropped when saving,
// unless dedupe_fetches is turned on.
// =============================================================================

use super::link::{PageContext, PendingLink};
use super::options::{MirrorOptions, ScopeMode};
use super::resources::DownloadedFiles;
use super::store::PageStore;
use super::url;
use crate::error::{MirrorError, Result};
use std::collections::{HashSet, VecDeque};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CrawlState {
    Idle,
    Running,
    Done,
}

#[derive(Debug)]
pub struct Scheduler {
    state: CrawlState,
    queue: VecDeque<PendingLink>,
    store: PageStore,
    downloaded: DownloadedFiles,
    max_level: usize,
    scope: ScopeMode,
    seed_host: String,
    // Only populated when dedupe_fetches is on
    fetched: Option<HashSet<String>>,
}

impl Scheduler {
    pub fn new(options: &MirrorOptions) -> Result<Self> {
        options.validate()?;
        let seed_host = url::registrable_host(&options.seed_url)?;

        let mut queue = VecDeque::new();
        queue.push_back(PendingLink::seed(options.seed_url.clone()));

        Ok(Self {
            state: CrawlState::Idle,
            queue,
            store: PageStore::new(&options.folder),
            downloaded: DownloadedFiles::new(),
            max_level: options.max_level,
            scope: options.scope,
            seed_host,
            fetched: options.dedupe_fetches.then(HashSet::new),
        })
    }

    pub fn state(&self) -> CrawlState {
        self.state
    }

    // Idle -> Running; a scheduler only runs once
    pub fn start(&mut self) -> Result<()> {
        if self.state != CrawlState::Idle {
            return Err(MirrorError::InvalidOptions(
                "this crawl has already been started".to_string(),
            ));
        }
        self.state = CrawlState::Running;
        Ok(())
    }

    // Dequeues and resolves the next page to fetch
    //
    // Links that fail to resolve are logged and skipped. Returns None once
    // the queue is empty, which moves the crawl to Done.
    pub fn next_page(&mut self) -> Option<PageContext> {
        while let Some(link) = self.queue.pop_front() {
            let page = match PageContext::resolve(link) {
                Ok(page) => page,
                Err(e) => {
                    ::log::warn!("{}", e);
                    continue;
                }
            };

            if let Some(fetched) = &mut self.fetched {
                if !fetched.insert(page.full_url.clone()) {
                    ::log::debug!("Already fetched, skipping {}", page.full_url);
                    continue;
                }
            }

            return Some(page);
        }

        self.state = CrawlState::Done;
        None
    }

    // Whether a fetched page should be written to disk
    pub fn accepts(&self, page: &PageContext) -> bool {
        if self.scope == ScopeMode::WholeWeb || page.is_seed() {
            return true;
        }

        match url::registrable_host(&page.full_url) {
            Ok(host) => host == self.seed_host,
            Err(e) => {
                ::log::warn!("{}", e);
                false
            }
        }
    }

    // Whether a page's own links should be followed
    pub fn should_expand(&self, page: &PageContext) -> bool {
        page.level < self.max_level
    }

    // Queues every hyperlink found on `page`, unvalidated
    pub fn enqueue_links(&mut self, page: &PageContext, hyperlinks: Vec<String>) -> usize {
        let count = hyperlinks.len();
        self.queue.extend(
            hyperlinks
                .into_iter()
                .map(|href| PendingLink::child(href, page)),
        );

        ::log::debug!(
            "Queued {} link(s) from {} at level {} ({} pending)",
            count,
            page.full_url,
            page.level + 1,
            self.queue.len()
        );
        count
    }

    pub fn store(&self) -> &PageStore {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut PageStore {
        &mut self.store
    }

    pub fn downloaded_mut(&mut self) -> &mut DownloadedFiles {
        &mut self.downloaded
    }
}

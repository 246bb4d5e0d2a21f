// src/mirror/driver.rs
// =============================================================================
// The crawl driver: runs the scheduler loop end to end.
//
// For each dequeued page, strictly one page at a time:
// 1. GET the page (non-200 or failure -> log and move on; a failed seed
//    aborts the run)
// 2. Save it if the scheduler accepts it (domain scope)
// 3. Queue its links if it is below the level limit
// 4. Download its embedded resources, whether or not it was saved
//
// The next page is dequeued only after all four steps finished, including
// every resource download of the current page.
// =============================================================================

use super::link::PageContext;
use super::options::MirrorOptions;
use super::resources::ResourceFetcher;
use super::scheduler::{CrawlState, Scheduler};
use crate::error::{MirrorError, Result};
use crate::extract::extract;
use crate::transport::{StatusCode, Transport};

// Counts reported when a run finishes
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MirrorSummary {
    /// Pages that answered 200 OK
    pub pages_fetched: usize,
    /// Pages written as {n}.html
    pub pages_saved: usize,
    /// Resource files written
    pub resources_saved: usize,
}

pub struct Mirror<T: Transport> {
    transport: T,
    scheduler: Scheduler,
    resources: ResourceFetcher,
    summary: MirrorSummary,
}

impl<T: Transport> Mirror<T> {
    pub fn new(options: MirrorOptions, transport: T) -> Result<Self> {
        let scheduler = Scheduler::new(&options)?;
        let resources = ResourceFetcher::new(
            &options.folder,
            options.filter(),
            options.resource_concurrency,
        );

        Ok(Self {
            transport,
            scheduler,
            resources,
            summary: MirrorSummary::default(),
        })
    }

    pub fn scheduler(&self) -> &Scheduler {
        &self.scheduler
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    pub fn state(&self) -> CrawlState {
        self.scheduler.state()
    }

    // Crawls until the queue is empty
    //
    // Returns early only on fatal errors: unreachable seed or a failed
    // write to the output folder.
    pub async fn run(&mut self) -> Result<MirrorSummary> {
        self.scheduler.start()?;

        while let Some(page) = self.scheduler.next_page() {
            self.process(page).await?;
        }

        self.summary.pages_saved = self.scheduler.store().len();
        ::log::info!(
            "Mirror finished: {} page(s) fetched, {} saved, {} resource(s) downloaded",
            self.summary.pages_fetched,
            self.summary.pages_saved,
            self.summary.resources_saved
        );
        Ok(self.summary)
    }

    async fn process(&mut self, page: PageContext) -> Result<()> {
        // None means the page was abandoned (bad status, unreachable);
        // nothing below runs for it and its links are never queued
        let Some(markup) = self.fetch_page(&page).await? else {
            return Ok(());
        };
        self.summary.pages_fetched += 1;

        // Domain scope only decides whether the page is written. A rejected
        // page still has its links followed and its resources downloaded.
        if self.scheduler.accepts(&page) {
            self.scheduler.store_mut().save(&page, &markup).await?;
        } else {
            ::log::warn!("{} is outside the seed's domain, not saving it", page.full_url);
        }

        let extracted = extract(&markup);

        // Pages at max_level are saved, but their links stay unexplored
        if self.scheduler.should_expand(&page) {
            self.scheduler.enqueue_links(&page, extracted.hyperlinks);
        }

        // Resolved against this page's URL; awaited in full before the
        // next page is dequeued
        let written = self
            .resources
            .fetch_all(
                &self.transport,
                &extracted.resources,
                &page.full_url,
                self.scheduler.downloaded_mut(),
            )
            .await?;
        self.summary.resources_saved += written;

        Ok(())
    }

    // The page body, or None when this URL is abandoned
    async fn fetch_page(&self, page: &PageContext) -> Result<Option<String>> {
        ::log::info!("GET {} (level {})", page.full_url, page.level);

        let response = match self.transport.get(&page.full_url).await {
            Ok(response) => response,
            Err(e) if page.is_seed() => {
                return Err(MirrorError::SeedUnreachable {
                    url: page.full_url.clone(),
                    reason: e.to_string(),
                });
            }
            Err(e) => {
                let err = MirrorError::PageFetchFailed {
                    url: page.full_url.clone(),
                    reason: e.to_string(),
                };
                ::log::warn!("{}", err);
                return Ok(None);
            }
        };

        ::log::info!("GET {} finished with {}", page.full_url, response.status);

        if response.status != StatusCode::OK {
            let err = MirrorError::PageFetchFailed {
                url: page.full_url.clone(),
                reason: format!("HTTP {}", response.status.as_u16()),
            };
            ::log::warn!("{}", err);
            return Ok(None);
        }

        Ok(Some(String::from_utf8_lossy(&response.body).into_owned()))
    }
}

// src/mirror/resources.rs
// =============================================================================
// Downloads embedded resources (images, scripts, stylesheets) next to the
// saved pages.
//
// Rules, in the order they are applied to each resource URL:
// 1. A relative URL is requested twice: joined onto the page URL, and raw
// 2. The query string is dropped; the file name is what follows the last "/"
// 3. No "." in the file name -> skipped, never requested
// 4. Extension listed in the filter -> skipped (intentional, not an error)
// 5. File name already downloaded this run -> skipped (first one wins,
//    even if the two URLs point at different content)
// 6. Fetch failures are logged and skipped
//
// Rules 4 and 5 are checked before the request so no bandwidth is spent on
// files that would be thrown away.
//
// Requests for one page run concurrently (bounded), but results are written
// in discovery order from the crawl loop, so "first one wins" is stable.
// =============================================================================

use super::options::ExtensionFilter;
use super::url;
use crate::error::{MirrorError, Result};
use crate::transport::{Response, Transport, TransportError};
use futures::stream::{self, StreamExt};
use std::collections::HashSet;
use std::path::PathBuf;

// File names already written to the output folder during this run
pub type DownloadedFiles = HashSet<String>;

#[derive(Debug, Clone, PartialEq, Eq)]
struct Download {
    url: String,
    file_name: String,
}

#[derive(Debug, Clone)]
pub struct ResourceFetcher {
    folder: PathBuf,
    filter: ExtensionFilter,
    concurrency: usize,
}

impl ResourceFetcher {
    pub fn new(folder: impl Into<PathBuf>, filter: ExtensionFilter, concurrency: usize) -> Self {
        Self {
            folder: folder.into(),
            filter,
            concurrency: concurrency.max(1),
        }
    }

    // Downloads one resource referenced from the page at `base_url`
    pub async fn fetch<T: Transport>(
        &self,
        transport: &T,
        resource_url: &str,
        base_url: &str,
        downloaded: &mut DownloadedFiles,
    ) -> Result<usize> {
        self.fetch_all(transport, &[resource_url.to_string()], base_url, downloaded)
            .await
    }

    // Downloads every resource of one page; returns how many files were written
    //
    // Only filesystem errors are returned; fetch failures are logged.
    pub async fn fetch_all<T: Transport>(
        &self,
        transport: &T,
        resource_urls: &[String],
        base_url: &str,
        downloaded: &mut DownloadedFiles,
    ) -> Result<usize> {
        // Step 1: turn every reference into the request(s) worth making.
        // A relative "img.png" becomes two requests (joined and raw), and
        // anything filtered or already on disk drops out here.
        let planned = resource_urls
            .iter()
            .flat_map(|resource| request_urls(resource, base_url))
            .filter_map(|request| self.plan(request, downloaded))
            .collect::<Vec<_>>();

        if planned.is_empty() {
            return Ok(0);
        }

        // `buffered` keeps results in request order while up to `concurrency`
        // requests are in flight
        let fetched = stream::iter(planned.into_iter().map(|download| async move {
            let result = transport.get(&download.url).await;
            (download, result)
        }))
        .buffered(self.concurrency)
        .collect::<Vec<_>>()
        .await;

        // Step 2: write the results one by one, in discovery order.
        // This is the only place `downloaded` is modified, so the first
        // successful URL for a file name wins even though the requests
        // above ran concurrently.
        let mut written = 0;
        for (download, result) in fetched {
            let body = match accept(&download.url, result) {
                Ok(body) => body,
                Err(e) => {
                    ::log::warn!("{}", e);
                    continue;
                }
            };

            // insert() returns false when the name was already taken, e.g.
            // by the joined request for the same relative reference
            if !downloaded.insert(download.file_name.clone()) {
                ::log::debug!("Already downloaded {}, skipping {}", download.file_name, download.url);
                continue;
            }

            // A failed write is fatal for the run (the output folder is broken)
            let path = self.folder.join(&download.file_name);
            tokio::fs::write(&path, body)
                .await
                .map_err(|e| MirrorError::write_failed(&path, e))?;

            ::log::info!("Downloaded {} -> {}", download.url, path.display());
            written += 1;
        }

        Ok(written)
    }

    // Decides whether a request is worth making
    fn plan(&self, url: String, downloaded: &DownloadedFiles) -> Option<Download> {
        // The query string is dropped from the request itself, not only
        // from the file name: "logo.png?v=3" is fetched as "logo.png"
        let url = strip_query(&url).to_string();

        let Some(file_name) = file_name(&url) else {
            ::log::debug!("No file name with an extension in {}, skipping", url);
            return None;
        };

        if self.filter.excludes(extension(&file_name)) {
            ::log::info!("File {} not downloaded: its extension is filtered", file_name);
            return None;
        }

        if downloaded.contains(&file_name) {
            ::log::debug!("Already downloaded {}, skipping {}", file_name, url);
            return None;
        }

        Some(Download { url, file_name })
    }
}

// The URLs actually requested for one resource reference
pub fn request_urls(resource_url: &str, base_url: &str) -> Vec<String> {
    if url::has_scheme(resource_url) {
        vec![resource_url.to_string()]
    } else {
        vec![url::join(resource_url, base_url), resource_url.to_string()]
    }
}

// Local file name for a resource URL, if it has a usable one
pub fn file_name(resource_url: &str) -> Option<String> {
    let name = strip_query(resource_url)
        .rsplit('/')
        .next()
        .unwrap_or_default();

    if !name.contains('.') || name == "." || name == ".." {
        return None;
    }
    Some(name.to_string())
}

// Everything before the first "?"
pub fn strip_query(resource_url: &str) -> &str {
    resource_url.split('?').next().unwrap_or_default()
}

// ".png" for "img.png", ".gz" for "a.tar.gz"
fn extension(file_name: &str) -> &str {
    file_name
        .rfind('.')
        .map(|i| &file_name[i..])
        .unwrap_or_default()
}

// Only 2xx responses count as a downloaded resource
fn accept(url: &str, result: std::result::Result<Response, TransportError>) -> Result<Vec<u8>> {
    match result {
        Ok(response) if response.status.is_success() => Ok(response.body),
        Ok(response) => Err(MirrorError::ResourceFetchFailed {
            url: url.to_string(),
            reason: format!("HTTP {}", response.status.as_u16()),
        }),
        Err(e) => Err(MirrorError::ResourceFetchFailed {
            url: url.to_string(),
            reason: e.to_string(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mirror::testing::FakeTransport;
    use tempfile::TempDir;

    fn fetcher(dir: &TempDir, filter: &str) -> ResourceFetcher {
        ResourceFetcher::new(dir.path(), ExtensionFilter::new(filter), 4)
    }

    #[test]
    fn test_file_name_rules() {
        assert_eq!(file_name("http://a.com/img/logo.png?v=3"), Some("logo.png".to_string()));
        assert_eq!(file_name("img.png"), Some("img.png".to_string()));
        assert_eq!(file_name("http://a.com/img/logo"), None);
        assert_eq!(file_name("http://a.com/img/"), None);
        assert_eq!(file_name("http://a.com/img/.."), None);
        assert_eq!(extension("a.tar.gz"), ".gz");
    }

    #[test]
    fn test_relative_resource_is_requested_twice() {
        assert_eq!(
            request_urls("/img.png", "http://site.test/"),
            vec!["http://site.test/img.png", "/img.png"]
        );
        assert_eq!(
            request_urls("https://cdn.test/a.js", "http://site.test/"),
            vec!["https://cdn.test/a.js"]
        );
    }

    #[tokio::test]
    async fn test_downloads_relative_resource() {
        let dir = TempDir::new().unwrap();
        let transport = FakeTransport::new().page("http://site.test/img.png", b"PNG".to_vec());
        let mut downloaded = DownloadedFiles::new();

        let written = fetcher(&dir, "")
            .fetch(&transport, "img.png", "http://site.test/", &mut downloaded)
            .await
            .unwrap();

        assert_eq!(written, 1);
        assert_eq!(std::fs::read(dir.path().join("img.png")).unwrap(), b"PNG");
        assert_eq!(
            transport.requests(),
            vec!["http://site.test/img.png", "img.png"]
        );
    }

    #[tokio::test]
    async fn test_filtered_extension_is_never_written_or_requested() {
        let dir = TempDir::new().unwrap();
        let transport = FakeTransport::new()
            .page("http://site.test/site.css", b"body{}".to_vec())
            .page("http://site.test/site.map", b"{}".to_vec());
        let mut downloaded = DownloadedFiles::new();

        let written = fetcher(&dir, ".css.map")
            .fetch_all(
                &transport,
                &["http://site.test/site.css".to_string(), "http://site.test/site.map".to_string()],
                "http://site.test/",
                &mut downloaded,
            )
            .await
            .unwrap();

        assert_eq!(written, 0);
        assert!(!dir.path().join("site.css").exists());
        assert!(transport.requests().is_empty());
    }

    #[tokio::test]
    async fn test_same_file_name_first_seen_wins() {
        let dir = TempDir::new().unwrap();
        let transport = FakeTransport::new()
            .page("http://a.test/logo.png", b"first".to_vec())
            .page("http://b.test/logo.png", b"second".to_vec());
        let mut downloaded = DownloadedFiles::new();
        let resources = vec![
            "http://a.test/logo.png".to_string(),
            "http://b.test/logo.png".to_string(),
        ];

        let written = fetcher(&dir, "")
            .fetch_all(&transport, &resources, "http://site.test/", &mut downloaded)
            .await
            .unwrap();

        assert_eq!(written, 1);
        assert_eq!(std::fs::read(dir.path().join("logo.png")).unwrap(), b"first");

        // A later page referencing the same name does not even request it
        let again = fetcher(&dir, "")
            .fetch(&transport, "http://b.test/logo.png", "http://site.test/", &mut downloaded)
            .await
            .unwrap();
        assert_eq!(again, 0);
        assert_eq!(transport.requests().len(), 2);
    }

    #[tokio::test]
    async fn test_failed_fetch_does_not_claim_the_name() {
        let dir = TempDir::new().unwrap();
        let transport = FakeTransport::new()
            .status("http://a.test/logo.png", 404)
            .page("http://b.test/logo.png", b"second".to_vec());
        let mut downloaded = DownloadedFiles::new();
        let resources = vec![
            "http://a.test/logo.png".to_string(),
            "http://b.test/logo.png".to_string(),
        ];

        let written = fetcher(&dir, "")
            .fetch_all(&transport, &resources, "http://site.test/", &mut downloaded)
            .await
            .unwrap();

        assert_eq!(written, 1);
        assert_eq!(std::fs::read(dir.path().join("logo.png")).unwrap(), b"second");
    }

    #[tokio::test]
    async fn test_query_string_is_dropped_from_the_request() {
        let dir = TempDir::new().unwrap();
        let transport = FakeTransport::new().page("http://site.test/logo.png", b"PNG".to_vec());
        let mut downloaded = DownloadedFiles::new();

        let written = fetcher(&dir, "")
            .fetch(&transport, "http://site.test/logo.png?v=3", "http://site.test/", &mut downloaded)
            .await
            .unwrap();

        assert_eq!(written, 1);
        assert_eq!(transport.requests(), vec!["http://site.test/logo.png"]);
        assert_eq!(std::fs::read(dir.path().join("logo.png")).unwrap(), b"PNG");
    }

    #[tokio::test]
    async fn test_relative_query_string_is_dropped_from_both_requests() {
        let dir = TempDir::new().unwrap();
        let transport = FakeTransport::new().page("http://site.test/app.js", "js");
        let mut downloaded = DownloadedFiles::new();

        fetcher(&dir, "")
            .fetch(&transport, "app.js?build=7", "http://site.test/", &mut downloaded)
            .await
            .unwrap();

        assert_eq!(transport.requests(), vec!["http://site.test/app.js", "app.js"]);
        assert!(dir.path().join("app.js").exists());
    }

    #[test]
    fn test_strip_query() {
        assert_eq!(strip_query("http://a.com/x.png?v=1&w=2"), "http://a.com/x.png");
        assert_eq!(strip_query("http://a.com/x.png"), "http://a.com/x.png");
    }

    #[tokio::test]
    async fn test_name_without_extension_is_skipped() {
        let dir = TempDir::new().unwrap();
        let transport = FakeTransport::new().page("http://site.test/pixel", b"x".to_vec());
        let mut downloaded = DownloadedFiles::new();

        let written = fetcher(&dir, "")
            .fetch(&transport, "http://site.test/pixel", "http://site.test/", &mut downloaded)
            .await
            .unwrap();

        assert_eq!(written, 0);
        assert!(transport.requests().is_empty());
    }
}

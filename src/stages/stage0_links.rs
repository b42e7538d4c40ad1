use std::path::Path;

use anyhow::Result;
use tracing::{debug, info};

use crate::http::{DEFAULT_LINK_BASE, ListingSource};
use crate::io::{append_lines, extract_links};

/// Configuration for link collection
#[derive(Debug, Clone)]
pub struct LinkCollectorConfig {
    /// Offset increment between consecutive listing requests
    pub offset_step: usize,
    /// Base relative hrefs are resolved against
    pub link_base: String,
}

impl Default for LinkCollectorConfig {
    fn default() -> Self {
        Self {
            offset_step: 10,
            link_base: DEFAULT_LINK_BASE.to_string(),
        }
    }
}

/// One non-empty listing page
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkPage {
    pub offset: usize,
    pub links: Vec<String>,
}

/// Pages of a listing, fetched one request at a time
///
/// Yields pages until the first page without links, which ends the listing.
/// A failed request is yielded once and also ends it.
pub struct LinkPages<'a, S> {
    source: &'a S,
    config: &'a LinkCollectorConfig,
    offset: usize,
    requests: usize,
    exhausted: bool,
}

impl<'a, S: ListingSource> LinkPages<'a, S> {
    pub fn new(source: &'a S, config: &'a LinkCollectorConfig) -> Self {
        Self {
            source,
            config,
            offset: 0,
            requests: 0,
            exhausted: false,
        }
    }

    pub async fn next_page(&mut self) -> Option<Result<LinkPage>> {
        if self.exhausted {
            return None;
        }

        let offset = self.offset;
        self.requests += 1;

        let html = match self.source.fetch_listing(offset).await {
            Ok(html) => html,
            Err(e) => {
                self.exhausted = true;
                return Some(Err(e));
            }
        };

        let links = extract_links(&html, &self.config.link_base);
        if links.is_empty() {
            debug!("Listing page at offset {} is empty", offset);
            self.exhausted = true;
            return None;
        }

        self.offset += self.config.offset_step;
        Some(Ok(LinkPage { offset, links }))
    }

    /// Number of listing requests issued so far
    pub fn requests(&self) -> usize {
        self.requests
    }
}

/// Result of link collection
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkCollectionResult {
    pub pages: usize,
    pub links: usize,
    pub requests: usize,
}

/// Collect every transcript link from the listing and append it to `links_path`
///
/// Existing content is kept; re-running appends the same links again.
pub async fn execute_link_collection<S: ListingSource>(
    source: &S,
    config: &LinkCollectorConfig,
    links_path: &Path,
) -> Result<LinkCollectionResult> {
    let mut pages = LinkPages::new(source, config);
    let mut page_count = 0;
    let mut link_count = 0;

    while let Some(page) = pages.next_page().await {
        let page = page?;
        debug!("Offset {}: {} links", page.offset, page.links.len());

        append_lines(links_path, &page.links)?;
        page_count += 1;
        link_count += page.links.len();
    }

    info!(
        "Collected {} links from {} pages ({} requests)",
        link_count,
        page_count,
        pages.requests()
    );

    Ok(LinkCollectionResult {
        pages: page_count,
        links: link_count,
        requests: pages.requests(),
    })
}

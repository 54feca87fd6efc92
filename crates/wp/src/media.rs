//! Request-scoped memoization of media lookups.

use std::collections::{HashMap, HashSet};

use futures::future::try_join_all;

use crate::client::WpClient;
use crate::content::media_url;
use crate::error::WpError;
use crate::models::{WpMedia, WpPost};

/// Caches media attachments by id for the lifetime of one request, so a page
/// listing many posts fetches each poster at most once.
///
/// Misses (unknown ids, non-2xx responses) are cached too.
pub struct MediaResolver<'a> {
    client: &'a WpClient,
    cache: HashMap<i64, Option<WpMedia>>,
}

impl<'a> MediaResolver<'a> {
    pub fn new(client: &'a WpClient) -> Self {
        Self {
            client,
            cache: HashMap::new(),
        }
    }

    /// Resolve one media id, hitting the network only on first use.
    pub async fn get(&mut self, id: i64) -> Result<Option<&WpMedia>, WpError> {
        if id <= 0 {
            return Ok(None);
        }
        if !self.cache.contains_key(&id) {
            let media = self.client.media(id).await?;
            self.cache.insert(id, media);
        }
        Ok(self.cache.get(&id).and_then(Option::as_ref))
    }

    /// Fetch every uncached id concurrently.
    pub async fn prefetch(&mut self, ids: &[i64]) -> Result<(), WpError> {
        let mut seen = HashSet::new();
        let pending: Vec<i64> = ids
            .iter()
            .copied()
            .filter(|id| *id > 0 && !self.cache.contains_key(id) && seen.insert(*id))
            .collect();
        if pending.is_empty() {
            return Ok(());
        }

        tracing::debug!(count = pending.len(), "Prefetching WordPress media");

        let client = self.client;
        let fetched = try_join_all(pending.iter().map(|id| client.media(*id))).await?;
        self.cache.extend(pending.into_iter().zip(fetched));
        Ok(())
    }

    /// Preferred display URL of a post's featured image.
    pub async fn poster_url(&mut self, featured_media: Option<i64>) -> Result<Option<String>, WpError> {
        let Some(id) = featured_media else {
            return Ok(None);
        };
        Ok(self.get(id).await?.and_then(media_url).map(str::to_string))
    }

    /// Poster URLs for many posts keyed by post id. Posts without a usable
    /// featured image are left out.
    pub async fn poster_urls(&mut self, posts: &[WpPost]) -> Result<HashMap<i64, String>, WpError> {
        let ids: Vec<i64> = posts.iter().filter_map(|p| p.featured_media).collect();
        self.prefetch(&ids).await?;

        Ok(posts
            .iter()
            .filter_map(|post| {
                let media = self.cache.get(&post.featured_media?)?.as_ref()?;
                Some((post.id, media_url(media)?.to_string()))
            })
            .collect())
    }

    /// Number of ids resolved so far, hits and misses.
    pub fn cached(&self) -> usize {
        self.cache.len()
    }
}

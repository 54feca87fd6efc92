//! HTTP client for the WordPress REST endpoints.

use serde::de::DeserializeOwned;

use crate::config::WpConfig;
use crate::error::WpError;
use crate::models::{ListParams, Page, WpGenre, WpMedia, WpPost};

/// Fields requested for collection pages.
const LIST_FIELDS: &str = "id,slug,title,excerpt,acf,featured_media,genre";
/// Fields requested for single-post lookups.
const DETAIL_FIELDS: &str = "id,slug,title,content,excerpt,acf,featured_media,genre";
const EPISODE_LIST_FIELDS: &str = "id,slug,title,excerpt,acf,featured_media";
const EPISODE_DETAIL_FIELDS: &str = "id,slug,title,content,excerpt,acf,featured_media";
const MEDIA_FIELDS: &str = "id,source_url,media_details";
const GENRE_FIELDS: &str = "id,name,slug";

/// Episodes are fetched in one page and filtered client-side.
pub const EPISODES_PER_PAGE: u32 = 100;

/// WordPress caps `per_page` at 100.
const MAX_PER_PAGE: usize = 100;

const TOTAL_PAGES_HEADER: &str = "X-WP-TotalPages";

/// HTTP client for one WordPress site.
#[derive(Debug, Clone)]
pub struct WpClient {
    client: reqwest::Client,
    config: WpConfig,
}

impl WpClient {
    pub fn new(config: WpConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            config,
        }
    }

    /// Create a client reusing an existing [`reqwest::Client`] (shared
    /// connection pool).
    pub fn with_client(client: reqwest::Client, config: WpConfig) -> Self {
        Self { client, config }
    }

    pub fn config(&self) -> &WpConfig {
        &self.config
    }

    // ---------------------------------------------------------------------
    // Movies
    // ---------------------------------------------------------------------

    pub async fn list_movies(&self, params: &ListParams) -> Result<Page<WpPost>, WpError> {
        self.list(&self.config.movie_rest_base, params, LIST_FIELDS)
            .await
    }

    pub async fn movie_by_slug(&self, slug: &str) -> Result<Option<WpPost>, WpError> {
        self.by_slug(&self.config.movie_rest_base, slug, DETAIL_FIELDS)
            .await
    }

    // ---------------------------------------------------------------------
    // Series
    // ---------------------------------------------------------------------

    pub async fn list_series(&self, params: &ListParams) -> Result<Page<WpPost>, WpError> {
        self.list(&self.config.series_rest_base, params, LIST_FIELDS)
            .await
    }

    pub async fn series_by_slug(&self, slug: &str) -> Result<Option<WpPost>, WpError> {
        self.by_slug(&self.config.series_rest_base, slug, DETAIL_FIELDS)
            .await
    }

    /// Look a series up by post id. Non-positive ids and non-2xx responses
    /// (including 404) yield `None`.
    pub async fn series_by_id(&self, id: i64) -> Result<Option<WpPost>, WpError> {
        if id <= 0 {
            return Ok(None);
        }

        let url = format!("{}/{id}", self.config.endpoint(&self.config.series_rest_base));
        let response = self
            .client
            .get(url)
            .query(&[("_fields", DETAIL_FIELDS)])
            .send()
            .await?;

        Self::parse_optional(response, "series").await
    }

    // ---------------------------------------------------------------------
    // Episodes
    // ---------------------------------------------------------------------

    /// Fetch the first [`EPISODES_PER_PAGE`] episodes across all series.
    pub async fn list_episodes(&self) -> Result<Vec<WpPost>, WpError> {
        let response = self
            .client
            .get(self.config.endpoint(&self.config.episode_rest_base))
            .query(&[
                ("per_page", EPISODES_PER_PAGE.to_string()),
                ("_fields", EPISODE_LIST_FIELDS.to_string()),
            ])
            .send()
            .await?;

        Self::parse_response(response).await
    }

    pub async fn episode_by_slug(&self, slug: &str) -> Result<Option<WpPost>, WpError> {
        self.by_slug(&self.config.episode_rest_base, slug, EPISODE_DETAIL_FIELDS)
            .await
    }

    // ---------------------------------------------------------------------
    // Media / taxonomy
    // ---------------------------------------------------------------------

    /// Fetch one media attachment. Non-positive ids and non-2xx responses
    /// yield `None`.
    pub async fn media(&self, id: i64) -> Result<Option<WpMedia>, WpError> {
        if id <= 0 {
            return Ok(None);
        }

        let response = self
            .client
            .get(format!("{}/{id}", self.config.endpoint("media")))
            .query(&[("_fields", MEDIA_FIELDS)])
            .send()
            .await?;

        Self::parse_optional(response, "media").await
    }

    /// Fetch genre terms by id. An empty id list skips the request; non-2xx
    /// responses yield an empty list.
    pub async fn genres(&self, ids: &[i64]) -> Result<Vec<WpGenre>, WpError> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let include = ids
            .iter()
            .map(i64::to_string)
            .collect::<Vec<_>>()
            .join(",");

        let response = self
            .client
            .get(self.config.endpoint("genre"))
            .query(&[
                ("include", include),
                ("per_page", ids.len().min(MAX_PER_PAGE).to_string()),
                ("_fields", GENRE_FIELDS.to_string()),
            ])
            .send()
            .await?;

        Ok(Self::parse_optional(response, "genre")
            .await?
            .unwrap_or_default())
    }

    // ---------------------------------------------------------------------
    // Shared request shapes
    // ---------------------------------------------------------------------

    async fn list(
        &self,
        rest_base: &str,
        params: &ListParams,
        fields: &str,
    ) -> Result<Page<WpPost>, WpError> {
        let mut query = vec![
            ("_fields", fields.to_string()),
            ("per_page", params.per_page.to_string()),
            ("page", params.page.to_string()),
        ];
        if let Some(search) = params.search_term() {
            query.push(("search", search.to_string()));
        }

        let response = self
            .client
            .get(self.config.endpoint(rest_base))
            .query(&query)
            .send()
            .await?;

        let response = Self::ensure_success(response).await?;
        let total_pages = response
            .headers()
            .get(TOTAL_PAGES_HEADER)
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.trim().parse().ok())
            .unwrap_or(0);
        let items = response.json::<Vec<WpPost>>().await?;

        Ok(Page { items, total_pages })
    }

    /// Blank slugs short-circuit to `None` without a request.
    async fn by_slug(
        &self,
        rest_base: &str,
        slug: &str,
        fields: &str,
    ) -> Result<Option<WpPost>, WpError> {
        let slug = slug.trim();
        if slug.is_empty() {
            return Ok(None);
        }

        let response = self
            .client
            .get(self.config.endpoint(rest_base))
            .query(&[("slug", slug), ("per_page", "1"), ("_fields", fields)])
            .send()
            .await?;

        let posts: Vec<WpPost> = Self::parse_response(response).await?;
        Ok(posts.into_iter().next())
    }

    // ---------------------------------------------------------------------
    // Response helpers
    // ---------------------------------------------------------------------

    /// Return the response unchanged on 2xx, otherwise read the body into
    /// [`WpError::Api`].
    async fn ensure_success(response: reqwest::Response) -> Result<reqwest::Response, WpError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        Err(WpError::Api {
            status: status.as_u16(),
            body,
        })
    }

    async fn parse_response<T: DeserializeOwned>(
        response: reqwest::Response,
    ) -> Result<T, WpError> {
        let response = Self::ensure_success(response).await?;
        Ok(response.json::<T>().await?)
    }

    /// Like [`Self::parse_response`] but maps non-2xx to `None`.
    async fn parse_optional<T: DeserializeOwned>(
        response: reqwest::Response,
        resource: &str,
    ) -> Result<Option<T>, WpError> {
        match Self::parse_response(response).await {
            Ok(value) => Ok(Some(value)),
            Err(WpError::Api { status, .. }) => {
                tracing::debug!(resource, status, "WordPress lookup returned no content");
                Ok(None)
            }
            Err(e) => Err(e),
        }
    }
}

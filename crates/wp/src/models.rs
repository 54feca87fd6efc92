//! Wire types for the subset of the WordPress REST API Tratics reads.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// `{ "rendered": "<p>...</p>" }` fields (title, excerpt, content).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Rendered {
    #[serde(default)]
    pub rendered: String,
}

/// A movie, series or episode post.
///
/// `acf` stays untyped: WordPress sends `[]` instead of `{}` when a post has
/// no custom fields, and field values arrive as numbers or strings depending
/// on how they were entered. Use the helpers in [`crate::content`] to read it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WpPost {
    pub id: i64,
    pub slug: String,
    #[serde(default)]
    pub title: Rendered,
    #[serde(default)]
    pub excerpt: Option<Rendered>,
    #[serde(default)]
    pub content: Option<Rendered>,
    #[serde(default)]
    pub acf: serde_json::Value,
    #[serde(default)]
    pub featured_media: Option<i64>,
    #[serde(default)]
    pub genre: Vec<i64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WpMedia {
    pub id: i64,
    #[serde(default)]
    pub source_url: String,
    #[serde(default)]
    pub media_details: Option<MediaDetails>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MediaDetails {
    #[serde(default)]
    pub sizes: HashMap<String, MediaSize>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MediaSize {
    pub source_url: String,
    #[serde(default)]
    pub width: Option<u32>,
    #[serde(default)]
    pub height: Option<u32>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WpGenre {
    pub id: i64,
    pub name: String,
    pub slug: String,
}

/// One page of a collection plus the `X-WP-TotalPages` header value.
#[derive(Debug, Clone, PartialEq)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub total_pages: u32,
}

/// Paging and search parameters for collection endpoints.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListParams {
    pub page: u32,
    pub per_page: u32,
    pub search: Option<String>,
}

impl Default for ListParams {
    fn default() -> Self {
        Self {
            page: 1,
            per_page: 12,
            search: None,
        }
    }
}

impl ListParams {
    /// Search term with surrounding whitespace removed; blank terms are dropped.
    pub fn search_term(&self) -> Option<&str> {
        self.search
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
    }
}

/// How a movie or episode is streamed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StreamType {
    Iframe,
    External,
    #[default]
    None,
}

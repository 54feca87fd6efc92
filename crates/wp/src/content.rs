//! Pure helpers that turn raw WordPress posts into display values.
//!
//! All readers of `acf` are lenient: a missing field, a field of the wrong
//! JSON type and a blank string all read as "absent".

use std::collections::BTreeMap;
use std::sync::LazyLock;

use chrono::Datelike;
use regex::Regex;
use serde_json::Value;

use crate::models::{StreamType, WpGenre, WpMedia, WpPost};

static TAG_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"<[^>]*>").expect("valid regex"));

static IFRAME_SRC_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i)<iframe[^>]*src=["']([^"']+)["'][^>]*></iframe>"#).expect("valid regex")
});

/// Hosts whose players may be embedded.
pub const ALLOWED_IFRAME_HOSTS: [&str; 4] = [
    "www.youtube.com",
    "youtube.com",
    "player.vimeo.com",
    "vimeo.com",
];

/// Media sizes in order of preference for posters.
const PREFERRED_SIZES: [&str; 3] = ["medium_large", "large", "medium"];

/// Season assigned to episodes without a `season_number` when grouping.
pub const DEFAULT_SEASON: i64 = 1;

// ---------------------------------------------------------------------------
// Text
// ---------------------------------------------------------------------------

/// Remove every `<...>` tag and trim the result.
pub fn strip_html(html: &str) -> String {
    TAG_RE.replace_all(html, "").trim().to_string()
}

pub fn title_text(post: &WpPost) -> String {
    strip_html(&post.title.rendered)
}

pub fn excerpt_text(post: &WpPost) -> String {
    post.excerpt
        .as_ref()
        .map(|e| strip_html(&e.rendered))
        .unwrap_or_default()
}

// ---------------------------------------------------------------------------
// Custom fields
// ---------------------------------------------------------------------------

fn acf_field<'a>(post: &'a WpPost, key: &str) -> Option<&'a Value> {
    post.acf.as_object()?.get(key)
}

/// Trimmed string field; blank reads as `None`.
fn acf_text<'a>(post: &'a WpPost, key: &str) -> Option<&'a str> {
    acf_field(post, key)?
        .as_str()
        .map(str::trim)
        .filter(|s| !s.is_empty())
}

fn acf_number(post: &WpPost, key: &str) -> Option<f64> {
    acf_field(post, key)?.as_f64().filter(|n| n.is_finite())
}

/// Integer field given either as a JSON number or a numeric string.
fn acf_int(post: &WpPost, key: &str) -> Option<i64> {
    let value = acf_field(post, key)?;
    let number = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    }?;
    number.is_finite().then_some(number.trunc() as i64)
}

/// `release_year` as a number or numeric string, else the current year.
pub fn release_year(post: &WpPost) -> i32 {
    release_year_or(post, chrono::Utc::now().year())
}

/// `release_year` with an explicit fallback.
pub fn release_year_or(post: &WpPost, fallback: i32) -> i32 {
    acf_int(post, "release_year")
        .and_then(|y| i32::try_from(y).ok())
        .unwrap_or(fallback)
}

/// `imdb_rating` when it is a number within `0..=10`.
pub fn rating(post: &WpPost) -> Option<f64> {
    acf_number(post, "imdb_rating").filter(|r| (0.0..=10.0).contains(r))
}

pub fn runtime_minutes(post: &WpPost) -> Option<f64> {
    acf_number(post, "runtime_minutes")
}

pub fn trailer_url(post: &WpPost) -> Option<&str> {
    acf_text(post, "trailer_url")
}

pub fn stream_url(post: &WpPost) -> Option<&str> {
    acf_text(post, "stream_url")
}

/// Raw embed markup as entered; pass it through [`sanitize_iframe`] before
/// rendering.
pub fn stream_iframe(post: &WpPost) -> Option<&str> {
    acf_text(post, "stream_iframe")
}

pub fn stream_provider(post: &WpPost) -> Option<&str> {
    acf_text(post, "stream_provider")
}

/// Exact `iframe` or `external`; anything else is [`StreamType::None`].
pub fn stream_type(post: &WpPost) -> StreamType {
    match acf_field(post, "stream_type").and_then(Value::as_str) {
        Some("iframe") => StreamType::Iframe,
        Some("external") => StreamType::External,
        _ => StreamType::None,
    }
}

// ---------------------------------------------------------------------------
// Media / taxonomy
// ---------------------------------------------------------------------------

/// Best poster URL: `medium_large`, `large`, `medium`, then the original.
pub fn media_url(media: &WpMedia) -> Option<&str> {
    let sized = media.media_details.as_ref().and_then(|details| {
        PREFERRED_SIZES
            .iter()
            .find_map(|size| details.sizes.get(*size))
            .map(|size| size.source_url.as_str())
    });

    sized
        .or(Some(media.source_url.as_str()))
        .filter(|url| !url.is_empty())
}

pub fn genre_names(genres: &[WpGenre]) -> Vec<&str> {
    genres.iter().map(|g| g.name.as_str()).collect()
}

// ---------------------------------------------------------------------------
// Episodes
// ---------------------------------------------------------------------------

/// `acf.series` of an episode. Only a JSON number counts; a numeric string
/// does not link an episode to its series.
pub fn episode_series(episode: &WpPost) -> Option<i64> {
    acf_number(episode, "series")
        .filter(|n| n.fract() == 0.0)
        .map(|n| n as i64)
}

pub fn season_number(episode: &WpPost) -> Option<i64> {
    acf_int(episode, "season_number")
}

pub fn episode_number(episode: &WpPost) -> Option<i64> {
    acf_int(episode, "episode_number")
}

/// Episodes whose `acf.series` equals `series_id`, in input order.
pub fn filter_episodes_by_series(episodes: Vec<WpPost>, series_id: i64) -> Vec<WpPost> {
    episodes
        .into_iter()
        .filter(|e| episode_series(e) == Some(series_id))
        .collect()
}

/// Sort by (season, episode); missing numbers sort as 0. Stable.
pub fn sort_episodes(episodes: &mut [WpPost]) {
    episodes.sort_by_key(|e| {
        (
            season_number(e).unwrap_or(0),
            episode_number(e).unwrap_or(0),
        )
    });
}

/// Group by season, keeping input order within each season. Episodes
/// without a season land in [`DEFAULT_SEASON`].
pub fn group_by_season(episodes: Vec<WpPost>) -> BTreeMap<i64, Vec<WpPost>> {
    let mut grouped: BTreeMap<i64, Vec<WpPost>> = BTreeMap::new();
    for episode in episodes {
        let season = season_number(&episode).unwrap_or(DEFAULT_SEASON);
        grouped.entry(season).or_default().push(episode);
    }
    grouped
}

// ---------------------------------------------------------------------------
// Embeds
// ---------------------------------------------------------------------------

/// Extract the `src` of an `<iframe>` and rebuild a fixed, attribute-safe
/// iframe around it. Returns `None` unless the source is an http(s) URL on
/// one of [`ALLOWED_IFRAME_HOSTS`] with no explicit port.
pub fn sanitize_iframe(html: &str) -> Option<String> {
    let src = IFRAME_SRC_RE.captures(html)?.get(1)?.as_str();
    let url = reqwest::Url::parse(src).ok()?;

    if !matches!(url.scheme(), "http" | "https") || url.port().is_some() {
        return None;
    }
    let host = url.host_str()?;
    if !ALLOWED_IFRAME_HOSTS.contains(&host) {
        return None;
    }

    Some(format!(
        "<iframe src=\"{url}\" title=\"Video player\" frameborder=\"0\" \
         allow=\"accelerometer; autoplay; clipboard-write; encrypted-media; gyroscope; picture-in-picture; web-share\" \
         allowfullscreen referrerpolicy=\"strict-origin-when-cross-origin\"></iframe>"
    ))
}

//! WordPress endpoint configuration loaded from environment variables.

/// Base URL used when neither `WP_BASE_URL` nor `NEXT_PUBLIC_WP_BASE_URL` is set.
pub const DEFAULT_BASE_URL: &str = "https://tratics.dritongashi.com";

pub const DEFAULT_MOVIE_REST_BASE: &str = "movies";
pub const DEFAULT_SERIES_REST_BASE: &str = "series";
pub const DEFAULT_EPISODE_REST_BASE: &str = "episodes";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WpConfig {
    /// Site root without a trailing slash, e.g. `https://example.com`.
    pub base_url: String,
    pub movie_rest_base: String,
    pub series_rest_base: String,
    pub episode_rest_base: String,
}

impl WpConfig {
    /// Build a config for `base_url` with the default post-type rest bases.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            movie_rest_base: DEFAULT_MOVIE_REST_BASE.to_string(),
            series_rest_base: DEFAULT_SERIES_REST_BASE.to_string(),
            episode_rest_base: DEFAULT_EPISODE_REST_BASE.to_string(),
        }
    }

    /// Load configuration from environment variables.
    ///
    /// Each setting reads `WP_<NAME>` first, then `NEXT_PUBLIC_WP_<NAME>`.
    ///
    /// | Name                | Default                             |
    /// |---------------------|-------------------------------------|
    /// | `BASE_URL`          | `https://tratics.dritongashi.com`   |
    /// | `MOVIE_REST_BASE`   | `movies`                            |
    /// | `SERIES_REST_BASE`  | `series`                            |
    /// | `EPISODE_REST_BASE` | `episodes`                          |
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let setting = |name: &str, default: &str| {
            [format!("WP_{name}"), format!("NEXT_PUBLIC_WP_{name}")]
                .iter()
                .filter_map(|key| lookup(key))
                .map(|v| v.trim().to_string())
                .find(|v| !v.is_empty())
                .unwrap_or_else(|| default.to_string())
        };

        let mut config = Self::new(setting("BASE_URL", DEFAULT_BASE_URL));
        config.movie_rest_base = setting("MOVIE_REST_BASE", DEFAULT_MOVIE_REST_BASE);
        config.series_rest_base = setting("SERIES_REST_BASE", DEFAULT_SERIES_REST_BASE);
        config.episode_rest_base = setting("EPISODE_REST_BASE", DEFAULT_EPISODE_REST_BASE);
        config
    }

    /// `{base_url}/wp-json/wp/v2/{resource}`
    pub fn endpoint(&self, resource: &str) -> String {
        format!("{}/wp-json/wp/v2/{resource}", self.base_url)
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults_apply_when_unset() {
        let config = WpConfig::from_lookup(lookup(&[]));
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.movie_rest_base, "movies");
        assert_eq!(config.series_rest_base, "series");
        assert_eq!(config.episode_rest_base, "episodes");
    }

    #[test]
    fn server_name_wins_over_public_name() {
        let config = WpConfig::from_lookup(lookup(&[
            ("WP_BASE_URL", "https://cms.example.com/"),
            ("NEXT_PUBLIC_WP_BASE_URL", "https://other.example.com"),
            ("NEXT_PUBLIC_WP_SERIES_REST_BASE", "shows"),
        ]));
        assert_eq!(config.base_url, "https://cms.example.com");
        assert_eq!(config.series_rest_base, "shows");
    }

    #[test]
    fn blank_values_fall_through() {
        let config = WpConfig::from_lookup(lookup(&[("WP_MOVIE_REST_BASE", "  ")]));
        assert_eq!(config.movie_rest_base, "movies");
    }

    #[test]
    fn endpoint_joins_wp_v2_path() {
        let config = WpConfig::new("https://cms.example.com");
        assert_eq!(
            config.endpoint("genre"),
            "https://cms.example.com/wp-json/wp/v2/genre"
        );
    }
}

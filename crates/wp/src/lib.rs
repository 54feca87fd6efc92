//! Read-only client for the WordPress REST API that serves the Tratics
//! catalogue (movies, series, episodes, genres and media).
//!
//! [`WpClient`] wraps the HTTP endpoints, [`MediaResolver`] memoizes media
//! lookups for the lifetime of one request, and [`content`] holds the pure
//! helpers that turn raw posts into display values.

pub mod client;
pub mod config;
pub mod content;
pub mod error;
pub mod media;
pub mod models;

pub use client::WpClient;
pub use config::WpConfig;
pub use error::WpError;
pub use media::MediaResolver;

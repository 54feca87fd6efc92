/// Errors from the WordPress REST layer.
#[derive(Debug, thiserror::Error)]
pub enum WpError {
    /// The HTTP request itself failed (network, DNS, TLS, decoding).
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// WordPress returned a non-2xx status code.
    #[error("WordPress API error ({status}): {body}")]
    Api {
        /// HTTP status code.
        status: u16,
        /// Raw response body for debugging.
        body: String,
    },
}

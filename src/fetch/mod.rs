mod github;
mod local;

pub use github::{to_api_url, GithubFetcher};
pub use local::collect_local_samples;

use thiserror::Error;

/// User-Agent sent with every outbound request; GitHub rejects anonymous
/// clients without one.
pub const USER_AGENT: &str = "python-to-js-converter";

/// One fetched source document.
#[derive(Debug, Clone)]
pub struct SourceDoc {
    pub name: String,
    pub content: String,
    pub path: String,
}

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("unsupported URL format: {0} (expected a GitHub repository URL)")]
    UnsupportedUrl(String),
    #[error("repository or path not found")]
    NotFound,
    #[error("access denied or rate limited")]
    RateLimited,
    #[error("HTTP {0}")]
    Status(u16),
    #[error("request failed: {0}")]
    Http(#[from] Box<ureq::Error>),
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

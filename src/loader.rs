use crate::cue::CueIndex;
use crate::error::LoadError;

use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use reqwest::Url;
use tracing::{debug, info};

/// Where a cue sheet lives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Source {
    Remote(Url),
    Local(PathBuf),
}

impl FromStr for Source {
    type Err = LoadError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.to_ascii_lowercase();
        if lower.starts_with("http://") || lower.starts_with("https://") {
            Url::parse(s)
                .map(Source::Remote)
                .map_err(|_| LoadError::InvalidUrl(s.to_string()))
        } else {
            Ok(Source::Local(PathBuf::from(s)))
        }
    }
}

impl fmt::Display for Source {
    fn fmt(&self, fmt: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Source::Remote(url) => write!(fmt, "{}", url),
            Source::Local(path) => write!(fmt, "{}", path.display()),
        }
    }
}

#[derive(Debug, Clone)]
pub struct LoaderConfig {
    pub timeout: Duration,
    /// Honour proxy settings from the environment.
    pub use_proxy: bool,
}

impl Default for LoaderConfig {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(30),
            use_proxy: true,
        }
    }
}

/// Fetches cue sheets over HTTP(S) or from disk.
#[derive(Debug, Clone)]
pub struct Loader {
    client: reqwest::Client,
}

impl Loader {
    pub fn new(config: &LoaderConfig) -> Result<Self, LoadError> {
        let mut builder = reqwest::Client::builder().timeout(config.timeout);
        if !config.use_proxy {
            builder = builder.no_proxy();
        }
        let client = builder.build().map_err(LoadError::Client)?;
        Ok(Self { client })
    }

    pub async fn fetch_text(&self, source: &Source) -> Result<String, LoadError> {
        match source {
            Source::Remote(url) => {
                let http_err = |source: reqwest::Error| LoadError::Http {
                    url: url.to_string(),
                    source,
                };
                let response = self
                    .client
                    .get(url.clone())
                    .send()
                    .await
                    .and_then(|r| r.error_for_status())
                    .map_err(http_err)?;
                debug!(%url, status = %response.status(), "fetched cue sheet");
                response.text().await.map_err(http_err)
            }
            Source::Local(path) => {
                tokio::fs::read_to_string(path)
                    .await
                    .map_err(|source| LoadError::Io {
                        path: path.clone(),
                        source,
                    })
            }
        }
    }

    pub async fn load(&self, source: &Source) -> Result<CueIndex, LoadError> {
        let text = self.fetch_text(source).await?;
        let index = CueIndex::parse(&text);
        info!(%source, cues = index.len(), "parsed preview cues");
        Ok(index)
    }
}

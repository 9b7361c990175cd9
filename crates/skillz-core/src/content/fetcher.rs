//! Document fetch capability
//!
//! The loader never reads files or URLs itself; it asks a
//! [`DocumentFetcher`] for the raw text of a catalog-relative path.
//! - [`HttpFetcher`]: GET against a base URL (the catalog origin)
//! - [`FsFetcher`]: read below a local directory
//! - [`SiteFetcher`]: public directory plus a separate skills directory
//! - [`StaticFetcher`]: in-memory documents, for fixtures and embedding

use std::collections::HashMap;
use std::path::{Component, Path, PathBuf};

use async_trait::async_trait;
use thiserror::Error;
use url::Url;

use crate::constants::catalog::SKILLS_URL_PREFIX;

/// Why a document could not be fetched. Always treated as "absent" upstream.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("{path}: HTTP {status}")]
    Status { path: String, status: u16 },

    #[error("{path}: {source}")]
    Http {
        path: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("{path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("{0}: not found")]
    NotFound(String),

    #[error("rejected document path: {0}")]
    InvalidPath(String),

    #[error("invalid base URL {url}: {source}")]
    BaseUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },
}

/// Source of raw document text
#[async_trait]
pub trait DocumentFetcher: Send + Sync {
    async fn fetch(&self, path: &str) -> Result<String, FetchError>;
}

/// Fetches documents over HTTP relative to a base URL
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: reqwest::Client,
    base: Url,
}

impl HttpFetcher {
    pub fn new(base_url: &str) -> Result<Self, FetchError> {
        Self::with_client(reqwest::Client::new(), base_url)
    }

    pub fn with_client(client: reqwest::Client, base_url: &str) -> Result<Self, FetchError> {
        // Without a trailing slash `Url::join` would replace the last segment
        let normalized = if base_url.ends_with('/') {
            base_url.to_string()
        } else {
            format!("{}/", base_url)
        };
        let base = Url::parse(&normalized).map_err(|source| FetchError::BaseUrl {
            url: base_url.to_string(),
            source,
        })?;
        Ok(Self { client, base })
    }

    pub fn base_url(&self) -> &Url {
        &self.base
    }
}

#[async_trait]
impl DocumentFetcher for HttpFetcher {
    async fn fetch(&self, path: &str) -> Result<String, FetchError> {
        let url = self
            .base
            .join(path.trim_start_matches('/'))
            .map_err(|_| FetchError::InvalidPath(path.to_string()))?;

        let http_err = |source| FetchError::Http {
            path: path.to_string(),
            source,
        };

        let response = self.client.get(url).send().await.map_err(http_err)?;
        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                path: path.to_string(),
                status: status.as_u16(),
            });
        }

        response.text().await.map_err(http_err)
    }
}

/// Reads documents from a local directory
///
/// The catalog is served with the skills directory mounted at `skills/`,
/// so `root` is the directory that contains both `skills.json` and
/// `skills/` (or an equivalent layout).
#[derive(Debug, Clone)]
pub struct FsFetcher {
    root: PathBuf,
}

impl FsFetcher {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Resolve a catalog path below the root, refusing anything that escapes it
    fn resolve(&self, path: &str) -> Result<PathBuf, FetchError> {
        let relative = Path::new(path.trim_start_matches('/'));
        let escapes = relative
            .components()
            .any(|c| !matches!(c, Component::Normal(_) | Component::CurDir));
        if escapes || relative.as_os_str().is_empty() {
            return Err(FetchError::InvalidPath(path.to_string()));
        }
        Ok(self.root.join(relative))
    }
}

#[async_trait]
impl DocumentFetcher for FsFetcher {
    async fn fetch(&self, path: &str) -> Result<String, FetchError> {
        let file = self.resolve(path)?;
        tokio::fs::read_to_string(&file)
            .await
            .map_err(|source| match source.kind() {
                std::io::ErrorKind::NotFound => FetchError::NotFound(path.to_string()),
                _ => FetchError::Io {
                    path: path.to_string(),
                    source,
                },
            })
    }
}

/// Local site layout: `skills/...` is read from the skills directory,
/// everything else (`skills.json`, `layout.json`) from the public directory
#[derive(Debug, Clone)]
pub struct SiteFetcher {
    public: FsFetcher,
    skills: FsFetcher,
}

impl SiteFetcher {
    pub fn new(public_dir: impl Into<PathBuf>, skills_dir: impl Into<PathBuf>) -> Self {
        Self {
            public: FsFetcher::new(public_dir),
            skills: FsFetcher::new(skills_dir),
        }
    }
}

#[async_trait]
impl DocumentFetcher for SiteFetcher {
    async fn fetch(&self, path: &str) -> Result<String, FetchError> {
        let trimmed = path.trim_start_matches('/');
        match trimmed.split_once('/') {
            Some((SKILLS_URL_PREFIX, rest)) => self.skills.fetch(rest).await,
            _ => self.public.fetch(trimmed).await,
        }
    }
}

/// In-memory documents keyed by path
#[derive(Debug, Clone, Default)]
pub struct StaticFetcher {
    documents: HashMap<String, String>,
}

impl StaticFetcher {
    pub fn new(documents: HashMap<String, String>) -> Self {
        Self { documents }
    }

    pub fn with(mut self, path: impl Into<String>, text: impl Into<String>) -> Self {
        self.documents.insert(path.into(), text.into());
        self
    }
}

#[async_trait]
impl DocumentFetcher for StaticFetcher {
    async fn fetch(&self, path: &str) -> Result<String, FetchError> {
        self.documents
            .get(path)
            .cloned()
            .ok_or_else(|| FetchError::NotFound(path.to_string()))
    }
}

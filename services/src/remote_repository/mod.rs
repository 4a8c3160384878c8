//! Access to the external repository that holds published code.
//!
//! Every write names the revision it expects to replace (or none, for a fresh file), so
//! concurrent writers surface as [`RemoteError::Conflict`] instead of silently
//! overwriting each other.

pub mod github;
pub mod memory;

use async_trait::async_trait;
use base64::{Engine as _, engine::general_purpose};
use percent_encoding::percent_decode_str;
use thiserror::Error;
use url::Url;

pub use github::GitHubRepository;
pub use memory::InMemoryRepository;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RemoteError {
    #[error("{0} not found")]
    NotFound(String),

    /// The expected revision no longer matches, or a create targeted an existing path.
    #[error("{0}")]
    Conflict(String),

    /// Transport failure, timeout, bad credentials or an unexpected response.
    #[error("{0}")]
    Unavailable(String),

    /// The repository refused the request as invalid; repeating it cannot succeed.
    #[error("{0}")]
    Rejected(String),
}

/// A file as stored in the remote repository.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoteFile {
    pub path: String,
    pub content: Vec<u8>,
    /// Opaque revision tag to pass back when updating or deleting.
    pub revision: String,
}

/// Identifies one branch of one repository plus the public hosts used to build links.
#[derive(Debug, Clone)]
pub struct RepoCoordinates {
    pub owner: String,
    pub repo: String,
    pub branch: String,
    /// Top-level folder every published file lives under.
    pub root_folder: String,
    web_url: Url,
    raw_url: Url,
}

impl RepoCoordinates {
    /// Coordinates on the public GitHub hosts.
    pub fn new(
        owner: impl Into<String>,
        repo: impl Into<String>,
        branch: impl Into<String>,
        root_folder: impl Into<String>,
    ) -> Self {
        Self {
            owner: owner.into(),
            repo: repo.into(),
            branch: branch.into(),
            root_folder: root_folder.into(),
            web_url: Url::parse("https://github.com").expect("static URL"),
            raw_url: Url::parse("https://raw.githubusercontent.com").expect("static URL"),
        }
    }

    /// Replaces the web and raw-content hosts, e.g. for GitHub Enterprise.
    pub fn with_hosts(mut self, web_url: &str, raw_url: &str) -> Result<Self, url::ParseError> {
        self.web_url = Url::parse(web_url)?;
        self.raw_url = Url::parse(raw_url)?;
        Ok(self)
    }

    /// Public link to `path`: `{web}/{owner}/{repo}/blob/{branch}/{path}`.
    pub fn blob_url(&self, path: &str) -> String {
        join_segments(
            &self.web_url,
            [self.owner.as_str(), self.repo.as_str(), "blob", self.branch.as_str()]
                .into_iter()
                .chain(path.split('/')),
        )
    }

    /// Raw-content link to `path`: the web link with the raw host and no `blob` segment.
    pub fn raw_url(&self, path: &str) -> String {
        join_segments(
            &self.raw_url,
            [self.owner.as_str(), self.repo.as_str(), self.branch.as_str()]
                .into_iter()
                .chain(path.split('/')),
        )
    }

    /// Recovers the repository path from a link produced by [`Self::blob_url`].
    ///
    /// Returns `None` for links to another host, repository or branch.
    pub fn path_from_link(&self, link: &str) -> Option<String> {
        let url = Url::parse(link).ok()?;
        if url.host_str() != self.web_url.host_str() {
            return None;
        }

        let mut segments = url.path_segments()?;
        let base_depth = self
            .web_url
            .path_segments()
            .map(|s| s.filter(|seg| !seg.is_empty()).count())
            .unwrap_or(0);
        for _ in 0..base_depth {
            segments.next()?;
        }

        let expected = [self.owner.as_str(), self.repo.as_str(), "blob", self.branch.as_str()];
        for want in expected {
            if segments.next()? != want {
                return None;
            }
        }

        let rest: Vec<String> = segments
            .map(|seg| percent_decode_str(seg).decode_utf8_lossy().into_owned())
            .collect();
        if rest.is_empty() || rest.iter().any(|seg| seg.is_empty()) {
            return None;
        }
        Some(rest.join("/"))
    }
}

fn join_segments<'a>(base: &Url, segments: impl IntoIterator<Item = &'a str>) -> String {
    let mut url = base.clone();
    if let Ok(mut path) = url.path_segments_mut() {
        path.pop_if_empty();
        path.extend(segments);
    }
    url.to_string()
}

/// Base64 form of `content` as sent on the wire.
pub fn encode_content(content: &[u8]) -> String {
    general_purpose::STANDARD.encode(content)
}

/// Decodes wire content, tolerating the line breaks GitHub inserts every 60 characters.
pub fn decode_content(encoded: &str) -> Result<Vec<u8>, RemoteError> {
    let compact: String = encoded.chars().filter(|c| !c.is_whitespace()).collect();
    general_purpose::STANDARD
        .decode(compact)
        .map_err(|e| RemoteError::Unavailable(format!("invalid base64 content: {e}")))
}

#[async_trait]
pub trait RemoteRepository: Send + Sync {
    fn coordinates(&self) -> &RepoCoordinates;

    async fn read_file(&self, path: &str) -> Result<RemoteFile, RemoteError>;

    /// Creates (`revision == None`) or replaces the file at `path` and returns the new
    /// revision tag.
    async fn write_file(
        &self,
        path: &str,
        content: &[u8],
        message: &str,
        revision: Option<&str>,
    ) -> Result<String, RemoteError>;

    async fn delete_file(&self, path: &str, revision: &str, message: &str)
    -> Result<(), RemoteError>;

    async fn exists(&self, path: &str) -> Result<bool, RemoteError> {
        match self.read_file(path).await {
            Ok(_) => Ok(true),
            Err(RemoteError::NotFound(_)) => Ok(false),
            Err(e) => Err(e),
        }
    }
}

use super::{RemoteError, RemoteFile, RemoteRepository, RepoCoordinates, decode_content, encode_content};
use async_trait::async_trait;
use reqwest::{Client, Method, RequestBuilder, Response, StatusCode};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, error, info};
use url::Url;
use util::config::AppConfig;

/// [`RemoteRepository`] backed by the GitHub contents API.
#[derive(Clone)]
pub struct GitHubRepository {
    client: Client,
    api_url: Url,
    token: String,
    coordinates: RepoCoordinates,
}

#[derive(Debug, Deserialize)]
struct ContentsResponse {
    path: String,
    sha: String,
    #[serde(default)]
    content: String,
}

#[derive(Debug, Deserialize)]
struct WriteResponse {
    content: WrittenContent,
}

#[derive(Debug, Deserialize)]
struct WrittenContent {
    sha: String,
}

#[derive(Debug, Serialize)]
struct WriteRequest<'a> {
    message: &'a str,
    content: String,
    branch: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    sha: Option<&'a str>,
}

#[derive(Debug, Serialize)]
struct DeleteRequest<'a> {
    message: &'a str,
    sha: &'a str,
    branch: &'a str,
}

impl GitHubRepository {
    pub fn new(
        api_url: &str,
        token: impl Into<String>,
        coordinates: RepoCoordinates,
        timeout: Duration,
    ) -> Result<Self, RemoteError> {
        let api_url = Url::parse(api_url)
            .map_err(|e| RemoteError::Unavailable(format!("invalid API URL {api_url}: {e}")))?;
        let client = Client::builder()
            .user_agent(concat!("code-portal/", env!("CARGO_PKG_VERSION")))
            .timeout(timeout)
            .build()
            .map_err(|e| RemoteError::Unavailable(format!("failed to build HTTP client: {e}")))?;

        Ok(Self {
            client,
            api_url,
            token: token.into(),
            coordinates,
        })
    }

    /// Builds the client from the `GITHUB_*` and `REPO_ROOT_FOLDER` settings.
    pub fn from_config(config: &AppConfig) -> Result<Self, RemoteError> {
        let coordinates = RepoCoordinates::new(
            &config.github_owner,
            &config.github_repo,
            &config.github_branch,
            &config.repo_root_folder,
        )
        .with_hosts(&config.github_web_url, &config.github_raw_url)
        .map_err(|e| RemoteError::Unavailable(format!("invalid repository host: {e}")))?;

        Self::new(
            &config.github_api_url,
            &config.github_token,
            coordinates,
            Duration::from_secs(config.remote_timeout_secs),
        )
    }

    fn contents_url(&self, path: &str) -> Url {
        let mut url = self.api_url.clone();
        if let Ok(mut segments) = url.path_segments_mut() {
            segments
                .pop_if_empty()
                .extend([
                    "repos",
                    self.coordinates.owner.as_str(),
                    self.coordinates.repo.as_str(),
                    "contents",
                ])
                .extend(path.split('/'));
        }
        url
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let mut builder = self
            .client
            .request(method, self.contents_url(path))
            .header("Accept", "application/vnd.github.v3+json");
        if !self.token.is_empty() {
            builder = builder.header("Authorization", format!("Bearer {}", self.token));
        }
        builder
    }

    async fn send(&self, builder: RequestBuilder, path: &str) -> Result<Response, RemoteError> {
        let response = builder.send().await.map_err(|e| {
            error!(path, error = %e, "GitHub request failed");
            if e.is_timeout() {
                RemoteError::Unavailable(format!("GitHub request for {path} timed out"))
            } else {
                RemoteError::Unavailable(format!("GitHub request for {path} failed: {e}"))
            }
        })?;

        if response.status().is_success() {
            return Ok(response);
        }

        let status = response.status();
        let body = response.text().await.unwrap_or_default();
        Err(classify(status, path, &body))
    }
}

/// Maps a non-success status from the contents API onto the repository error model.
fn classify(status: StatusCode, path: &str, body: &str) -> RemoteError {
    match status {
        StatusCode::NOT_FOUND => RemoteError::NotFound(path.to_owned()),
        StatusCode::CONFLICT => {
            RemoteError::Conflict(format!("{path} changed in the code repository"))
        }
        // A create without `sha` on an existing path is a 422 naming the missing sha.
        // Every other 422 is a request GitHub will never accept.
        StatusCode::UNPROCESSABLE_ENTITY if body.contains(r#"\"sha\" wasn't supplied"#) => {
            RemoteError::Conflict(format!("{path} already exists in the code repository"))
        }
        StatusCode::UNPROCESSABLE_ENTITY => {
            error!(path, body, "GitHub refused the request");
            RemoteError::Rejected(format!("The code repository refused {path}"))
        }
        _ => {
            error!(path, %status, body, "GitHub API error");
            RemoteError::Unavailable(format!("GitHub API returned {status} for {path}"))
        }
    }
}

#[async_trait]
impl RemoteRepository for GitHubRepository {
    fn coordinates(&self) -> &RepoCoordinates {
        &self.coordinates
    }

    async fn read_file(&self, path: &str) -> Result<RemoteFile, RemoteError> {
        debug!(path, "Fetching file from GitHub");
        let builder = self
            .request(Method::GET, path)
            .query(&[("ref", self.coordinates.branch.as_str())]);
        let response = self.send(builder, path).await?;

        // Directories come back as arrays and fail to parse here.
        let file: ContentsResponse = response.json().await.map_err(|e| {
            RemoteError::Unavailable(format!("unexpected contents response for {path}: {e}"))
        })?;

        Ok(RemoteFile {
            content: decode_content(&file.content)?,
            path: file.path,
            revision: file.sha,
        })
    }

    async fn write_file(
        &self,
        path: &str,
        content: &[u8],
        message: &str,
        revision: Option<&str>,
    ) -> Result<String, RemoteError> {
        let body = WriteRequest {
            message,
            content: encode_content(content),
            branch: &self.coordinates.branch,
            sha: revision,
        };
        let builder = self.request(Method::PUT, path).json(&body);
        let response = self.send(builder, path).await?;

        let written: WriteResponse = response.json().await.map_err(|e| {
            RemoteError::Unavailable(format!("unexpected write response for {path}: {e}"))
        })?;
        info!(path, revision = %written.content.sha, "Wrote file to GitHub");
        Ok(written.content.sha)
    }

    async fn delete_file(
        &self,
        path: &str,
        revision: &str,
        message: &str,
    ) -> Result<(), RemoteError> {
        let body = DeleteRequest {
            message,
            sha: revision,
            branch: &self.coordinates.branch,
        };
        let builder = self.request(Method::DELETE, path).json(&body);
        self.send(builder, path).await?;
        info!(path, "Deleted file from GitHub");
        Ok(())
    }
}

use reqwest::blocking::Client;
use reqwest::header::ACCEPT;
use reqwest::Url;
use serde::Serialize;

use cfdb_core::PublishConfig;

use crate::contents::{
    encode_content, ContentPublisher, PublishError, PublishTarget, RemoteObjectMetadata,
};

const USER_AGENT: &str = "creative-uploader";
const GITHUB_MEDIA_TYPE: &str = "application/vnd.github+json";
const DIAGNOSTIC_CHARS: usize = 200;

/// Commits files one at a time through the GitHub "create or update file
/// contents" endpoint.
pub struct GitHubContentsPublisher {
    client: Client,
    token: String,
    contents_url: String,
    branch: Option<String>,
}

impl GitHubContentsPublisher {
    pub fn new(config: &PublishConfig) -> Result<Self, PublishError> {
        let mut builder = Client::builder().user_agent(USER_AGENT);
        // Loopback stand-ins for the API must not be routed through a proxy.
        if is_loopback(&config.api_url) {
            builder = builder.no_proxy();
        }
        let client = builder
            .build()
            .map_err(|err| PublishError::RemoteApi(format!("failed to build client: {}", err)))?;
        Ok(Self {
            client,
            token: config.token.clone(),
            contents_url: format!(
                "{}/repos/{}/{}/contents",
                config.api_url, config.owner, config.repo
            ),
            branch: config.branch.clone(),
        })
    }

    fn object_url(&self, remote_path: &str) -> String {
        format!("{}/{}", self.contents_url, encode_path(remote_path))
    }
}

#[derive(Debug, Serialize)]
struct PutContentsRequest<'a> {
    message: String,
    content: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    branch: Option<&'a str>,
}

impl ContentPublisher for GitHubContentsPublisher {
    fn publish(&self, target: &PublishTarget) -> Result<RemoteObjectMetadata, PublishError> {
        let payload = PutContentsRequest {
            message: format!("Upload {}", target.remote_path),
            content: encode_content(&target.content),
            branch: self.branch.as_deref(),
        };
        log::debug!(
            "committing {} ({} bytes)",
            target.remote_path,
            target.content.len()
        );
        let response = self
            .client
            .put(self.object_url(&target.remote_path))
            .bearer_auth(&self.token)
            .header(ACCEPT, GITHUB_MEDIA_TYPE)
            .json(&payload)
            .send()
            .map_err(|err| {
                PublishError::RemoteApi(format!(
                    "GitHub upload failed for '{}': {}",
                    target.remote_path,
                    err.without_url()
                ))
            })?;
        let status = response.status().as_u16();
        // The body is read as text first: some failures come back as HTML.
        let body = response.text().map_err(|err| {
            PublishError::RemoteApi(format!(
                "GitHub upload failed ({}): could not read response body: {}",
                status,
                err.without_url()
            ))
        })?;
        classify_response(status, &body)
    }
}

/// Maps a contents-API response onto success or a typed failure.
///
/// | status  | body          | outcome                    |
/// |---------|---------------|----------------------------|
/// | 2xx     | JSON          | parsed metadata            |
/// | 2xx     | not JSON      | `RemoteResponseMalformed`  |
/// | non-2xx | HTML document | `RemoteApi` (visibility)   |
/// | non-2xx | anything else | `RemoteApi` (truncated)    |
///
/// A 2xx JSON body whose fields do not match `RemoteObjectMetadata` (for
/// example `{"content":"x"}`) still counts as success, with empty metadata.
pub fn classify_response(status: u16, body: &str) -> Result<RemoteObjectMetadata, PublishError> {
    if (200..300).contains(&status) {
        let value: serde_json::Value = serde_json::from_str(body).map_err(|err| {
            PublishError::RemoteResponseMalformed(format!("status {}: {}", status, err))
        })?;
        return Ok(serde_json::from_value(value).unwrap_or_else(|err| {
            log::debug!("ignoring unexpected metadata shape ({}): {}", status, err);
            RemoteObjectMetadata::default()
        }));
    }
    if looks_like_html(body) {
        return Err(PublishError::RemoteApi(format!(
            "GitHub upload failed ({}): received an HTML page instead of an API response; \
             make sure the repository is public and the GitHub token is valid",
            status
        )));
    }
    Err(PublishError::RemoteApi(format!(
        "GitHub upload failed ({}): {}",
        status,
        truncate(body, DIAGNOSTIC_CHARS)
    )))
}

fn looks_like_html(body: &str) -> bool {
    let head: String = body
        .trim_start()
        .chars()
        .take(9)
        .collect::<String>()
        .to_ascii_lowercase();
    head.starts_with("<!doctype") || head.starts_with("<html")
}

fn truncate(body: &str, limit: usize) -> String {
    let mut chars = body.chars();
    let head: String = chars.by_ref().take(limit).collect();
    if chars.next().is_some() {
        format!("{}...", head)
    } else {
        head
    }
}

fn encode_path(remote_path: &str) -> String {
    remote_path
        .split('/')
        .map(|segment| urlencoding::encode(segment).into_owned())
        .collect::<Vec<_>>()
        .join("/")
}

fn is_loopback(api_url: &str) -> bool {
    Url::parse(api_url)
        .ok()
        .and_then(|url| url.host_str().map(|host| host.to_string()))
        .map(|host| matches!(host.as_str(), "localhost" | "127.0.0.1" | "[::1]"))
        .unwrap_or(false)
}

use base64::Engine;
use cfdb_core::check_relative_path;
use serde::Deserialize;
use thiserror::Error;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PublishTarget {
    pub remote_path: String,
    pub content: Vec<u8>,
}

impl PublishTarget {
    pub fn new(remote_path: impl Into<String>, content: Vec<u8>) -> Self {
        Self {
            remote_path: remote_path.into(),
            content,
        }
    }
}

/// Metadata the contents API returns for a committed file. Every field is
/// optional: any well-formed JSON body counts as success.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
pub struct RemoteObjectMetadata {
    #[serde(default)]
    pub content: Option<RemoteContent>,
    #[serde(default)]
    pub commit: Option<RemoteCommit>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
pub struct RemoteContent {
    pub path: Option<String>,
    pub sha: Option<String>,
    pub size: Option<u64>,
    pub html_url: Option<String>,
    pub download_url: Option<String>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
pub struct RemoteCommit {
    pub sha: Option<String>,
    pub html_url: Option<String>,
}

#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum PublishError {
    #[error("invalid publish target '{path}': {reason}")]
    InvalidTarget { path: String, reason: &'static str },
    #[error("{0}")]
    RemoteApi(String),
    #[error("GitHub returned an unreadable response: {0}")]
    RemoteResponseMalformed(String),
}

pub trait ContentPublisher {
    fn publish(&self, target: &PublishTarget) -> Result<RemoteObjectMetadata, PublishError>;
}

pub fn publish_target<P: ContentPublisher + ?Sized>(
    publisher: &P,
    target: &PublishTarget,
) -> Result<RemoteObjectMetadata, PublishError> {
    validate_target(target)?;
    publisher.publish(target)
}

pub fn encode_content(content: &[u8]) -> String {
    base64::engine::general_purpose::STANDARD.encode(content)
}

fn validate_target(target: &PublishTarget) -> Result<(), PublishError> {
    check_relative_path(&target.remote_path).map_err(|reason| PublishError::InvalidTarget {
        path: target.remote_path.clone(),
        reason,
    })
}

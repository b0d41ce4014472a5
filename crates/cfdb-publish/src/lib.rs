pub mod contents;
pub mod github;

pub use contents::{
    encode_content, publish_target, ContentPublisher, PublishError, PublishTarget,
    RemoteCommit, RemoteContent, RemoteObjectMetadata,
};
pub use github::{classify_response, GitHubContentsPublisher};

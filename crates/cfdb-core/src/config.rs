use thiserror::Error;

pub const DEFAULT_REPO_OWNER: &str = "JuanHawu";
pub const DEFAULT_REPO_NAME: &str = "creativedatafileabase";
pub const DEFAULT_API_URL: &str = "https://api.github.com";

const TOKEN_VAR: &str = "GITHUB_TOKEN";
const OWNER_VAR: &str = "REPO_OWNER";
const REPO_VAR: &str = "REPO_NAME";
const API_URL_VAR: &str = "GITHUB_API_URL";
const BRANCH_VAR: &str = "REPO_BRANCH";

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("missing {0} in environment variables")]
    MissingToken(&'static str),
    #[error("invalid value '{value}' for {key}: {reason}")]
    InvalidValue {
        key: &'static str,
        value: String,
        reason: &'static str,
    },
}

/// Credential and repository identity for the remote contents API.
///
/// Built once at startup and handed to the publisher by reference; nothing
/// downstream reads the environment again.
#[derive(Clone, PartialEq, Eq)]
pub struct PublishConfig {
    pub token: String,
    pub owner: String,
    pub repo: String,
    pub api_url: String,
    pub branch: Option<String>,
}

impl PublishConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let read = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        let token = read(TOKEN_VAR).ok_or(ConfigError::MissingToken(TOKEN_VAR))?;
        let owner = read(OWNER_VAR).unwrap_or_else(|| DEFAULT_REPO_OWNER.to_string());
        let repo = read(REPO_VAR).unwrap_or_else(|| DEFAULT_REPO_NAME.to_string());
        let api_url = read(API_URL_VAR).unwrap_or_else(|| DEFAULT_API_URL.to_string());
        let branch = read(BRANCH_VAR);

        validate_slug(OWNER_VAR, &owner)?;
        validate_slug(REPO_VAR, &repo)?;
        if !(api_url.starts_with("https://") || api_url.starts_with("http://")) {
            return Err(ConfigError::InvalidValue {
                key: API_URL_VAR,
                value: api_url,
                reason: "expected an http(s) URL",
            });
        }

        Ok(Self {
            token: token.trim().to_string(),
            owner,
            repo,
            api_url: api_url.trim_end_matches('/').to_string(),
            branch,
        })
    }

    pub fn repository(&self) -> String {
        format!("{}/{}", self.owner, self.repo)
    }
}

impl std::fmt::Debug for PublishConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PublishConfig")
            .field("token", &"<redacted>")
            .field("owner", &self.owner)
            .field("repo", &self.repo)
            .field("api_url", &self.api_url)
            .field("branch", &self.branch)
            .finish()
    }
}

fn validate_slug(key: &'static str, value: &str) -> Result<(), ConfigError> {
    let valid = value
        .chars()
        .all(|ch| ch.is_ascii_alphanumeric() || matches!(ch, '-' | '_' | '.'));
    if valid {
        return Ok(());
    }
    Err(ConfigError::InvalidValue {
        key,
        value: value.to_string(),
        reason: "only ASCII letters, digits, '-', '_' and '.' are allowed",
    })
}

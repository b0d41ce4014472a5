use crate::config::PublishConfig;
use crate::folder::FolderName;

pub const INDEX_FILE: &str = "index.html";
pub const LOGO_FILE: &str = "logo.png";

/// Static-hosting location (GitHub Pages) of the target repository.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HostingSite {
    owner: String,
    repo: String,
}

impl HostingSite {
    pub fn new(owner: &str, repo: &str) -> Self {
        Self {
            owner: owner.to_string(),
            repo: repo.to_string(),
        }
    }

    pub fn base_url(&self) -> String {
        format!("https://{}.github.io/{}", self.owner.to_lowercase(), self.repo)
    }

    pub fn folder_url(&self, folder: &FolderName) -> String {
        format!("{}/{}", self.base_url(), folder)
    }

    pub fn index_url(&self, folder: &FolderName) -> String {
        format!("{}/{}", self.folder_url(folder), INDEX_FILE)
    }

    pub fn asset_url(&self, folder: &FolderName) -> String {
        format!("{}/{}", self.folder_url(folder), LOGO_FILE)
    }
}

impl From<&PublishConfig> for HostingSite {
    fn from(config: &PublishConfig) -> Self {
        Self::new(&config.owner, &config.repo)
    }
}
